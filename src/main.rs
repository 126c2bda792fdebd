use std::{env, fs, path::PathBuf, process, rc::Rc};

use quillc::{
    checker::checker::Checker,
    errors::{errors::Diagnostic, render::render},
    ir::{gen::lower, marshal::marshal},
    lexer::lexer::Lexer,
    modules::ModuleManager,
    parser::parser::parse,
    Position,
};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: quillc <file>");
        process::exit(2);
    }

    let path = &args[1];
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: failed to read {}: {}", path, err);
            process::exit(1);
        }
    };

    let file = Rc::new(path.clone());
    let mut modules = ModuleManager::new();
    let module_id = modules.register(path, source.clone());

    let lexer = Lexer::new(source.clone(), Rc::clone(&file));
    let ast = match parse(lexer) {
        Ok(ast) => ast,
        Err(diagnostic) => fail(&diagnostic, &source),
    };

    let mut checker = Checker::with_modules(Rc::clone(&file), &mut modules);
    checker.check_module(&ast);
    let exports = checker.take_exports();
    let diagnostics = checker.into_diagnostics();

    if let Some(module) = modules.get_mut(module_id) {
        module.exports = exports;
        module.ast = Some(ast.clone());
    }

    let failed = diagnostics.iter().any(|d| d.is_error());
    for diagnostic in &diagnostics {
        eprint!("{}", render(diagnostic, &source));
    }
    if failed {
        process::exit(1);
    }

    let program = lower(&ast);
    let bytes = match marshal(&program) {
        Ok(bytes) => bytes,
        Err(kind) => {
            let diagnostic = Diagnostic::new(kind, Rc::clone(&file), Position::null());
            fail(&diagnostic, &source)
        }
    };

    let out_path = PathBuf::from(path).with_extension("qbc");
    if let Err(err) = fs::write(&out_path, bytes) {
        eprintln!("error: failed to write {}: {}", out_path.display(), err);
        process::exit(1);
    }
}

fn fail(diagnostic: &Diagnostic, source: &str) -> ! {
    eprint!("{}", render(diagnostic, source));
    process::exit(1);
}
