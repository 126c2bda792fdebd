//! Binary serialization of an IR Program.
//!
//! Layout, all multi-byte fields as unsigned LEB128 varints (u32 domain):
//!
//! ```text
//! [pool count]
//! per pool entry: [tag u8] [payload length] [payload bytes]
//! [function count]
//! per function (sorted by name): [name constant] [arity] [code length] [code]
//! [top-level code length] [top-level code]
//! ```
//!
//! Values up to 127 occupy a single byte, so small programs keep the
//! single-byte shapes of the reference encoding while lengths above 255
//! remain representable. Constant payloads: Str is raw UTF-8, Int is 8
//! bytes little-endian. Instructions are a tag byte, with a varint operand
//! after LoadConstant/Store/LoadLocal.

use super::program::{Constant, Instruction, Program};
use crate::errors::errors::ErrorKind;

/// Unsigned LEB128.
pub fn write_varint(out: &mut Vec<u8>, mut value: u32) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            out.push(byte | 0x80);
        } else {
            out.push(byte);
            break;
        }
    }
}

fn varint_len(len: usize) -> Result<u32, ErrorKind> {
    u32::try_from(len).map_err(|_| ErrorKind::OversizedPayload { len })
}

fn write_code(out: &mut Vec<u8>, code: &[Instruction]) {
    for instruction in code {
        out.push(instruction.tag());
        match instruction {
            Instruction::LoadConstant(index)
            | Instruction::Store(index)
            | Instruction::LoadLocal(index) => write_varint(out, *index),
            Instruction::Call | Instruction::Return => {}
        }
    }
}

fn write_code_section(out: &mut Vec<u8>, code: &[Instruction]) -> Result<(), ErrorKind> {
    let mut encoded = vec![];
    write_code(&mut encoded, code);
    write_varint(out, varint_len(encoded.len())?);
    out.extend_from_slice(&encoded);
    Ok(())
}

/// Serializes the Program into its binary layout.
pub fn marshal(program: &Program) -> Result<Vec<u8>, ErrorKind> {
    let mut out = vec![];

    write_varint(&mut out, varint_len(program.constants.len())?);
    for constant in &program.constants {
        out.push(constant.tag());
        match constant {
            Constant::Str(value) => {
                write_varint(&mut out, varint_len(value.len())?);
                out.extend_from_slice(value.as_bytes());
            }
            Constant::Int(value) => {
                write_varint(&mut out, 8);
                out.extend_from_slice(&value.to_le_bytes());
            }
        }
    }

    // Sorted so the layout is deterministic; the in-memory table is an
    // unordered map keyed by name.
    let mut names: Vec<&String> = program.functions.keys().collect();
    names.sort();

    write_varint(&mut out, varint_len(names.len())?);
    for name in names {
        let function = &program.functions[name];
        write_varint(&mut out, function.name_constant);
        write_varint(&mut out, varint_len(function.arity)?);
        write_code_section(&mut out, &function.code)?;
    }

    write_code_section(&mut out, &program.top_level)?;

    Ok(out)
}
