//! Terminal rendering for diagnostics.
//!
//! Formats one diagnostic as a colored header plus a highlighted source
//! excerpt, with carets under the spanned columns and up to two lines of
//! surrounding context. A secondary cross-reference renders as an indented
//! second excerpt in the info color.

use super::errors::{Diagnostic, Severity};
use crate::Position;

const RESET: &str = "\x1b[0m";
const RED_BOLD: &str = "\x1b[1;31m";
const YELLOW_BOLD: &str = "\x1b[1;33m";
const CYAN_BOLD: &str = "\x1b[1;36m";

/// Lines of context shown before and after the spanned lines.
const CONTEXT_LINES: usize = 2;

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => RED_BOLD,
        Severity::Warn => YELLOW_BOLD,
        Severity::Info => CYAN_BOLD,
    }
}

/// Renders a diagnostic against the source text of its module. The
/// secondary excerpt is only printed when it points into the same module;
/// a cross-module reference still gets its header line.
pub fn render(diagnostic: &Diagnostic, source: &str) -> String {
    let color = severity_color(diagnostic.severity);
    let mut out = format!(
        "{}{}:{}:{} {}: {}{}\n",
        color,
        diagnostic.module,
        diagnostic.position.line,
        diagnostic.position.column,
        diagnostic.severity.label(),
        diagnostic.message,
        RESET,
    );
    out.push_str(&excerpt(source, &diagnostic.position, ""));

    if let Some(secondary) = &diagnostic.secondary {
        let info = severity_color(Severity::Info);
        out.push_str(&format!(
            "  {}{}:{}:{} {}{}\n",
            info,
            secondary.module,
            secondary.position.line,
            secondary.position.column,
            secondary.message,
            RESET,
        ));
        if *secondary.module == *diagnostic.module {
            out.push_str(&excerpt(source, &secondary.position, "  "));
        }
    }

    out
}

/// The source excerpt for one position: numbered lines with a `| ` gutter
/// and caret lines under every line the span touches.
fn excerpt(source: &str, position: &Position, indent: &str) -> String {
    // Offsets in a Position are inclusive; excerpt math wants an exclusive
    // upper bound, clamped to the content.
    let start = position.start.min(source.len());
    let end = (position.end + 1).min(source.len());

    let lines = line_table(source);
    if lines.is_empty() {
        return String::new();
    }

    let first = line_index(&lines, start);
    let last = if end > start {
        line_index(&lines, end - 1)
    } else {
        first
    };

    let window_start = first.saturating_sub(CONTEXT_LINES);
    let window_end = (last + CONTEXT_LINES).min(lines.len() - 1);
    let width = (window_end + 1).to_string().len();

    let mut out = String::new();
    for (index, (line_start, text)) in lines
        .iter()
        .enumerate()
        .take(window_end + 1)
        .skip(window_start)
    {
        out.push_str(&format!("{}{:>width$} | {}\n", indent, index + 1, text));

        if let Some((caret_start, caret_count)) =
            caret_range(start, end, *line_start, text.len())
        {
            out.push_str(&format!(
                "{}{:>width$} | {}{}\n",
                indent,
                "",
                " ".repeat(caret_start),
                "^".repeat(caret_count),
            ));
        }
    }

    out
}

/// Caret columns for one excerpt line, or None when the span does not
/// touch it. Zero-width spans place a single caret at the start column
/// unless that column is past the line's end.
fn caret_range(
    start: usize,
    end: usize,
    line_start: usize,
    line_len: usize,
) -> Option<(usize, usize)> {
    if end <= start {
        if (line_start..=line_start + line_len).contains(&start) {
            return Some((start - line_start, 1));
        }
        return None;
    }

    let overlap_start = start.max(line_start);
    let overlap_end = end.min(line_start + line_len);
    if overlap_start < overlap_end {
        Some((overlap_start - line_start, overlap_end - overlap_start))
    } else {
        None
    }
}

/// (byte offset of line start, line text without its newline) per line.
fn line_table(source: &str) -> Vec<(usize, &str)> {
    let mut lines = vec![];
    let mut offset = 0;
    for text in source.split('\n') {
        lines.push((offset, text));
        offset += text.len() + 1;
    }
    lines
}

/// Index of the line containing the byte offset.
fn line_index(lines: &[(usize, &str)], offset: usize) -> usize {
    match lines.binary_search_by(|(start, _)| start.cmp(&offset)) {
        Ok(index) => index,
        Err(insert) => insert.saturating_sub(1),
    }
}
