// crates/toggle_line_comment/src/lib.rs

use std::ops::RangeInclusive;

/// Toggles the comment prefix on a single line.
///
/// Indentation is preserved. `prefix + " "` is removed if present, else a bare
/// `prefix`; a line with neither gets `prefix + " "` inserted after its
/// indentation.
pub fn toggle_line(line: &str, prefix: &str) -> String {
    let trimmed = line.trim_start();
    let indent = &line[..line.len() - trimmed.len()];
    let spaced = format!("{prefix} ");

    if let Some(rest) = trimmed.strip_prefix(spaced.as_str()) {
        format!("{indent}{rest}")
    } else if let Some(rest) = trimmed.strip_prefix(prefix) {
        format!("{indent}{rest}")
    } else {
        format!("{indent}{spaced}{trimmed}")
    }
}

/// Toggles the comment prefix on every line in `lines` (zero-based,
/// inclusive). `None` means the whole text; a single trailing newline is not
/// treated as an extra line. Line breaks are kept exactly as they were.
pub fn toggle_comment_lines(text: &str, prefix: &str, lines: Option<RangeInclusive<usize>>) -> String {
    if prefix.is_empty() {
        return text.to_string();
    }

    let mut rows: Vec<&str> = text.split('\n').collect();
    let trailing_newline = rows.len() > 1 && rows.last() == Some(&"");
    if trailing_newline {
        rows.pop();
    }

    let range = lines.unwrap_or(0..=rows.len().saturating_sub(1));
    let mut out: Vec<String> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            if range.contains(&i) {
                toggle_line(row, prefix)
            } else {
                row.to_string()
            }
        })
        .collect();

    if trailing_newline {
        out.push(String::new());
    }
    out.join("\n")
}
