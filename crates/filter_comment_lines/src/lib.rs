// crates/filter_comment_lines/src/lib.rs

use newline_utils::physical_lines;

/// Returns `true` if the line, ignoring leading whitespace, starts with the
/// comment prefix. The prefix is matched literally and case-sensitively; an
/// empty prefix never matches.
pub fn is_comment_line(line: &str, prefix: &str) -> bool {
    !prefix.is_empty() && line.trim_start().starts_with(prefix)
}

/// Splits the text into physical lines and drops every comment line.
///
/// Surviving lines are returned unchanged, leading whitespace and blank lines
/// included. This runs before any tag scanning, so a comment line sitting
/// inside a tagged region is dropped as well.
pub fn filter_comment_lines(content: &str, prefix: &str) -> Vec<String> {
    physical_lines(content)
        .into_iter()
        .filter(|line| !is_comment_line(line, prefix))
        .collect()
}
