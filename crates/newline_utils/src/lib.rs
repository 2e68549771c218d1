// crates/newline_utils/src/lib.rs

/// Converts literal "\n" sequences in the input string to actual newline characters.
/// Used for prefix/suffix values passed on the command line.
pub fn unescape_newlines(input: &str) -> String {
    input.replace("\\n", "\n")
}

/// Rewrites `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(input: &str) -> String {
    if !input.contains('\r') {
        return input.to_string();
    }
    input.replace("\r\n", "\n").replace('\r', "\n")
}

/// Splits text into physical lines on any newline convention.
///
/// A single trailing newline does not produce an extra empty line, while
/// interior blank lines are kept.
pub fn physical_lines(input: &str) -> Vec<String> {
    normalize_newlines(input)
        .lines()
        .map(str::to_string)
        .collect()
}
