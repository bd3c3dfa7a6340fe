//! Common utility functions shared across the codebase.

/// Checks if a comment line carries no word character at all.
///
/// Word characters are Unicode alphanumerics and `_`. A blank line closes
/// any open multi-line annotation inside a block comment.
///
/// # Examples
///
/// ```
/// use reqsat::utils::is_blank_comment_line;
///
/// assert!(is_blank_comment_line(" * "));
/// assert!(is_blank_comment_line("---"));
/// assert!(is_blank_comment_line(""));
/// assert!(!is_blank_comment_line(" * foo"));
/// assert!(!is_blank_comment_line("_"));
/// assert!(!is_blank_comment_line("42"));
/// ```
pub fn is_blank_comment_line(text: &str) -> bool {
    !text.chars().any(|c| c.is_alphanumeric() || c == '_')
}

/// Number of characters in `text`, used as a column count.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Converts a byte offset inside `line` into a 0-based character offset.
pub fn char_offset(line: &str, byte_offset: usize) -> usize {
    line[..byte_offset.min(line.len())].chars().count()
}
