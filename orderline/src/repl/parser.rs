//! Line tokenizer for session input

/// One line of session input, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Empty or whitespace only; ends the session
    Blank,
    /// Starts with `#`; ignored
    Comment,
    /// Case-sensitive keyword plus whitespace-separated arguments
    Command { keyword: String, args: Vec<String> },
}

/// Classify and tokenize a line
pub fn parse_command(line: &str) -> ParsedLine {
    let line = line.trim();
    if line.is_empty() {
        return ParsedLine::Blank;
    }
    if line.starts_with('#') {
        return ParsedLine::Comment;
    }

    let mut parts = line.split_whitespace().map(str::to_string);
    let keyword = parts.next().unwrap_or_default();
    ParsedLine::Command {
        keyword,
        args: parts.collect(),
    }
}
