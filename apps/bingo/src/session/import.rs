/// Splits a pasted word list into entries: one per line, trimmed, blanks dropped.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_whitespace_lines_dropped() {
        let words = parse_word_list("apple\n\n   \n banana \r\n\tcherry\n");
        assert_eq!(words, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(parse_word_list("").is_empty());
        assert!(parse_word_list("\n\n").is_empty());
    }

    #[test]
    fn test_inner_spaces_kept() {
        assert_eq!(parse_word_list("free coffee"), vec!["free coffee"]);
    }
}
