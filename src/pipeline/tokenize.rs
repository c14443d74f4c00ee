//! Whitespace tokenisation.
//!
//! A "token" here is a maximal run of non-whitespace characters. There is
//! no stemming, punctuation handling, or subword splitting: `"don't stop."`
//! is two tokens.
//!
//! Separators are the ECMAScript whitespace and line-terminator set. It
//! differs from [`char::is_whitespace`] in two code points: U+FEFF (BOM)
//! separates tokens, U+0085 (NEL) does not.

/// Join a page's text fragments with a single space, preserving order.
pub fn join_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    let mut out = String::new();
    for (i, fragment) in fragments.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(fragment.as_ref());
    }
    out
}

/// Whether `c` separates tokens.
pub fn is_separator(c: char) -> bool {
    match c {
        '\u{0085}' => false,
        '\u{FEFF}' => true,
        other => other.is_whitespace(),
    }
}

/// `text` without leading or trailing separators.
pub fn trim_separators(text: &str) -> &str {
    text.trim_matches(is_separator)
}

/// Count whitespace-delimited tokens in `text`.
///
/// Empty and whitespace-only input yields 0. Runs of mixed whitespace
/// (spaces, tabs, newlines, Unicode spaces) collapse to a single boundary.
pub fn count_tokens(text: &str) -> usize {
    let trimmed = trim_separators(text);
    if trimmed.is_empty() {
        return 0;
    }
    trimmed.split(is_separator).filter(|run| !run.is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_simple_words() {
        assert_eq!(count_tokens("Hello world"), 2);
    }

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(count_tokens("Hello   world\n\tfoo"), 3);
    }

    #[test]
    fn empty_and_blank_are_zero() {
        assert_eq!(count_tokens(""), 0);
        assert_eq!(count_tokens("   "), 0);
        assert_eq!(count_tokens(" \n\t\r "), 0);
        assert_eq!(count_tokens("\u{00A0}\u{2003}"), 0);
    }

    #[test]
    fn byte_order_mark_separates_tokens() {
        assert_eq!(count_tokens("a\u{FEFF}b"), 2);
        assert_eq!(count_tokens("\u{FEFF}"), 0);
        assert_eq!(trim_separators("\u{FEFF} text \u{FEFF}"), "text");
    }

    #[test]
    fn next_line_is_not_a_separator() {
        assert_eq!(count_tokens("a\u{0085}b"), 1);
        assert_eq!(count_tokens("\u{0085}"), 1);
    }

    #[test]
    fn unicode_spaces_separate_tokens() {
        assert_eq!(count_tokens("a\u{00A0}b\u{2003}c\u{3000}d\u{2028}e"), 5);
    }

    #[test]
    fn punctuation_is_not_stripped() {
        assert_eq!(count_tokens("don't stop."), 2);
        assert_eq!(count_tokens("- - -"), 3);
    }

    #[test]
    fn join_uses_single_space() {
        assert_eq!(join_fragments(&["Hello", "world"]), "Hello world");
        assert_eq!(join_fragments::<&str>(&[]), "");
        assert_eq!(join_fragments(&["only"]), "only");
    }

    #[test]
    fn empty_fragments_do_not_create_tokens() {
        let joined = join_fragments(&["", "a", "", "b", ""]);
        assert_eq!(joined, " a  b ");
        assert_eq!(count_tokens(&joined), 2);
    }
}
