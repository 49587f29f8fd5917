//! Free-text sanitization for values embedded in storage keys and filenames.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Upper bound on sanitized output, in characters.
pub const MAX_SANITIZED_LENGTH: usize = 60;

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ' '
}

/// Reduce free text to `[A-Za-z0-9_-]`.
///
/// Diacritics are stripped after NFD decomposition ("João" becomes "Joao"),
/// every other disallowed character is dropped, and runs of spaces become a
/// single hyphen. Case is preserved. The result is at most
/// [`MAX_SANITIZED_LENGTH`] characters and `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(input: &str) -> String {
    let kept: String = input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| is_allowed(*c))
        .collect();

    kept.split(' ')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(MAX_SANITIZED_LENGTH)
        .collect()
}

/// [`sanitize`] followed by upper-casing. Used for download filenames only.
pub fn sanitize_upper(input: &str) -> String {
    sanitize(input).to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_diacritics_and_hyphenates() {
        assert_eq!(sanitize("João Silva"), "Joao-Silva");
        assert_eq!(sanitize("Onix 2022"), "Onix-2022");
        assert_eq!(sanitize("  Ação   Ônibus  "), "Acao-Onibus");
    }

    #[test]
    fn test_drops_disallowed_characters() {
        assert_eq!(sanitize("a/b\\c..d"), "abcd");
        assert_eq!(sanitize("<script>alert(1)</script>"), "scriptalert1script");
        assert_eq!(sanitize("tab\there"), "tabhere");
        assert_eq!(sanitize("snake_case-and-kebab"), "snake_case-and-kebab");
        assert_eq!(sanitize("日本語"), "");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_truncates_to_limit() {
        let long = "a".repeat(200);
        assert_eq!(sanitize(&long).len(), MAX_SANITIZED_LENGTH);

        let words = "word ".repeat(30);
        let out = sanitize(&words);
        assert_eq!(out.chars().count(), MAX_SANITIZED_LENGTH);
        assert!(out.starts_with("word-word"));
    }

    #[test]
    fn test_is_idempotent() {
        let repeated = "word ".repeat(30);
        let inputs = [
            "João Silva",
            "  leading and trailing  ",
            "Çãõ ü ñ -- __ x",
            repeated.as_str(),
            "a -b- c",
            "!!!",
            "Ünïcödé Ñame with    gaps",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "{input:?}");
        }
    }

    #[test]
    fn test_output_alphabet() {
        let inputs = ["Zoë's café, São Paulo!", "x\u{0301}y\u{200b}z", "a.b.c/d"];
        for input in inputs {
            let out = sanitize(input);
            assert!(out
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
            assert!(out.chars().count() <= MAX_SANITIZED_LENGTH);
        }
    }

    #[test]
    fn test_sanitize_upper() {
        assert_eq!(sanitize_upper("João Silva"), "JOAO-SILVA");
        assert_eq!(sanitize_upper(""), "");
    }
}
