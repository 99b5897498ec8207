// file: src/engine/tokenizer.rs
// description: lower-cased alphanumeric term extraction for the bag-of-words model
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

lazy_static! {
    /// Anything that is neither an ASCII letter/digit nor whitespace.
    static ref NON_TERM_CHARS: Regex =
        Regex::new(r"[^a-z0-9\s]").expect("NON_TERM_CHARS regex is valid");
}

/// Splits `text` into normalized terms.
///
/// Input is lower-cased, every character outside `[a-z0-9]` and whitespace is
/// replaced by a space, and the result is split on whitespace runs. There is no
/// stemming and no stop-word list. Never fails; empty input gives no terms.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_TERM_CHARS
        .replace_all(&lowered, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Raw occurrence count per distinct term.
pub fn term_frequencies(tokens: &[String]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lowercases_and_splits() {
        assert_eq!(
            tokenize("Alpha  Beta\tALPHA\n"),
            vec!["alpha", "beta", "alpha"]
        );
    }

    #[test]
    fn test_punctuation_becomes_separator() {
        assert_eq!(
            tokenize("round-robin, (FIFO) & priority_queue!"),
            vec!["round", "robin", "fifo", "priority", "queue"]
        );
    }

    #[test]
    fn test_digits_are_kept() {
        assert_eq!(tokenize("CS101 week 3"), vec!["cs101", "week", "3"]);
    }

    #[test]
    fn test_non_ascii_letters_are_dropped() {
        assert_eq!(tokenize("café naïve"), vec!["caf", "na", "ve"]);
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
        assert!(tokenize("?!... --- ***").is_empty());
    }

    #[test]
    fn test_term_frequencies() {
        let tokens = tokenize("alpha beta alpha");
        let counts = term_frequencies(&tokens);
        assert_eq!(counts.get("alpha"), Some(&2));
        assert_eq!(counts.get("beta"), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
