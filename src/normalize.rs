//! Token normalization: lowercase, alphabetic-only, stop words removed.

use crate::stopwords::StopWordSet;
use crate::tokenize::Tokenizer;

/// Options that shape which tokens survive.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions {
    /// Shortest word kept, counted in characters.
    pub min_word_len: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self { min_word_len: 1 }
    }
}

/// True when `token` is one or more ASCII lowercase letters.
pub fn is_lower_alpha(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_lowercase())
}

/// Tokenize `text` and keep only lowercase alphabetic non-stop-words.
///
/// Filters run in order: lowercase, alphabetic check, length, stop words.
/// Tokens are never re-split; whatever the tokenizer emits is judged whole.
pub fn normalize(
    text: &str,
    tokenizer: &dyn Tokenizer,
    stop_words: &StopWordSet,
    options: NormalizeOptions,
) -> Vec<String> {
    tokenizer
        .tokenize(text)
        .into_iter()
        .map(|token| token.to_lowercase())
        .filter(|token| is_lower_alpha(token))
        .filter(|token| token.len() >= options.min_word_len)
        .filter(|token| !stop_words.contains(token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::{CharClassTokenizer, UnicodeWordTokenizer};

    fn run(text: &str, stop: &[&str]) -> Vec<String> {
        normalize(
            text,
            &UnicodeWordTokenizer,
            &StopWordSet::from_words(stop.iter().copied()),
            NormalizeOptions::default(),
        )
    }

    #[test]
    fn cat_sentence() {
        let tokens = run("The Cat sat on the MAT. Cats sat!", &["the", "on"]);
        assert_eq!(tokens, vec!["cat", "sat", "mat", "cats", "sat"]);
    }

    #[test]
    fn only_stop_words_and_punctuation() {
        assert!(run("The. On! The.", &["the", "on"]).is_empty());
    }

    #[test]
    fn empty_text() {
        assert!(run("", &["the"]).is_empty());
    }

    #[test]
    fn digits_and_mixed_tokens_are_dropped() {
        let tokens = run("java8 1995 C++ café rust", &[]);
        assert_eq!(tokens, vec!["c", "rust"]);
    }

    #[test]
    fn contractions_depend_on_tokenizer() {
        let stop = StopWordSet::from_words(["can't"]);
        let opts = NormalizeOptions::default();
        // Kept whole, the apostrophe fails the alphabetic check.
        assert!(normalize("can't", &UnicodeWordTokenizer, &stop, opts).is_empty());
        // Split apart, the letter runs survive.
        let tokens = normalize("can't", &CharClassTokenizer, &stop, opts);
        assert_eq!(tokens, vec!["can", "t"]);
    }

    #[test]
    fn min_word_len_filters_short_words() {
        let opts = NormalizeOptions { min_word_len: 3 };
        let tokens = normalize("a an cat", &UnicodeWordTokenizer, &StopWordSet::default(), opts);
        assert_eq!(tokens, vec!["cat"]);
    }

    #[test]
    fn output_is_lowercase_alpha_and_not_stop_word() {
        let stop = StopWordSet::builtin();
        let text = "It's 2024: Rust's borrow-checker, THE compiler & you're (mostly) fine!";
        for tokenizer in [&UnicodeWordTokenizer as &dyn Tokenizer, &CharClassTokenizer] {
            for token in normalize(text, tokenizer, &stop, NormalizeOptions::default()) {
                assert!(is_lower_alpha(&token), "{token:?}");
                assert!(!stop.contains(&token), "{token:?}");
            }
        }
    }
}
