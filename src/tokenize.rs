//! Text to token splitting. Tokens come out as written; case and filtering
//! are handled by the normalizer.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Splits raw text into tokens.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Unicode word boundaries (UAX #29). `can't` stays one token.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words().map(str::to_string).collect()
    }
}

/// Splits where the character class changes (letter, digit, space, other).
/// Every punctuation character is its own token, so `can't` becomes
/// `can`, `'`, `t`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharClassTokenizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Alpha,
    Digit,
    Space,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_alphabetic() {
            CharClass::Alpha
        } else if c.is_numeric() {
            CharClass::Digit
        } else if c.is_whitespace() {
            CharClass::Space
        } else {
            CharClass::Other
        }
    }
}

impl Tokenizer for CharClassTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut class = CharClass::Space;

        for c in text.chars() {
            let next = CharClass::of(c);
            if next != class || next == CharClass::Other {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                class = next;
            }
            if next != CharClass::Space {
                current.push(c);
            }
        }
        if !current.is_empty() {
            tokens.push(current);
        }
        tokens
    }
}

/// Tokenizer selection for config files and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TokenizerKind {
    Unicode,
    #[default]
    CharClass,
}

impl TokenizerKind {
    pub fn build(self) -> Box<dyn Tokenizer> {
        match self {
            TokenizerKind::Unicode => Box::new(UnicodeWordTokenizer),
            TokenizerKind::CharClass => Box::new(CharClassTokenizer),
        }
    }
}
