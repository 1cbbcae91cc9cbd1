//! wordcloud: fetch an article, count its words, draw a word cloud.

pub mod config;
pub mod error;
pub mod fetch;
pub mod frequency;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod stopwords;
pub mod tokenize;

pub use config::Config;
pub use error::{Error, Result};
pub use frequency::{FrequencyMap, WordFrequency};
pub use stopwords::StopWordSet;
