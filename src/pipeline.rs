//! Fetch → normalize → count → render, one stage after another.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::frequency::FrequencyMap;
use crate::normalize::{normalize, NormalizeOptions};
use crate::render::Renderer;
use crate::stopwords::StopWordSet;
use crate::tokenize::Tokenizer;

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Characters of article text fetched.
    pub text_len: usize,
    /// Words left after normalization.
    pub word_count: usize,
    pub distinct_words: usize,
    pub output: PathBuf,
}

/// Stop words named by the config: file or embedded list, plus extras.
pub fn stop_words(config: &Config) -> Result<StopWordSet> {
    let mut set = StopWordSet::load(config.text.stop_words_path.as_deref())?;
    set.extend(&config.text.extra_stop_words);
    Ok(set)
}

/// Count qualifying words in `text`. No I/O.
pub fn analyze(
    text: &str,
    tokenizer: &dyn Tokenizer,
    stop_words: &StopWordSet,
    options: NormalizeOptions,
) -> FrequencyMap {
    FrequencyMap::from_tokens(normalize(text, tokenizer, stop_words, options))
}

/// Fetch and count without rendering.
pub fn fetch_and_count(
    config: &Config,
    fetcher: &dyn Fetcher,
    tokenizer: &dyn Tokenizer,
) -> Result<(usize, FrequencyMap)> {
    let stop_words = stop_words(config)?;
    let text = fetcher.fetch(&config.source.url)?;
    let text_len = text.chars().count();
    tracing::info!(url = %config.source.url, chars = text_len, "fetched article");

    let options = NormalizeOptions {
        min_word_len: config.text.min_word_len,
    };
    let frequencies = analyze(&text, tokenizer, &stop_words, options);
    tracing::info!(
        words = frequencies.total(),
        distinct = frequencies.len(),
        "counted words"
    );
    Ok((text_len, frequencies))
}

/// Run every stage. The first failure aborts the run.
pub fn run(
    config: &Config,
    fetcher: &dyn Fetcher,
    tokenizer: &dyn Tokenizer,
    renderer: &dyn Renderer,
) -> Result<PipelineReport> {
    config.validate()?;
    let (text_len, frequencies) = fetch_and_count(config, fetcher, tokenizer)?;

    let output = config.output.path.clone();
    renderer.render(&frequencies.ranked(), &config.cloud, &output)?;

    Ok(PipelineReport {
        text_len,
        word_count: frequencies.total() as usize,
        distinct_words: frequencies.len(),
        output,
    })
}
