//! Error type shared by every pipeline stage.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Any failure aborts the whole run; variants only say which stage broke.
#[derive(Debug, Error)]
pub enum Error {
    /// Stop-word file configured but unreadable.
    #[error("failed to read stop words from {}", path.display())]
    StopWords {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid source url {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Transport failure or non-success HTTP status.
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid content selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    /// The page has no element matching the content selector.
    #[error("no element matching {selector:?} in {url}")]
    ContentNotFound { url: String, selector: String },

    #[error("failed to read config {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Config(String),

    #[error("failed to load font {}: {reason}", path.display())]
    Font { path: PathBuf, reason: String },

    #[error("no font_path configured and no system font found; set cloud.font_path")]
    NoFont,

    /// Nothing left to draw after filtering.
    #[error("no words to render")]
    EmptyCloud,

    #[error("failed to write image {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
