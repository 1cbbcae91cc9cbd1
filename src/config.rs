//! Run configuration, loaded from TOML with per-field defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::render::parse_hex_color;
use crate::tokenize::TokenizerKind;

pub const DEFAULT_URL: &str = "https://en.wikipedia.org/wiki/Java_(programming_language)";
pub const DEFAULT_OUTPUT: &str = "wordcloud.png";

/// Where the article comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    /// CSS selector of the main content region.
    pub selector: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            selector: "#bodyContent".to_string(),
            timeout_secs: 30,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Tokenizing and filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub tokenizer: TokenizerKind,
    /// Stop-word file; the embedded list is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_words_path: Option<PathBuf>,
    pub extra_stop_words: Vec<String>,
    pub min_word_len: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerKind::default(),
            stop_words_path: None,
            extra_stop_words: Vec::new(),
            min_word_len: 1,
        }
    }
}

/// Word cloud rendering parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub width: u32,
    pub height: u32,
    /// Empty space kept around every word, in pixels.
    pub padding: u32,
    /// Radius of the circular area words are placed in.
    pub radius: u32,
    /// `#RRGGBB` colors, cycled over words in rank order.
    pub palette: Vec<String>,
    pub background: String,
    pub min_font_size: f32,
    pub max_font_size: f32,
    /// Draw at most this many words; all when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_words: Option<usize>,
    /// TrueType/OpenType font; a common system font is searched for when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            padding: 2,
            radius: 300,
            palette: ["#4055F1", "#408DF1", "#40AAF1", "#40C5F1", "#40D3F1", "#FFFFFF"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            background: "#000000".to_string(),
            min_font_size: 10.0,
            max_font_size: 40.0,
            max_words: None,
            font_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Everything a pipeline run needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub text: TextConfig,
    pub cloud: CloudConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load from a TOML file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: Config = toml::from_str(&data).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Write the default configuration as TOML.
    pub fn write_default(path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(&Config::default())
            .map_err(|e| Error::Config(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("wrote default config to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let cloud = &self.cloud;
        if cloud.width == 0 || cloud.height == 0 {
            return Err(Error::Config("canvas width and height must be non-zero".into()));
        }
        if cloud.radius == 0 {
            return Err(Error::Config("cloud radius must be non-zero".into()));
        }
        if !(cloud.min_font_size > 0.0 && cloud.min_font_size <= cloud.max_font_size) {
            return Err(Error::Config(format!(
                "font sizes must satisfy 0 < min ({}) <= max ({})",
                cloud.min_font_size, cloud.max_font_size
            )));
        }
        if cloud.palette.is_empty() {
            return Err(Error::Config("palette must have at least one color".into()));
        }
        for color in cloud.palette.iter().chain(std::iter::once(&cloud.background)) {
            parse_hex_color(color)?;
        }
        if self.source.selector.trim().is_empty() {
            return Err(Error::Config("content selector must not be empty".into()));
        }
        Ok(())
    }
}
