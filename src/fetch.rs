//! Article fetching: download a page and pull the text out of its main
//! content region.

use std::time::Duration;

use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use crate::config::SourceConfig;
use crate::error::{Error, Result};

/// Elements whose text never counts as article content.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript"];

/// Elements that start a new line of text; inline ones join their neighbours.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "caption", "dd", "div", "dl", "dt",
    "figcaption", "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li",
    "main", "nav", "ol", "p", "pre", "section", "table", "tbody", "td", "tfoot", "th", "thead",
    "tr", "ul",
];

/// Retrieves the text of the article named by `url`.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP fetcher backed by reqwest, extracting text with a CSS selector.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    selector: String,
    timeout: Duration,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(source: &SourceConfig) -> Result<Self> {
        // Fail on a bad selector before any network traffic.
        parse_selector(&source.selector)?;
        Ok(Self {
            selector: source.selector.clone(),
            timeout: Duration::from_secs(source.timeout_secs),
            user_agent: source.user_agent.clone(),
        })
    }

    async fn fetch_async(&self, url: &Url) -> Result<String> {
        let to_fetch_error = |source| Error::Fetch {
            url: url.to_string(),
            source,
        };
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(to_fetch_error)?;
        let body = client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(to_fetch_error)?
            .text()
            .await
            .map_err(to_fetch_error)?;
        tracing::debug!(%url, bytes = body.len(), "downloaded page");

        extract_text(&body, &self.selector)?.ok_or_else(|| Error::ContentNotFound {
            url: url.to_string(),
            selector: self.selector.clone(),
        })
    }
}

impl Fetcher for HttpFetcher {
    /// Blocks on a current-thread runtime; the pipeline stays single-threaded.
    fn fetch(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|source| Error::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        rt.block_on(self.fetch_async(&parsed))
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::Selector {
        selector: selector.to_string(),
        reason: format!("{e:?}"),
    })
}

/// Text of the first element matching `selector`, or `None` if nothing
/// matches. Text nodes are concatenated as written, block elements and
/// `<br>` break words, script and style contents are skipped, and
/// whitespace is collapsed.
pub fn extract_text(html: &str, selector: &str) -> Result<Option<String>> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);
    Ok(document.select(&selector).next().map(element_text))
}

fn element_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Node::Text(text) = child.value() {
            out.push_str(text);
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if SKIPPED_ELEMENTS.contains(&name) {
            continue;
        }
        let block = BLOCK_ELEMENTS.contains(&name);
        if block {
            out.push(' ');
        }
        collect_text(child, out);
        if block {
            out.push(' ');
        }
    }
}
