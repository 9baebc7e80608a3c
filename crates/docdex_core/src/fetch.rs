//! Page fetcher
//!
//! Fetches a single URL and extracts the visible text from its HTML body.
//! This boundary never fails: transport-level errors are replaced by fixed
//! sentinel strings so a bad link stays visible inline in aggregated output
//! instead of aborting the whole lookup.

use docdex_common::{DocdexError, Result};
use docdex_config::FetchConfig;
use scraper::{ElementRef, Html, Node};
use std::time::Duration;

/// Sentinel emitted when a fetch times out
pub const TIMEOUT_ERROR: &str = "Timeout error";

/// Sentinel emitted when a fetch fails at the transport level
pub const REQUEST_ERROR: &str = "Request error";

/// Subtrees that never contribute visible text.
const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "svg", "iframe"];

/// Elements that introduce a line break in the extracted text.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "li", "tr", "td", "th", "article",
    "section", "main", "blockquote", "pre", "figcaption", "dt", "dd",
];

/// Fetches pages and extracts their text content
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Build a fetcher from configuration
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DocdexError::NetworkError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch a URL and return its extracted text, or a sentinel string
    ///
    /// HTTP error statuses are not failures here: whatever body came back is
    /// still run through text extraction. Only transport failures (timeout,
    /// connection, body read) produce the sentinels.
    pub async fn fetch_text(&self, url: &str) -> String {
        tracing::info!("Fetching URL: {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                tracing::error!("Timeout occurred while fetching URL: {}", url);
                return TIMEOUT_ERROR.to_string();
            }
            Err(e) => {
                tracing::error!("Request error while fetching URL: {} - {}", url, e);
                return REQUEST_ERROR.to_string();
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => {
                tracing::error!("Timeout reading body from URL: {}", url);
                return TIMEOUT_ERROR.to_string();
            }
            Err(e) => {
                tracing::error!("Failed to read body from URL: {} - {}", url, e);
                return REQUEST_ERROR.to_string();
            }
        };

        let text = html_to_text(&body);
        tracing::info!("Successfully fetched and parsed URL: {}", url);
        text
    }
}

/// Parse HTML and extract all visible text
///
/// Script, style, and similar subtrees are skipped; block-level elements
/// introduce line breaks; runs of whitespace collapse. No truncation.
pub fn html_to_text(html: &str) -> String {
    // `Html` is !Send, so parsing stays inside this synchronous scope and is
    // never held across an await.
    let doc = Html::parse_document(html);
    let mut buf = String::new();
    collect_text(&doc.root_element(), &mut buf);
    collapse_whitespace(&buf)
}

/// Recursively collect text, skipping non-visible subtrees
fn collect_text(node: &ElementRef<'_>, buf: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => {
                buf.push_str(text);
            }
            Node::Element(el) => {
                let tag = el.name();
                if SKIP_TAGS.contains(&tag) {
                    continue;
                }
                if BLOCK_TAGS.contains(&tag) {
                    buf.push('\n');
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(&child_ref, buf);
                }
            }
            _ => {}
        }
    }
}

/// Collapse whitespace runs into single spaces / double newlines and trim
fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_space = true;
    let mut consecutive_newlines = 0u32;

    for ch in text.chars() {
        if ch == '\n' {
            consecutive_newlines += 1;
            if consecutive_newlines <= 2 {
                result.push('\n');
            }
            prev_was_space = true;
        } else if ch.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
            consecutive_newlines = 0;
        } else {
            result.push(ch);
            prev_was_space = false;
            consecutive_newlines = 0;
        }
    }

    result.trim().to_string()
}
