//! HTTP client for the zxing.org online decoder
//!
//! The service answers with an HTML page; the decoded text sits in the
//! table cell right after the one labelled "Parsed Result".

use super::{RenderOptions, SymbolDecoder, check_grid_size, render_png};
use crate::error::DecodeError;
use crate::models::BitMatrix;
use log::debug;
use reqwest::blocking::Client;
use reqwest::blocking::multipart::{Form, Part};
use scraper::{Html, Selector};
use std::time::Duration;

/// Public zxing.org decode endpoint
pub const DEFAULT_ENDPOINT: &str = "https://zxing.org/w/decode";

/// Label of the result row in the response table
const RESULT_LABEL: &str = "Parsed Result";

/// Connection settings for [`ZxingClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZxingConfig {
    /// Decode endpoint receiving the multipart upload
    pub endpoint: String,
    /// Whole-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// How the grid is drawn before upload
    pub render: RenderOptions,
}

impl Default for ZxingConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            render: RenderOptions::default(),
        }
    }
}

/// Blocking client posting rendered grids to a zxing-compatible endpoint
pub struct ZxingClient {
    config: ZxingConfig,
    http: Client,
}

impl ZxingClient {
    /// Build a client; fails only if the TLS backend cannot initialize
    pub fn new(config: ZxingConfig) -> Result<Self, DecodeError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    /// Active settings
    pub fn config(&self) -> &ZxingConfig {
        &self.config
    }
}

impl SymbolDecoder for ZxingClient {
    fn decode(&self, grid: &BitMatrix) -> Result<String, DecodeError> {
        check_grid_size(grid.width(), grid.height())?;

        // Rendered in memory; nothing touches the filesystem
        let png = render_png(grid, &self.config.render)?;
        debug!(
            "DECODE: posting {}x{} grid ({} bytes) to {}",
            grid.width(),
            grid.height(),
            png.len(),
            self.config.endpoint
        );

        let part = Part::bytes(png).file_name("qr.png").mime_str("image/png")?;
        let form = Form::new().part("f", part);
        let response = self
            .http
            .post(&self.config.endpoint)
            .multipart(form)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(DecodeError::Status(status.as_u16()));
        }
        let html = response.text()?;
        parse_parsed_result(&html)
    }
}

fn selector(css: &str) -> Result<Selector, DecodeError> {
    Selector::parse(css).map_err(|_| DecodeError::MissingResult)
}

/// Extract the text of the cell following the "Parsed Result" label cell
///
/// The payload is returned exactly as the page renders it, surrounding
/// whitespace included. Only the label is compared trimmed. The first
/// matching row wins.
pub fn parse_parsed_result(html: &str) -> Result<String, DecodeError> {
    let document = Html::parse_document(html);
    let rows = selector("tr")?;
    let cells = selector("td")?;

    for row in document.select(&rows) {
        let mut texts = row.select(&cells).map(|cell| cell.text().collect::<String>());
        if texts.by_ref().any(|t| t.trim() == RESULT_LABEL) {
            if let Some(value) = texts.next() {
                return Ok(value);
            }
        }
    }

    Err(DecodeError::MissingResult)
}
