//! Google Translate backend over the public `gtx` endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::Value;

use super::Translator;
use crate::error::{Error, Result};

/// Blocking client for the free Google Translate endpoint.
///
/// Requests are not retried; any failure is reported as
/// [`Error::TranslationService`].
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
}

impl GoogleTranslator {
    /// Default endpoint.
    pub const DEFAULT_URL: &'static str = "https://translate.googleapis.com/translate_a/single";

    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a translator for the default endpoint.
    pub fn new() -> Result<Self> {
        Self::with_config(Self::DEFAULT_URL, Self::DEFAULT_TIMEOUT)
    }

    /// Create a translator for a custom endpoint and timeout.
    pub fn with_config(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rtlpdf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::TranslationService(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn request_url(&self, text: &str, source: &str, target: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.base_url,
            &[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| Error::TranslationService(format!("Invalid URL {}: {}", self.base_url, e)))
    }
}

impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "google"
    }

    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let url = self.request_url(text, source, target)?;
        log::debug!("Requesting translation of {} chars", text.chars().count());

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::TranslationService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::TranslationService(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .map_err(|e| Error::TranslationService(e.to_string()))?;
        parse_response(&body)
    }
}

/// Concatenate the translated segments of a `translate_a/single` reply.
///
/// The reply is a nested array whose first element lists
/// `[translated, original, ...]` segments.
fn parse_response(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| Error::TranslationService(format!("Malformed reply: {}", e)))?;

    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::TranslationService("Reply has no segments".to_string()))?;

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect())
}
