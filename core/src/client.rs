//! Search request builder, response parser and the round-trip between them.
//!
//! # Design
//! `SearchClient` owns its `Config` and a `Transport`. `build_search` and
//! `parse_search` are pure: the first turns four parameters into an
//! `HttpRequest`, the second turns an `HttpResponse` into a `SearchResult`.
//! `search` wires them together through the transport. The client holds no
//! mutable state, so repeated calls with the same inputs send the same
//! request.

use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::encoding::query_escape;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::template::UrlTemplate;
use crate::transport::{Transport, UreqTransport};
use crate::types::SearchResult;

pub struct SearchClient<T = UreqTransport> {
    config: Config,
    transport: T,
}

impl SearchClient<UreqTransport> {
    /// Client over the default ureq transport, honoring `config.timeout`.
    pub fn new(config: Config) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self { config, transport }
    }
}

impl<T: Transport> SearchClient<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the GET request for one search.
    ///
    /// Each argument is query-escaped and substituted into the template in
    /// the order query, source, size, offset.
    pub fn build_search(
        &self,
        query: &str,
        source: &str,
        size: &str,
        offset: &str,
    ) -> Result<HttpRequest, ApiError> {
        let template = UrlTemplate::parse(&self.config.url_template)?;
        let escaped: Vec<String> = [query, source, size, offset]
            .iter()
            .map(|param| query_escape(param))
            .collect();
        let args: Vec<&str> = escaped.iter().map(String::as_str).collect();
        let formatted = template.render(&args)?;

        let url = Url::parse(&formatted)
            .map_err(|e| ApiError::RequestConstruction(format!("{formatted:?}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::RequestConstruction(format!(
                "unsupported scheme {:?}",
                url.scheme()
            )));
        }
        if !is_valid_header_value(&self.config.accept) {
            return Err(ApiError::RequestConstruction(format!(
                "invalid Accept value {:?}",
                self.config.accept
            )));
        }

        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: url.into(),
            headers: vec![("Accept".to_string(), self.config.accept.clone())],
            body: None,
        })
    }

    /// Decode a response body into a `SearchResult`.
    ///
    /// The status code is not interpreted; only the first JSON value in the
    /// body is read.
    pub fn parse_search(&self, response: HttpResponse) -> Result<SearchResult, ApiError> {
        if !response.is_success() {
            warn!(status = response.status, "search returned non-success status");
        }
        let mut de = serde_json::Deserializer::from_str(&response.body);
        SearchResult::deserialize(&mut de).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub fn search(
        &self,
        query: &str,
        source: &str,
        size: &str,
        offset: &str,
    ) -> Result<SearchResult, ApiError> {
        let request = self.build_search(query, source, size, offset)?;
        let response = self.transport.execute(&request)?;
        let result = self.parse_search(response)?;
        debug!(documents = result.documents().len(), "search decoded");
        Ok(result)
    }

    /// Run `search` with the parameters loaded into the config.
    pub fn search_configured(&self) -> Result<SearchResult, ApiError> {
        let Config {
            query,
            source,
            size,
            offset,
            ..
        } = &self.config;
        self.search(query, source, size, offset)
    }
}

/// Anything but control characters; tab is allowed. Bytes from 0x80 up
/// are obs-text and pass.
fn is_valid_header_value(value: &str) -> bool {
    value.bytes().all(|b| b == b'\t' || !(b < 0x20 || b == 0x7f))
}
