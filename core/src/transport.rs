//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! `Transport` is the only seam that performs I/O. `UreqTransport` builds
//! one `ureq::Agent` up front and reuses it (and its connection pool) for
//! every call. Status codes are returned as data rather than as errors, so
//! the client sees the body of a 4xx/5xx response exactly like a 200. The
//! body is read in full with no size limit, and bytes that are not valid
//! UTF-8 become U+FFFD instead of failing the call.

use std::time::Duration;

use tracing::debug;
use ureq::http::HeaderValue;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a single reusable `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// `timeout` bounds the whole call, connect through body read. `None`
    /// waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let mut builder = match request.method {
            HttpMethod::Get => self.agent.get(&request.url),
        };
        for (name, value) in &request.headers {
            // From bytes so obs-text (0x80 and up) is sent unchanged.
            let value = HeaderValue::from_bytes(value.as_bytes())
                .map_err(|e| ApiError::RequestConstruction(format!("header {name}: {e}")))?;
            builder = builder.header(name.as_str(), value);
        }
        let mut response = builder
            .call()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // No size cap: the whole body is read, however large.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!(status, bytes = body.len(), "received response");
        Ok(HttpResponse::from_bytes(status, headers, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refused_connection_is_a_transport_error() {
        // Bind then drop to get a port nothing is listening on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: format!("http://127.0.0.1:{port}/search"),
            headers: Vec::new(),
            body: None,
        };
        let err = UreqTransport::new(Some(Duration::from_secs(5)))
            .execute(&request)
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "{err}");
    }
}
