//! Configuration-driven client for a templated document-search endpoint.
//!
//! # Overview
//! `Config` is read from an env file plus the process environment.
//! `SearchClient` fills the configured URL template with four query
//! parameters, sends one `GET` with a fixed `Accept` header, and decodes the
//! JSON body into a `SearchResult`.
//!
//! # Design
//! - Request building and response parsing are pure (`build_search` /
//!   `parse_search`); only the `Transport` touches the network.
//! - `UreqTransport` is blocking and reuses one agent per client.
//! - Parameters are query-escaped when loaded and again when substituted,
//!   see `config` for why both passes are kept.

pub mod client;
pub mod config;
pub mod encoding;
pub mod error;
pub mod http;
pub mod logging;
pub mod template;
pub mod transport;
pub mod types;

pub use client::SearchClient;
pub use config::Config;
pub use encoding::query_escape;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use template::{TemplateError, UrlTemplate};
pub use transport::{Transport, UreqTransport};
pub use types::{Document, ResultSet, SearchResult};
