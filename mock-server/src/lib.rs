use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Response header carrying the `q` parameter as the server decoded it.
pub const QUERY_ECHO_HEADER: &str = "x-search-query";

const DEFAULT_SIZE: usize = 10;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub summary: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchBody {
    pub result: SearchResultSet,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResultSet {
    pub document: Vec<Document>,
}

/// A catalog record: a document plus the source it is filed under.
#[derive(Clone, Debug)]
pub struct Entry {
    pub source: String,
    pub document: Document,
}

impl Entry {
    pub fn new(source: &str, title: &str, summary: &str) -> Self {
        Self {
            source: source.to_string(),
            document: Document {
                title: title.to_string(),
                summary: summary.to_string(),
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub offset: String,
}

pub type Catalog = Arc<Vec<Entry>>;

pub fn default_catalog() -> Vec<Entry> {
    vec![
        Entry::new("news", "Rust 1.80 released", "Release notes for the 1.80 toolchain"),
        Entry::new("news", "Async closures stabilized", "What changes for async code"),
        Entry::new("docs", "The Cargo Book", "Guide to the Rust package manager"),
        Entry::new("docs", "Error handling in Rust", "Result, the ? operator and error crates"),
        Entry::new("blog", "Writing a search client", "A small blocking HTTP client with ureq"),
        Entry::new("blog", "a+b is not a b", "Notes on query-string escaping"),
    ]
}

pub fn app() -> Router {
    app_with(default_catalog())
}

pub fn app_with(entries: Vec<Entry>) -> Router {
    let catalog: Catalog = Arc::new(entries);
    Router::new()
        .route("/search", get(search))
        .route("/fixtures/{name}", get(fixture))
        .with_state(catalog)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn search(State(catalog): State<Catalog>, Query(params): Query<SearchParams>) -> Response {
    let Some(size) = parse_count(&params.size, DEFAULT_SIZE) else {
        return (StatusCode::BAD_REQUEST, format!("invalid size {:?}", params.size)).into_response();
    };
    let Some(offset) = parse_count(&params.offset, 0) else {
        return (StatusCode::BAD_REQUEST, format!("invalid offset {:?}", params.offset))
            .into_response();
    };

    let needle = params.q.to_lowercase();
    let document = catalog
        .iter()
        .filter(|e| params.src.is_empty() || e.source == params.src)
        .filter(|e| {
            needle.is_empty()
                || e.document.title.to_lowercase().contains(&needle)
                || e.document.summary.to_lowercase().contains(&needle)
        })
        .skip(offset)
        .take(size)
        .map(|e| e.document.clone())
        .collect();

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&params.q) {
        headers.insert(QUERY_ECHO_HEADER, value);
    }
    (
        headers,
        Json(SearchBody {
            result: SearchResultSet { document },
        }),
    )
        .into_response()
}

/// Canned bodies for exercising client decode paths.
async fn fixture(Path(name): Path<String>) -> Response {
    let body = match name.as_str() {
        "truncated" => r#"{"result":{"document":[{"title":"Cut"#,
        "empty" => "",
        "wrong-shape" => r#"{"result":{"document":"nope"}}"#,
        "no-documents" => r#"{"result":{"document":[]}}"#,
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Empty means `default`; anything else must be a non-negative integer.
fn parse_count(raw: &str, default: usize) -> Option<usize> {
    if raw.is_empty() {
        return Some(default);
    }
    raw.parse().ok()
}
