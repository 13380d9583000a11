//! Response DTOs for the search endpoint.
//!
//! # Design
//! The wire shape is `{"result": {"document": [{"title", "summary"}]}}`.
//! Decoding is deliberately loose so that any body a Go `encoding/json`
//! client accepts is accepted here too:
//! - keys match ASCII case-insensitively (`Result`, `DOCUMENT`, `Title`);
//!   when a key repeats, the last one wins;
//! - a missing key or an explicit `null` leaves the field at its default;
//! - unknown keys are skipped.
//!
//! A key holding the wrong JSON type is still an error. The mock-server
//! defines its own copy of these types and the integration tests catch any
//! drift between the two.

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Decoded body of a search response.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SearchResult {
    pub result: ResultSet,
}

/// The nested `result` object holding the documents in server order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ResultSet {
    #[serde(rename = "document")]
    pub documents: Vec<Document>,
}

/// A single search hit.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub summary: String,
}

impl SearchResult {
    pub fn documents(&self) -> &[Document] {
        &self.result.documents
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.result.documents.iter().map(|d| d.title.as_str())
    }
}

/// Decodes `null` as `T::default()`.
struct NullAsDefault<T>(T);

impl<'de, T> Deserialize<'de> for NullAsDefault<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|v| NullAsDefault(v.unwrap_or_default()))
    }
}

fn next_or_default<'de, A, T>(map: &mut A) -> Result<T, A::Error>
where
    A: MapAccess<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(map.next_value::<NullAsDefault<T>>()?.0)
}

impl<'de> Deserialize<'de> for SearchResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SearchResultVisitor;

        impl<'de> Visitor<'de> for SearchResultVisitor {
            type Value = SearchResult;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a search response object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SearchResult, A::Error> {
                let mut out = SearchResult::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case("result") {
                        out.result = next_or_default(&mut map)?;
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(SearchResultVisitor)
    }
}

impl<'de> Deserialize<'de> for ResultSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ResultSetVisitor;

        impl<'de> Visitor<'de> for ResultSetVisitor {
            type Value = ResultSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a result object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ResultSet, A::Error> {
                let mut out = ResultSet::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case("document") {
                        // A `null` element is an empty document.
                        let docs: Vec<NullAsDefault<Document>> = next_or_default(&mut map)?;
                        out.documents = docs.into_iter().map(|d| d.0).collect();
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(ResultSetVisitor)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = Document;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a document object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Document, A::Error> {
                let mut out = Document::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case("title") {
                        out.title = next_or_default(&mut map)?;
                    } else if key.eq_ignore_ascii_case("summary") {
                        out.summary = next_or_default(&mut map)?;
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}
