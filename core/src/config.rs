//! Environment-driven configuration.
//!
//! # Design
//! Settings come from the process environment after an env file has been
//! loaded into it. The env file is the only hard requirement: if it cannot
//! be read, loading fails with `ConfigError::EnvFile` before any request is
//! built. Individual variables that are missing read as empty strings.
//!
//! The four search parameters are query-escaped here, at load time. The
//! client escapes them a second time when it fills the URL template, so a
//! value like `a b` reaches the wire as `a%2Bb`. Servers this client talks
//! to expect that form, so the double escape is kept.

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::encoding::query_escape;
use crate::error::ConfigError;

pub const DEFAULT_ENV_FILE: &str = ".env";

pub const URL_TEMPLATE: &str = "URL_TEMPLATE";
pub const ACCEPT_HEADER: &str = "ACCEPT_HEADER";
pub const Q_PARAM: &str = "Q_PARAM";
pub const SRC_PARAM: &str = "SRC_PARAM";
pub const SIZE_PARAM: &str = "SIZE_PARAM";
pub const OFFSET_PARAM: &str = "OFFSET_PARAM";
pub const TIMEOUT_SECS: &str = "TIMEOUT_SECS";

/// Immutable settings for one `SearchClient`.
///
/// `query`, `source`, `size` and `offset` hold already-escaped values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub url_template: String,
    pub accept: String,
    pub query: String,
    pub source: String,
    pub size: String,
    pub offset: String,
    /// `None` lets a request block for as long as the server takes.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Load `.env` from the working directory, then read the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_ENV_FILE)
    }

    /// Load a specific env file, then read the environment. Variables that
    /// are already set in the process are left untouched.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        dotenvy::from_path(path).map_err(|source| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded env file");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();

        Ok(Self {
            url_template: get(URL_TEMPLATE),
            accept: get(ACCEPT_HEADER),
            query: query_escape(&get(Q_PARAM)),
            source: query_escape(&get(SRC_PARAM)),
            size: query_escape(&get(SIZE_PARAM)),
            offset: query_escape(&get(OFFSET_PARAM)),
            timeout: parse_timeout(&get(TIMEOUT_SECS))?,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Option<Duration>, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_all_six_settings() {
        let config = Config::from_lookup(lookup(&[
            (URL_TEMPLATE, "http://h/?q=%s&src=%s&size=%s&offset=%s"),
            (ACCEPT_HEADER, "application/json"),
            (Q_PARAM, "rust"),
            (SRC_PARAM, "news"),
            (SIZE_PARAM, "10"),
            (OFFSET_PARAM, "0"),
        ]))
        .unwrap();
        assert_eq!(config.url_template, "http://h/?q=%s&src=%s&size=%s&offset=%s");
        assert_eq!(config.accept, "application/json");
        assert_eq!(config.query, "rust");
        assert_eq!(config.source, "news");
        assert_eq!(config.size, "10");
        assert_eq!(config.offset, "0");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn parameters_are_escaped_on_load() {
        let config = Config::from_lookup(lookup(&[(Q_PARAM, "a b"), (SRC_PARAM, "x&y")])).unwrap();
        assert_eq!(config.query, "a+b");
        assert_eq!(config.source, "x%26y");
    }

    #[test]
    fn template_and_accept_are_not_escaped() {
        let config = Config::from_lookup(lookup(&[
            (URL_TEMPLATE, "http://h/ ?q=%s"),
            (ACCEPT_HEADER, "text/json; q=0.9"),
        ]))
        .unwrap();
        assert_eq!(config.url_template, "http://h/ ?q=%s");
        assert_eq!(config.accept, "text/json; q=0.9");
    }

    #[test]
    fn missing_variables_are_empty() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn timeout_parsing() {
        let config = Config::from_lookup(lookup(&[(TIMEOUT_SECS, " 5 ")])).unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));

        let config = Config::from_lookup(lookup(&[(TIMEOUT_SECS, "")])).unwrap();
        assert_eq!(config.timeout, None);

        for bad in ["0", "-1", "1.5", "soon"] {
            let err = Config::from_lookup(lookup(&[(TIMEOUT_SECS, bad)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTimeout(ref v) if v == bad), "{bad}");
        }
    }

    #[test]
    fn missing_env_file_is_a_config_error() {
        let err = Config::load_from("/nonexistent/docsearch/.env").unwrap_err();
        match err {
            ConfigError::EnvFile { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/docsearch/.env"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
