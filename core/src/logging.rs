//! Log setup for the `docsearch` binary.
//!
//! Everything goes through `tracing` to stderr. `RUST_LOG` picks the level,
//! `info` by default. Titles are the program's output, so they use their own
//! target and stay enabled whatever `RUST_LOG` says.

use tracing::info;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::types::SearchResult;

/// Target that carries one event per document title.
pub const TITLE_TARGET: &str = "docsearch::titles";

/// Filter built from a `RUST_LOG`-style spec, with the title target forced
/// on. An unparsable spec falls back to `info`.
pub fn env_filter(spec: Option<&str>) -> EnvFilter {
    let filter = spec
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    match format!("{TITLE_TARGET}=info").parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

pub fn init() {
    let spec = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(spec.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Log each title, one event per document, in response order.
pub fn log_titles(result: &SearchResult) {
    for title in result.titles() {
        info!(target: TITLE_TARGET, "{title}");
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_titles(spec: Option<&str>) -> String {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter(spec))
            .with_writer(capture.clone())
            .with_ansi(false)
            .finish();
        let result: SearchResult = serde_json::from_str(
            r#"{"result":{"document":[{"title":"T1"},{"title":"T2"}]}}"#,
        )
        .unwrap();

        tracing::subscriber::with_default(subscriber, || {
            log_titles(&result);
            info!("other info event");
        });
        capture.contents()
    }

    #[test]
    fn titles_survive_a_warn_filter() {
        let out = capture_titles(Some("warn"));
        let t1 = out.find("T1").unwrap();
        let t2 = out.find("T2").unwrap();
        assert!(t1 < t2, "{out}");
        assert!(!out.contains("other info event"), "{out}");
    }

    #[test]
    fn titles_survive_off() {
        let out = capture_titles(Some("off"));
        assert!(out.contains("T1") && out.contains("T2"), "{out}");
    }

    #[test]
    fn default_filter_is_info() {
        let out = capture_titles(None);
        assert!(out.contains("T1"), "{out}");
        assert!(out.contains("other info event"), "{out}");
    }
}
