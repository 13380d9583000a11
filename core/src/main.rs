use anyhow::Result;
use docsearch::{logging, Config, SearchClient};
use tracing::debug;

fn main() -> Result<()> {
    logging::init();

    let config = Config::load()?;
    debug!(template = %config.url_template, timeout = ?config.timeout, "configuration loaded");

    let client = SearchClient::new(config);
    let result = client.search_configured()?;
    logging::log_titles(&result);
    Ok(())
}
