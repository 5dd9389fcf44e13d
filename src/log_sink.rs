// Tracing subscriber setup for the pricer binary and embedding hosts

use std::str::FromStr;
use std::sync::Once;
use tracing::Level;

use crate::errors::{PricerError, PricerResult};

static INIT: Once = Once::new();

/// Parse a level name such as `info` or `DEBUG`.
pub fn parse_level(level: &str) -> PricerResult<Level> {
    Level::from_str(level.trim())
        .map_err(|_| PricerError::config(format!("unknown log level '{level}'")))
}

/// Install a stderr fmt subscriber at `level`. Later calls only validate the level.
pub fn init(level: &str) -> PricerResult<()> {
    let level = parse_level(level)?;
    INIT.call_once(|| {
        let installed = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
        if installed.is_err() {
            tracing::debug!("Global subscriber already set by host");
        }
    });
    Ok(())
}
