//! Command handlers, one module per subcommand.

pub mod config;
pub mod locations;
pub mod render;

use tracing::debug;
use viewstring_adapters::MiniJinjaViewEngine;

use crate::{
    config::AppConfig,
    error::{CliResult, IntoCli},
};

/// Build the view engine from the effective configuration.
pub(crate) fn build_engine(config: &AppConfig) -> CliResult<MiniJinjaViewEngine> {
    let engine = MiniJinjaViewEngine::new(config.engine.clone())
        .with_cli_context(|| "Cannot build view engine")?;
    debug!(content_root = %engine.content_root().display(), "View engine ready");
    Ok(engine)
}
