//! `viewstring render`: resolve a view, bind a JSON model, emit the string.

use std::{
    fs,
    io::{self, Read},
    path::Path,
    sync::Arc,
};

use serde_json::{Map, Value};
use tracing::{info, instrument};
use viewstring_adapters::{InMemoryTempDataProvider, ServiceCollection, ViewGlobals};
use viewstring_core::{
    application::{RenderViewToString, ViewToStringRenderer},
    domain::TempDataMap,
};

use crate::{
    cli::RenderArgs,
    commands::build_engine,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Render `args.view` and write it to stdout or `--out`.
#[instrument(skip_all, fields(view = %args.view))]
pub async fn execute(args: RenderArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    if args.view.trim().is_empty() {
        return Err(CliError::InvalidInput {
            message: "view name must not be empty".into(),
            source: None,
        });
    }

    let model = match args.model.as_deref() {
        Some(path) => read_model(path)?,
        None => Value::Object(Map::new()),
    };

    let config = config.with_content_root(args.root.content_root);
    let renderer = build_renderer(&config)?;

    let rendered = renderer.render_view_to_string(&args.view, &model).await?;
    info!(bytes = rendered.len(), "View rendered");

    match args.out {
        Some(path) => {
            fs::write(&path, &rendered)
                .with_cli_context(|| format!("Failed to write {}", path.display()))?;
            output.success(&format!(
                "Wrote {} bytes to {}",
                rendered.len(),
                path.display()
            ))?;
        }
        None => output.content(&rendered)?,
    }

    Ok(())
}

/// Wire the renderer the way a host application would: engine, temp-data
/// store seeded from config, and a service collection carrying the globals.
pub(crate) fn build_renderer(config: &AppConfig) -> CliResult<ViewToStringRenderer> {
    let engine = build_engine(config)?;

    let seed: TempDataMap = config
        .temp_data
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let temp_data = InMemoryTempDataProvider::with_values(seed);

    let services =
        ServiceCollection::new().with_service(ViewGlobals::from(config.globals.clone()));

    Ok(ViewToStringRenderer::new(
        Arc::new(engine),
        Arc::new(temp_data),
        Arc::new(services),
    ))
}

/// Read a JSON model from a file, or from stdin when the path is `-`.
fn read_model(path: &Path) -> CliResult<Value> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .with_cli_context(|| "Failed to read model from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read model {}", path.display()))?
    };

    serde_json::from_str(&text).map_err(|source| CliError::InvalidModel {
        path: path.to_path_buf(),
        source,
    })
}
