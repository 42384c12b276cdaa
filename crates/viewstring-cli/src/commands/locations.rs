//! `viewstring locations`: show where a view is looked up and which
//! location, if any, holds it.

use serde::Serialize;
use viewstring_adapters::MiniJinjaViewEngine;
use viewstring_core::{
    application::{ViewEngine, ViewEngineResult},
    domain::RouteData,
};

use crate::{
    cli::{LocationsArgs, OutputFormat},
    commands::build_engine,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Candidate {
    location: String,
    exists: bool,
}

pub fn execute(args: LocationsArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let config = config.with_content_root(args.root.content_root);
    let engine = build_engine(&config)?;

    let mut route = RouteData::new();
    if let Some(controller) = args.controller {
        route.insert(RouteData::CONTROLLER, controller);
    }
    if let Some(area) = args.area {
        route.insert(RouteData::AREA, area);
    }

    let candidates = candidates_for(&engine, &route, &args.view);

    if output.format() == OutputFormat::Json {
        output.json(&candidates)?;
        return Ok(());
    }

    output.header(&format!("Locations for '{}':", args.view))?;
    for candidate in &candidates {
        if candidate.exists {
            output.success(&candidate.location)?;
        } else {
            output.miss(&candidate.location)?;
        }
    }
    if !candidates.iter().any(|c| c.exists) {
        output.warning("No location holds this view")?;
    }

    Ok(())
}

/// The direct-path location for path names, else the conventional search
/// list, each marked with whether a view file exists there.
fn candidates_for(engine: &MiniJinjaViewEngine, route: &RouteData, view: &str) -> Vec<Candidate> {
    let locations = match engine.get_view(None, view) {
        ViewEngineResult::Found { view: found, .. } => vec![found.path().to_string()],
        ViewEngineResult::NotFound {
            searched_locations, ..
        } if !searched_locations.is_empty() => searched_locations,
        ViewEngineResult::NotFound { .. } => engine.search_locations(route, view),
    };

    locations
        .into_iter()
        .map(|location| Candidate {
            exists: engine.exists(&location),
            location,
        })
        .collect()
}
