//! Application ports (traits) for external dependencies.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by the renderer, implemented by infrastructure
//!   - `ViewEngine` / `View`: view lookup and rendering
//!   - `TempDataProvider`: transient key/value backing store
//!   - `ServiceProvider`: host service registry
//!
//! - **Driving (Input) Ports**: Called by the host, implemented by services
//!   - `RenderViewToString`

pub mod input;
pub mod output;

pub use input::RenderViewToString;
pub use output::{
    NoServices, ServiceProvider, ServiceProviderExt, TempDataProvider, View, ViewEngine,
    ViewEngineResult,
};

#[cfg(test)]
pub use output::MockTempDataProvider;
