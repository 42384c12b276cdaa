//! viewstring Core - render named views to strings
//!
//! This crate holds the application core of viewstring: the ports a template
//! engine and its host must implement, the context objects a render runs in,
//! and the [`application::ViewToStringRenderer`] service that ties them
//! together outside of any request pipeline.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        host / viewstring-cli            │
//! │  (calls RenderViewToString)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        ViewToStringRenderer             │
//! │  resolve view, synthesize context,      │
//! │  render into an in-memory writer        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │  ViewEngine, View, TempDataProvider,    │
//! │  ServiceProvider                        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   viewstring-adapters (Infrastructure)  │
//! │  MiniJinjaViewEngine, InMemory stores   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use viewstring_core::prelude::*;
//!
//! # async fn run(engine: std::sync::Arc<dyn ViewEngine>,
//! #              temp_data: std::sync::Arc<dyn TempDataProvider>,
//! #              services: std::sync::Arc<dyn ServiceProvider>) -> ViewResult<()> {
//! let renderer = ViewToStringRenderer::new(engine, temp_data, services);
//! let html = renderer
//!     .render_view_to_string("Invoice", &serde_json::json!({ "number": 42 }))
//!     .await?;
//! # let _ = html;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ActionContext, HttpContext, TempData, ViewContext, ViewToStringRenderer,
        ports::{
            NoServices, RenderViewToString, ServiceProvider, ServiceProviderExt, TempDataProvider,
            View, ViewEngine, ViewEngineResult,
        },
    };
    pub use crate::domain::{
        ActionDescriptor, ModelState, RouteData, TempDataMap, ViewData, ViewDataEntries,
        ViewWriter,
    };
    pub use crate::error::{ViewError, ViewResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
