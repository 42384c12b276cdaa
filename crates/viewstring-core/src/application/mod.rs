//! Application layer for viewstring.
//!
//! This layer contains:
//! - **Services**: the [`ViewToStringRenderer`] use case
//! - **Ports**: Interface definitions (traits) for the engine and host collaborators
//! - **Context**: the synthesized request, action and view contexts a render runs in

pub mod context;
pub mod ports;
pub mod services;

pub use context::{ActionContext, HttpContext, TempData, ViewContext};
pub use services::ViewToStringRenderer;

// Re-export port traits (for adapter implementation)
pub use ports::{
    RenderViewToString, ServiceProvider, ServiceProviderExt, TempDataProvider, View, ViewEngine,
    ViewEngineResult,
};
