//! Infrastructure adapters for viewstring.
//!
//! This crate implements the ports defined in `viewstring-core::application::ports`.
//! It owns the template engine dependency and all filesystem access.

pub mod engine;
pub mod options;
pub mod services;
pub mod temp_data;

// Re-export commonly used adapters
pub use engine::{MiniJinjaView, MiniJinjaViewEngine};
pub use options::ViewEngineOptions;
pub use services::{ServiceCollection, ViewGlobals};
pub use temp_data::InMemoryTempDataProvider;
