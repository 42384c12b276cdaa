//! Application services - orchestrate use cases.

pub mod view_renderer;

pub use view_renderer::ViewToStringRenderer;
