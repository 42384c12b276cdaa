//! Driving (input) ports - implemented by application services.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ViewResult;

/// Render a named view with a model into a string.
///
/// Implemented by [`crate::application::ViewToStringRenderer`].
#[async_trait]
pub trait RenderViewToString: Send + Sync {
    /// Locate `view_name`, bind `model`, and return the complete output.
    ///
    /// Fails with [`crate::error::ViewError::ViewNotFound`] when no view
    /// matches; engine failures are returned unchanged.
    async fn render_view_to_string<M>(&self, view_name: &str, model: &M) -> ViewResult<String>
    where
        M: Serialize + Sync + ?Sized;
}
