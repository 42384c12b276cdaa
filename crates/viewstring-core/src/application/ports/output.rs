//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits describe what the renderer needs from the template engine
//! and the host. The `viewstring-adapters` crate provides implementations.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::context::{ActionContext, HttpContext, ViewContext};
use crate::domain::TempDataMap;
use crate::error::ViewResult;

/// Port for locating views.
///
/// Implemented by:
/// - `viewstring_adapters::engine::MiniJinjaViewEngine`
///
/// Both lookups are plain queries: a miss is a [`ViewEngineResult::NotFound`]
/// carrying the locations that were searched, never an error.
pub trait ViewEngine: Send + Sync {
    /// Resolve `view_path` as a file path, optionally relative to the view
    /// that is currently executing.
    fn get_view(&self, executing_file_path: Option<&str>, view_path: &str) -> ViewEngineResult;

    /// Resolve `view_name` through the engine's configured search locations.
    fn find_view(&self, context: &ActionContext, view_name: &str) -> ViewEngineResult;
}

/// A located, renderable view.
#[async_trait]
pub trait View: Send + Sync {
    /// Root-relative path the view was found at.
    fn path(&self) -> &str;

    /// Render into `context.writer`.
    async fn render(&self, context: &mut ViewContext) -> ViewResult<()>;
}

/// Outcome of a single view lookup.
#[derive(Clone)]
pub enum ViewEngineResult {
    Found {
        view_name: String,
        view: Arc<dyn View>,
    },
    NotFound {
        view_name: String,
        searched_locations: Vec<String>,
    },
}

impl ViewEngineResult {
    pub fn found(view_name: impl Into<String>, view: Arc<dyn View>) -> Self {
        Self::Found {
            view_name: view_name.into(),
            view,
        }
    }

    pub fn not_found(view_name: impl Into<String>, searched_locations: Vec<String>) -> Self {
        Self::NotFound {
            view_name: view_name.into(),
            searched_locations,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn view_name(&self) -> &str {
        match self {
            Self::Found { view_name, .. } | Self::NotFound { view_name, .. } => view_name,
        }
    }

    /// Locations searched by a failed lookup; empty on success.
    pub fn searched_locations(&self) -> &[String] {
        match self {
            Self::Found { .. } => &[],
            Self::NotFound {
                searched_locations, ..
            } => searched_locations,
        }
    }

    pub fn into_view(self) -> Option<Arc<dyn View>> {
        match self {
            Self::Found { view, .. } => Some(view),
            Self::NotFound { .. } => None,
        }
    }
}

impl fmt::Debug for ViewEngineResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { view_name, view } => f
                .debug_struct("Found")
                .field("view_name", view_name)
                .field("path", &view.path())
                .finish(),
            Self::NotFound {
                view_name,
                searched_locations,
            } => f
                .debug_struct("NotFound")
                .field("view_name", view_name)
                .field("searched_locations", searched_locations)
                .finish(),
        }
    }
}

/// Port for the transient key/value store behind [`crate::application::TempData`].
///
/// Implemented by:
/// - `viewstring_adapters::temp_data::InMemoryTempDataProvider`
#[cfg_attr(test, mockall::automock)]
pub trait TempDataProvider: Send + Sync {
    fn load_temp_data(&self, context: &HttpContext) -> ViewResult<TempDataMap>;

    fn save_temp_data(&self, context: &HttpContext, values: TempDataMap) -> ViewResult<()>;
}

/// Port for the host's service registry.
///
/// Implemented by:
/// - `viewstring_adapters::services::ServiceCollection`
/// - [`NoServices`] (nothing registered)
pub trait ServiceProvider: Send + Sync {
    fn get_service(&self, service: TypeId) -> Option<Arc<dyn Any + Send + Sync>>;
}

/// Typed lookup on top of [`ServiceProvider`].
pub trait ServiceProviderExt {
    fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>>;
}

impl<P: ServiceProvider + ?Sized> ServiceProviderExt for P {
    fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.get_service(TypeId::of::<T>())?.downcast::<T>().ok()
    }
}

/// Service provider with nothing registered.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoServices;

impl ServiceProvider for NoServices {
    fn get_service(&self, _service: TypeId) -> Option<Arc<dyn Any + Send + Sync>> {
        None
    }
}
