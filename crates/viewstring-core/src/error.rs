//! Unified error handling for viewstring core.
//!
//! Rendering has exactly one error of its own: the view could not be found.
//! Everything the template engine raises travels through [`ViewError::Engine`]
//! untouched, so callers can downcast to the engine's concrete error type.

use thiserror::Error;

/// Root error type for view resolution and rendering.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Neither direct path lookup nor conventional search located the view.
    #[error("{}", not_found_message(.view_name, .searched_locations))]
    ViewNotFound {
        view_name: String,
        /// Every searched location, direct-path lookups first, in search order.
        searched_locations: Vec<String>,
    },

    /// Failure raised inside the template engine or a collaborator.
    #[error(transparent)]
    Engine(Box<dyn std::error::Error + Send + Sync + 'static>),

    /// An in-memory adapter's lock was poisoned.
    #[error("View store lock poisoned")]
    StoreLock,

    /// Adapter construction or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ViewError {
    /// Wrap an engine or collaborator error without altering it.
    pub fn engine(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Engine(Box::new(err))
    }

    /// Borrow the wrapped engine error as a concrete type.
    pub fn engine_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Engine(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ViewNotFound { view_name, .. } => vec![
                format!("No view named '{}' exists in the searched locations", view_name),
                "Check the content root and the view location formats".into(),
                "Or pass an explicit path such as /Views/Shared/Name.jinja".into(),
            ],
            Self::Engine(_) => vec![
                "The template failed to render with the supplied model".into(),
                "Check that the model has every field the template reads".into(),
            ],
            Self::StoreLock => vec![
                "A shared store was poisoned by an earlier panic".into(),
                "Restart the process".into(),
            ],
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ViewNotFound { .. } => ErrorCategory::NotFound,
            Self::Engine(_) => ErrorCategory::Rendering,
            Self::StoreLock => ErrorCategory::Internal,
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }
}

fn not_found_message(view_name: &str, searched_locations: &[String]) -> String {
    std::iter::once(format!(
        "Unable to find view '{view_name}'. The following locations were searched:"
    ))
    .chain(searched_locations.iter().cloned())
    .collect::<Vec<_>>()
    .join("\n")
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Rendering,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ViewResult<T> = Result<T, ViewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_lists_locations_in_order() {
        let err = ViewError::ViewNotFound {
            view_name: "Invoice".into(),
            searched_locations: vec![
                "/Views//Invoice.jinja".into(),
                "/Views/Shared/Invoice.jinja".into(),
            ],
        };

        assert_eq!(
            err.to_string(),
            "Unable to find view 'Invoice'. The following locations were searched:\n\
             /Views//Invoice.jinja\n\
             /Views/Shared/Invoice.jinja"
        );
    }

    #[test]
    fn not_found_without_locations_is_header_only() {
        let err = ViewError::ViewNotFound {
            view_name: "x".into(),
            searched_locations: vec![],
        };
        assert_eq!(
            err.to_string(),
            "Unable to find view 'x'. The following locations were searched:"
        );
    }

    #[test]
    fn engine_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad template");
        let err = ViewError::engine(io);

        assert_eq!(err.to_string(), "bad template");
        assert_eq!(
            err.engine_error::<std::io::Error>().map(|e| e.kind()),
            Some(std::io::ErrorKind::InvalidData)
        );
        assert_eq!(err.category(), ErrorCategory::Rendering);
    }

    #[test]
    fn categories() {
        assert_eq!(ViewError::StoreLock.category(), ErrorCategory::Internal);
        assert_eq!(
            ViewError::Configuration {
                message: "x".into()
            }
            .category(),
            ErrorCategory::Configuration
        );
        assert!(!ViewError::StoreLock.suggestions().is_empty());
    }
}
