//! CLI error type and its user-facing rendering.
//!
//! Library errors arrive as [`ViewError`] and are wrapped, not rewritten, so
//! the not-found message keeps its exact location listing.

use std::error::Error as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use viewstring_core::error::{ErrorCategory as CoreCategory, ViewError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Model file {path} is not valid JSON")]
    InvalidModel {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Core(#[from] ViewError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::InvalidModel { path, .. } => vec![
                format!("Validate the model: jq . {}", path.display()),
                "The model must be a single JSON document".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Show the effective configuration: viewstring config list".into(),
                "Show the default config file location: viewstring config path".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::InvalidModel { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Rendering => ErrorCategory::UserError,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));

        for line in self.to_string().lines() {
            output.push_str(&format!("  {}\n", line.red()));
        }

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

/// Attach a human message to a fallible operation.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, ViewError> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| match e {
            ViewError::Configuration { message } => {
                let context: String = f().into();
                CliError::ConfigError {
                    message: format!("{context}: {message}"),
                    source: None,
                }
            }
            other => CliError::Core(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn not_found() -> CliError {
        CliError::Core(ViewError::ViewNotFound {
            view_name: "Invoice".into(),
            searched_locations: vec![
                "/Views//Invoice.jinja".into(),
                "/Views/Shared/Invoice.jinja".into(),
            ],
        })
    }

    #[test]
    fn not_found_keeps_core_message() {
        assert_eq!(
            not_found().to_string(),
            "Unable to find view 'Invoice'. The following locations were searched:\n\
             /Views//Invoice.jinja\n\
             /Views/Shared/Invoice.jinja"
        );
    }

    #[test]
    fn exit_codes_follow_category() {
        assert_eq!(not_found().exit_code(), 3);

        let render = CliError::Core(ViewError::engine(io::Error::other("bad template")));
        assert_eq!(render.exit_code(), 2);

        let config = CliError::ConfigError {
            message: "x".into(),
            source: None,
        };
        assert_eq!(config.exit_code(), 4);

        let io_err: CliError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(io_err.exit_code(), 1);

        assert_eq!(CliError::Core(ViewError::StoreLock).exit_code(), 1);
    }

    #[test]
    fn invalid_model_is_user_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CliError::InvalidModel {
            path: "model.json".into(),
            source,
        };
        assert_eq!(err.category(), ErrorCategory::UserError);
        assert!(err.suggestions().iter().any(|s| s.contains("model.json")));
    }

    #[test]
    fn plain_format_lists_every_location_and_suggestions() {
        let text = not_found().format_plain(false);
        assert!(text.contains("/Views/Shared/Invoice.jinja"));
        assert!(text.contains("Suggestions:"));
        assert!(text.contains("--verbose"));
    }

    #[test]
    fn verbose_plain_format_shows_causes() {
        let err = CliError::IoError {
            message: "Failed to write out.html".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let text = err.format_plain(true);
        assert!(text.contains("Caused by: denied"));
        assert!(!text.contains("--verbose"));
    }

    #[test]
    fn engine_configuration_becomes_config_error() {
        let result: Result<(), ViewError> = Err(ViewError::Configuration {
            message: "content root './nope' is not a directory".into(),
        });
        let err = result.with_cli_context(|| "Cannot build view engine").unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
        assert!(err.to_string().contains("Cannot build view engine"));
    }

    #[test]
    fn io_context_is_kept() {
        let result: Result<(), io::Error> = Err(io::Error::other("boom"));
        let err = result.with_cli_context(|| "Failed to read model").unwrap_err();
        assert_eq!(err.to_string(), "I/O error: Failed to read model");
    }
}
