//! View engine options.
//!
//! Deserializable so hosts can feed them straight from their configuration
//! layer; every field has a default.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::engine::locations;

/// Where views live and how the engine treats them.
///
/// Location formats use positional placeholders: `{0}` is the view name,
/// `{1}` the controller route value, `{2}` the area route value. Missing route
/// values expand to the empty string.
///
/// Every format must end with `view_extension`; the engine rejects options
/// where they disagree. Use [`ViewEngineOptions::with_view_extension`] to
/// change both at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewEngineOptions {
    /// Directory every view path is relative to.
    pub content_root: PathBuf,
    /// Search formats used when the route has no area.
    pub view_location_formats: Vec<String>,
    /// Search formats used when the route names an area.
    pub area_view_location_formats: Vec<String>,
    /// Suffix that marks a view name as a relative path. Also the suffix of
    /// every location format.
    pub view_extension: String,
    /// Treat undefined model fields as render errors.
    pub strict_undefined: bool,
    /// HTML-escape output of views carrying the view extension.
    pub auto_escape: bool,
}

impl Default for ViewEngineOptions {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("."),
            view_location_formats: vec![
                "/Views/{1}/{0}.jinja".into(),
                "/Views/Shared/{0}.jinja".into(),
                "/Pages/Shared/{0}.jinja".into(),
            ],
            area_view_location_formats: vec![
                "/Areas/{2}/Views/{1}/{0}.jinja".into(),
                "/Areas/{2}/Views/Shared/{0}.jinja".into(),
                "/Views/Shared/{0}.jinja".into(),
            ],
            view_extension: ".jinja".into(),
            strict_undefined: true,
            auto_escape: true,
        }
    }
}

impl ViewEngineOptions {
    /// Defaults rooted at `content_root`.
    pub fn rooted_at(content_root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: content_root.into(),
            ..Self::default()
        }
    }

    /// Replace the non-area search formats.
    pub fn with_view_location_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.view_location_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Switch the view extension, rewriting the suffix of every location
    /// format that carried the old one.
    pub fn with_view_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        let old = std::mem::replace(&mut self.view_extension, extension.clone());

        for format in self
            .view_location_formats
            .iter_mut()
            .chain(self.area_view_location_formats.iter_mut())
        {
            if let Some(stem) = format.strip_suffix(old.as_str()) {
                *format = format!("{stem}{extension}");
            }
        }
        self
    }

    /// Formats (area formats included) that do not end with the view
    /// extension.
    pub fn mismatched_formats(&self) -> Vec<&str> {
        self.view_location_formats
            .iter()
            .chain(&self.area_view_location_formats)
            .filter(|format| !locations::is_relative_path(format, &self.view_extension))
            .map(String::as_str)
            .collect()
    }

    pub fn with_strict_undefined(mut self, strict: bool) -> Self {
        self.strict_undefined = strict;
        self
    }

    pub fn with_auto_escape(mut self, auto_escape: bool) -> Self {
        self.auto_escape = auto_escape;
        self
    }
}
