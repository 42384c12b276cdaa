//! Route values and action metadata.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Route values the view engine may use while expanding search locations.
///
/// A synthesized render never has any; the type exists so engines can read
/// `controller` and `area` the same way whether or not a real route ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteData {
    values: BTreeMap<String, String>,
}

impl RouteData {
    pub const CONTROLLER: &'static str = "controller";
    pub const AREA: &'static str = "area";

    /// Create empty route data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a route value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a route value. Empty strings count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn controller(&self) -> Option<&str> {
        self.get(Self::CONTROLLER)
    }

    pub fn area(&self) -> Option<&str> {
        self.get(Self::AREA)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All route values, ordered by key.
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

/// Describes the action a render happens on behalf of.
///
/// Out-of-request renders use the default (no display name).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub display_name: Option<String>,
}

impl ActionDescriptor {
    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
        }
    }
}

impl fmt::Display for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name.as_deref().unwrap_or("<none>"))
    }
}
