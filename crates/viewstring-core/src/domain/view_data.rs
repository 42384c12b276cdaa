//! View data: the model plus everything bound alongside it.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ViewError, ViewResult};

/// Extra values bound next to the model.
pub type ViewDataEntries = BTreeMap<String, Value>;

/// Validation errors keyed by field name.
///
/// Renders outside a request have nothing to validate, so this starts and
/// stays empty unless a caller fills it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelState {
    errors: BTreeMap<String, Vec<String>>,
}

impl ModelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(key.into())
            .or_default()
            .push(message.into());
    }

    pub fn errors(&self, key: &str) -> &[String] {
        self.errors.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The model and its companions, as seen by a view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewData {
    model: Value,
    model_state: ModelState,
    entries: ViewDataEntries,
}

impl ViewData {
    /// Bind a model. Serialization failures are the engine's binding errors
    /// and are passed through unchanged.
    pub fn from_model<M>(model: &M) -> ViewResult<Self>
    where
        M: Serialize + ?Sized,
    {
        let model = serde_json::to_value(model).map_err(ViewError::engine)?;
        Ok(Self::from_value(model))
    }

    pub fn from_value(model: Value) -> Self {
        Self {
            model,
            model_state: ModelState::new(),
            entries: ViewDataEntries::new(),
        }
    }

    pub fn with_entries(mut self, entries: ViewDataEntries) -> Self {
        self.entries.extend(entries);
        self
    }

    pub fn model(&self) -> &Value {
        &self.model
    }

    pub fn model_state(&self) -> &ModelState {
        &self.model_state
    }

    pub fn model_state_mut(&mut self) -> &mut ModelState {
        &mut self.model_state
    }

    pub fn entries(&self) -> &ViewDataEntries {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct Invoice {
        number: u32,
        customer: &'static str,
    }

    #[test]
    fn binds_model_as_json() {
        let data = ViewData::from_model(&Invoice {
            number: 7,
            customer: "ACME",
        })
        .unwrap();

        assert_eq!(data.model(), &json!({"number": 7, "customer": "ACME"}));
        assert!(data.model_state().is_valid());
        assert!(data.entries().is_empty());
    }

    #[test]
    fn unserializable_model_surfaces_serde_error() {
        // JSON object keys must be strings.
        let mut model = HashMap::new();
        model.insert(vec![1u8], "x");

        let err = ViewData::from_model(&model).unwrap_err();
        assert!(err.engine_error::<serde_json::Error>().is_some());
    }

    #[test]
    fn entries_sit_beside_the_model() {
        let mut extra = ViewDataEntries::new();
        extra.insert("title".into(), json!("Receipt"));

        let mut data = ViewData::from_value(json!(null)).with_entries(extra);
        data.insert("year", json!(2026));

        assert_eq!(data.get("title"), Some(&json!("Receipt")));
        assert_eq!(data.get("year"), Some(&json!(2026)));
        assert_eq!(data.model(), &Value::Null);
    }

    #[test]
    fn model_state_tracks_errors() {
        let mut state = ModelState::new();
        state.add_error("email", "required");
        state.add_error("email", "invalid");

        assert!(!state.is_valid());
        assert_eq!(state.errors("email").len(), 2);
        assert_eq!(state.error_count(), 2);
        assert!(state.errors("name").is_empty());
    }
}
