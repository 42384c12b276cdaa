//! Context objects a view sees while it renders.
//!
//! Outside a request pipeline there is no inbound request, so everything here
//! is synthesized: a request context that only carries the host's services,
//! empty route data, a default action descriptor, and temp data bound to the
//! host's provider.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::application::ports::{ServiceProvider, TempDataProvider};
use crate::domain::{ActionDescriptor, RouteData, TempDataMap, ViewData, ViewWriter};
use crate::error::ViewResult;

/// Synthetic request context.
#[derive(Clone)]
pub struct HttpContext {
    request_services: Arc<dyn ServiceProvider>,
    trace_identifier: Uuid,
    items: BTreeMap<String, Value>,
}

impl HttpContext {
    /// A fresh context over the given services, with its own trace identifier.
    pub fn new(request_services: Arc<dyn ServiceProvider>) -> Self {
        Self {
            request_services,
            trace_identifier: Uuid::new_v4(),
            items: BTreeMap::new(),
        }
    }

    pub fn request_services(&self) -> &Arc<dyn ServiceProvider> {
        &self.request_services
    }

    pub fn trace_identifier(&self) -> Uuid {
        self.trace_identifier
    }

    /// Per-render scratch values shared between collaborators.
    pub fn items(&self) -> &BTreeMap<String, Value> {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut BTreeMap<String, Value> {
        &mut self.items
    }
}

impl fmt::Debug for HttpContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpContext")
            .field("trace_identifier", &self.trace_identifier)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

/// Everything known about the action a view renders for.
#[derive(Debug, Clone)]
pub struct ActionContext {
    pub http_context: HttpContext,
    pub route_data: RouteData,
    pub action_descriptor: ActionDescriptor,
}

impl ActionContext {
    pub fn new(
        http_context: HttpContext,
        route_data: RouteData,
        action_descriptor: ActionDescriptor,
    ) -> Self {
        Self {
            http_context,
            route_data,
            action_descriptor,
        }
    }

    /// Context for a render with no inbound request: empty route data and a
    /// default action descriptor.
    pub fn synthesized(request_services: Arc<dyn ServiceProvider>) -> Self {
        Self::new(
            HttpContext::new(request_services),
            RouteData::new(),
            ActionDescriptor::default(),
        )
    }
}

/// Transient key/value store, loaded from its provider on first access.
///
/// Reading a key with [`TempData::get`] marks it for removal on the next
/// [`TempData::save`] unless [`TempData::keep`] retains it. [`TempData::peek`]
/// and [`TempData::entries`] read without marking.
pub struct TempData {
    provider: Arc<dyn TempDataProvider>,
    http_context: HttpContext,
    state: Option<TempDataState>,
}

#[derive(Default)]
struct TempDataState {
    values: TempDataMap,
    unread: BTreeSet<String>,
    retained: BTreeSet<String>,
}

impl TempData {
    pub fn new(http_context: HttpContext, provider: Arc<dyn TempDataProvider>) -> Self {
        Self {
            provider,
            http_context,
            state: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    /// Store this temp data loads from.
    pub fn provider(&self) -> &Arc<dyn TempDataProvider> {
        &self.provider
    }

    /// Request the store is keyed on.
    pub fn http_context(&self) -> &HttpContext {
        &self.http_context
    }

    fn load(&mut self) -> ViewResult<&mut TempDataState> {
        if self.state.is_none() {
            let values = self.provider.load_temp_data(&self.http_context)?;
            tracing::trace!(count = values.len(), "Temp data loaded");
            let unread = values.keys().cloned().collect();
            self.state = Some(TempDataState {
                values,
                unread,
                retained: BTreeSet::new(),
            });
        }
        Ok(self.state.get_or_insert_with(TempDataState::default))
    }

    /// Read a value and mark it as consumed.
    pub fn get(&mut self, key: &str) -> ViewResult<Option<Value>> {
        let state = self.load()?;
        state.unread.remove(key);
        Ok(state.values.get(key).cloned())
    }

    /// Read a value without consuming it.
    pub fn peek(&mut self, key: &str) -> ViewResult<Option<Value>> {
        Ok(self.load()?.values.get(key).cloned())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> ViewResult<()> {
        let key = key.into();
        let state = self.load()?;
        state.unread.insert(key.clone());
        state.values.insert(key, value);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> ViewResult<Option<Value>> {
        let state = self.load()?;
        state.unread.remove(key);
        state.retained.remove(key);
        Ok(state.values.remove(key))
    }

    /// Retain a key across the next save even if it was read.
    pub fn keep(&mut self, key: &str) -> ViewResult<()> {
        self.load()?.retained.insert(key.to_string());
        Ok(())
    }

    /// Retain every current key.
    pub fn keep_all(&mut self) -> ViewResult<()> {
        let state = self.load()?;
        state.retained = state.values.keys().cloned().collect();
        Ok(())
    }

    /// All values, without consuming any.
    pub fn entries(&mut self) -> ViewResult<&TempDataMap> {
        Ok(&self.load()?.values)
    }

    /// Persist unread and retained values back to the provider.
    ///
    /// Nothing is written if the store was never loaded.
    pub fn save(&mut self) -> ViewResult<()> {
        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };

        let TempDataState {
            values,
            unread,
            retained,
        } = state;
        values.retain(|key, _| unread.contains(key) || retained.contains(key));
        retained.clear();

        self.provider
            .save_temp_data(&self.http_context, values.clone())
    }
}

impl fmt::Debug for TempData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TempData")
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

/// Everything a [`crate::application::ports::View`] needs to render.
#[derive(Debug)]
pub struct ViewContext {
    pub action_context: ActionContext,
    /// Path of the view being rendered.
    pub view_path: String,
    pub view_data: ViewData,
    pub temp_data: TempData,
    pub writer: ViewWriter,
}

impl ViewContext {
    pub fn new(
        action_context: ActionContext,
        view_path: impl Into<String>,
        view_data: ViewData,
        temp_data: TempData,
        writer: ViewWriter,
    ) -> Self {
        Self {
            action_context,
            view_path: view_path.into(),
            view_data,
            temp_data,
            writer,
        }
    }

    pub fn http_context(&self) -> &HttpContext {
        &self.action_context.http_context
    }

    pub fn route_data(&self) -> &RouteData {
        &self.action_context.route_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockTempDataProvider, NoServices};
    use serde_json::json;

    fn http() -> HttpContext {
        HttpContext::new(Arc::new(NoServices))
    }

    fn seeded(values: TempDataMap) -> MockTempDataProvider {
        let mut provider = MockTempDataProvider::new();
        provider
            .expect_load_temp_data()
            .times(1)
            .returning(move |_| Ok(values.clone()));
        provider
    }

    fn map(pairs: &[(&str, Value)]) -> TempDataMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn synthesized_action_context_is_empty() {
        let ctx = ActionContext::synthesized(Arc::new(NoServices));
        assert!(ctx.route_data.is_empty());
        assert_eq!(ctx.action_descriptor, ActionDescriptor::default());
        assert!(ctx.http_context.items().is_empty());
    }

    #[test]
    fn every_http_context_gets_its_own_trace_id() {
        assert_ne!(http().trace_identifier(), http().trace_identifier());
    }

    #[test]
    fn temp_data_loads_lazily_and_once() {
        let provider = seeded(map(&[("flash", json!("saved"))]));
        let mut temp = TempData::new(http(), Arc::new(provider));

        assert!(!temp.is_loaded());
        assert_eq!(temp.peek("flash").unwrap(), Some(json!("saved")));
        assert_eq!(temp.get("flash").unwrap(), Some(json!("saved")));
        assert!(temp.is_loaded());
    }

    #[test]
    fn save_without_load_writes_nothing() {
        let mut provider = MockTempDataProvider::new();
        provider.expect_load_temp_data().never();
        provider.expect_save_temp_data().never();

        let mut temp = TempData::new(http(), Arc::new(provider));
        temp.save().unwrap();
    }

    #[test]
    fn save_drops_read_keys_and_keeps_the_rest() {
        let mut provider = seeded(map(&[
            ("read", json!(1)),
            ("kept", json!(2)),
            ("peeked", json!(3)),
        ]));
        provider
            .expect_save_temp_data()
            .withf(|_, values| {
                values.keys().cloned().collect::<Vec<_>>() == ["added", "kept", "peeked"]
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut temp = TempData::new(http(), Arc::new(provider));
        temp.get("read").unwrap();
        temp.get("kept").unwrap();
        temp.keep("kept").unwrap();
        temp.peek("peeked").unwrap();
        temp.insert("added", json!(4)).unwrap();
        temp.save().unwrap();
    }

    #[test]
    fn provider_failure_propagates() {
        let mut provider = MockTempDataProvider::new();
        provider
            .expect_load_temp_data()
            .returning(|_| Err(crate::error::ViewError::StoreLock));

        let mut temp = TempData::new(http(), Arc::new(provider));
        assert!(matches!(
            temp.entries(),
            Err(crate::error::ViewError::StoreLock)
        ));
        assert!(!temp.is_loaded());
    }
}
