//! Host service registry.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::Arc,
};

use serde_json::{Map, Value};
use viewstring_core::application::ports::ServiceProvider;

/// Type-keyed registry of shared services.
///
/// Built once and then only read, so lookups need no locking.
#[derive(Clone, Default)]
pub struct ServiceCollection {
    services: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl ServiceCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration. A later value of the same type replaces
    /// the earlier one.
    pub fn with_service<T: Any + Send + Sync>(mut self, service: T) -> Self {
        self.add(service);
        self
    }

    pub fn add<T: Any + Send + Sync>(&mut self, service: T) {
        self.services.insert(TypeId::of::<T>(), Arc::new(service));
    }

    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl ServiceProvider for ServiceCollection {
    fn get_service(&self, service: TypeId) -> Option<Arc<dyn Any + Send + Sync>> {
        self.services.get(&service).cloned()
    }
}

impl fmt::Debug for ServiceCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceCollection")
            .field("len", &self.services.len())
            .finish()
    }
}

/// Values merged into every MiniJinja view's top-level context.
///
/// Register with a [`ServiceCollection`]. The reserved names `model`,
/// `view_data`, `temp_data` and `route` always win over a global of the same
/// name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewGlobals(Map<String, Value>);

impl ViewGlobals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for ViewGlobals {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
