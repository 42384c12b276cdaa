//! In-memory temp-data provider.

use std::sync::{Arc, RwLock};

use viewstring_core::{
    application::{HttpContext, TempDataProvider},
    domain::TempDataMap,
    error::{ViewError, ViewResult},
};

/// Thread-safe temp-data store shared by every clone.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTempDataProvider {
    inner: Arc<RwLock<TempDataMap>>,
}

impl InMemoryTempDataProvider {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `values`.
    pub fn with_values(values: TempDataMap) -> Self {
        Self {
            inner: Arc::new(RwLock::new(values)),
        }
    }

    /// Current contents.
    pub fn snapshot(&self) -> ViewResult<TempDataMap> {
        let inner = self.inner.read().map_err(|_| ViewError::StoreLock)?;
        Ok(inner.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TempDataProvider for InMemoryTempDataProvider {
    fn load_temp_data(&self, _context: &HttpContext) -> ViewResult<TempDataMap> {
        self.snapshot()
    }

    fn save_temp_data(&self, _context: &HttpContext, values: TempDataMap) -> ViewResult<()> {
        let mut inner = self.inner.write().map_err(|_| ViewError::StoreLock)?;
        tracing::trace!(count = values.len(), "Temp data saved");
        *inner = values;
        Ok(())
    }
}
