//! Temp-data providers.

mod memory;

pub use memory::InMemoryTempDataProvider;
