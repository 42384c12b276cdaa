//! Domain layer: plain values carried through a render.
//!
//! Nothing here talks to a collaborator. The context objects that do
//! (request services, temp data) live in [`crate::application::context`].

mod route;
mod view_data;
mod writer;

pub use route::{ActionDescriptor, RouteData};
pub use view_data::{ModelState, ViewData, ViewDataEntries};
pub use writer::ViewWriter;

/// Key/value payload exchanged with a temp-data provider.
pub type TempDataMap = std::collections::BTreeMap<String, serde_json::Value>;
