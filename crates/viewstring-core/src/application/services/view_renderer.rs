//! View-to-string renderer - the one application service.
//!
//! Workflow for a single render:
//! 1. Synthesize an action context (no inbound request)
//! 2. Resolve the view: direct path first, then conventional search
//! 3. Bind the model into fresh view data and temp data
//! 4. Render into an in-memory writer and hand back the string

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::{
    application::{
        context::{ActionContext, TempData, ViewContext},
        ports::{RenderViewToString, ServiceProvider, TempDataProvider, View, ViewEngine},
    },
    domain::{ViewData, ViewDataEntries, ViewWriter},
    error::{ViewError, ViewResult},
};

/// Renders views through an injected engine, outside any request pipeline.
///
/// Holds shared references to its collaborators and never mutates them, so
/// one instance can serve any number of concurrent renders.
#[derive(Clone)]
pub struct ViewToStringRenderer {
    view_engine: Arc<dyn ViewEngine>,
    temp_data_provider: Arc<dyn TempDataProvider>,
    service_provider: Arc<dyn ServiceProvider>,
}

impl ViewToStringRenderer {
    /// Create a renderer over the host's engine, temp-data store and services.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use viewstring_core::application::ViewToStringRenderer;
    ///
    /// let renderer = ViewToStringRenderer::new(
    ///     engine,         // Arc<dyn ViewEngine>
    ///     temp_data,      // Arc<dyn TempDataProvider>
    ///     services,       // Arc<dyn ServiceProvider>
    /// );
    /// ```
    pub fn new(
        view_engine: Arc<dyn ViewEngine>,
        temp_data_provider: Arc<dyn TempDataProvider>,
        service_provider: Arc<dyn ServiceProvider>,
    ) -> Self {
        Self {
            view_engine,
            temp_data_provider,
            service_provider,
        }
    }

    /// Render with extra view-data entries bound next to the model.
    #[instrument(
        skip_all,
        fields(view = %view_name, trace_id = tracing::field::Empty)
    )]
    pub async fn render_view_to_string_with<M>(
        &self,
        view_name: &str,
        model: &M,
        entries: ViewDataEntries,
    ) -> ViewResult<String>
    where
        M: Serialize + Sync + ?Sized,
    {
        let action_context = ActionContext::synthesized(Arc::clone(&self.service_provider));
        tracing::Span::current().record(
            "trace_id",
            tracing::field::display(action_context.http_context.trace_identifier()),
        );

        let view = self.find_view(&action_context, view_name)?;
        let view_data = ViewData::from_model(model)?.with_entries(entries);
        let temp_data = TempData::new(
            action_context.http_context.clone(),
            Arc::clone(&self.temp_data_provider),
        );

        let mut context = ViewContext::new(
            action_context,
            view.path(),
            view_data,
            temp_data,
            ViewWriter::new(),
        );

        view.render(&mut context).await?;

        let output = context.writer.into_string();
        debug!(bytes = output.len(), "View rendered");
        Ok(output)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Direct path lookup, then conventional search. On a double miss the
    /// error lists both lookups' locations, direct path first.
    fn find_view(&self, context: &ActionContext, view_name: &str) -> ViewResult<Arc<dyn View>> {
        let get_result = self.view_engine.get_view(None, view_name);
        if let Some(view) = get_result.clone().into_view() {
            debug!(path = view.path(), "View resolved by path");
            return Ok(view);
        }

        let find_result = self.view_engine.find_view(context, view_name);
        if let Some(view) = find_result.clone().into_view() {
            debug!(path = view.path(), "View resolved by search");
            return Ok(view);
        }

        let searched_locations: Vec<String> = get_result
            .searched_locations()
            .iter()
            .chain(find_result.searched_locations())
            .cloned()
            .collect();

        warn!(
            locations = searched_locations.len(),
            "View not found in any searched location"
        );

        Err(ViewError::ViewNotFound {
            view_name: view_name.to_string(),
            searched_locations,
        })
    }
}

#[async_trait]
impl RenderViewToString for ViewToStringRenderer {
    async fn render_view_to_string<M>(&self, view_name: &str, model: &M) -> ViewResult<String>
    where
        M: Serialize + Sync + ?Sized,
    {
        self.render_view_to_string_with(view_name, model, ViewDataEntries::new())
            .await
    }
}
