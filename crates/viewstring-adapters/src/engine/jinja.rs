//! MiniJinja-backed view engine.

use std::collections::{BTreeMap, HashSet};
use std::fmt::{self, Write as _};
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use minijinja::value::{Enumerator, Object};
use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use tracing::{instrument, trace};

use viewstring_core::{
    application::{
        ActionContext, HttpContext, ServiceProviderExt, TempDataProvider, View, ViewContext,
        ViewEngine, ViewEngineResult,
    },
    domain::{RouteData, TempDataMap},
    error::{ViewError, ViewResult},
};

use super::locations;
use crate::{options::ViewEngineOptions, services::ViewGlobals};

/// Locates views under a content root and renders them with MiniJinja.
///
/// The environment's loader reads from the same root, so `{% extends %}` and
/// `{% include %}` take root-relative names such as
/// `"Views/Shared/_Layout.jinja"`.
#[derive(Debug, Clone)]
pub struct MiniJinjaViewEngine {
    env: Arc<Environment<'static>>,
    options: ViewEngineOptions,
}

impl MiniJinjaViewEngine {
    /// Build an engine over an existing content root.
    ///
    /// Location formats must be present and end with the view extension.
    pub fn new(options: ViewEngineOptions) -> ViewResult<Self> {
        if !options.content_root.is_dir() {
            return Err(ViewError::Configuration {
                message: format!(
                    "content root '{}' is not a directory",
                    options.content_root.display()
                ),
            });
        }
        if options.view_location_formats.is_empty() {
            return Err(ViewError::Configuration {
                message: "no view location formats configured".into(),
            });
        }
        if options.view_extension.is_empty() {
            return Err(ViewError::Configuration {
                message: "view extension must not be empty".into(),
            });
        }
        if let Some(format) = options.mismatched_formats().first() {
            return Err(ViewError::Configuration {
                message: format!(
                    "location format '{format}' does not end with view extension '{}'",
                    options.view_extension
                ),
            });
        }

        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(options.content_root.clone()));
        env.set_undefined_behavior(if options.strict_undefined {
            UndefinedBehavior::Strict
        } else {
            UndefinedBehavior::Lenient
        });

        let extension = options.view_extension.clone();
        let auto_escape = options.auto_escape;
        env.set_auto_escape_callback(move |name| {
            if !auto_escape {
                return AutoEscape::None;
            }
            match minijinja::default_auto_escape_callback(name) {
                AutoEscape::None if locations::is_relative_path(name, &extension) => {
                    AutoEscape::Html
                }
                other => other,
            }
        });

        Ok(Self {
            env: Arc::new(env),
            options,
        })
    }

    pub fn options(&self) -> &ViewEngineOptions {
        &self.options
    }

    pub fn content_root(&self) -> &Path {
        &self.options.content_root
    }

    /// The underlying environment, for registering filters before sharing.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Locations a conventional search for `view_name` would try, in order.
    pub fn search_locations(&self, route_data: &RouteData, view_name: &str) -> Vec<String> {
        let formats = match route_data.area() {
            Some(_) => &self.options.area_view_location_formats,
            None => &self.options.view_location_formats,
        };
        let controller = route_data.controller().unwrap_or_default();
        let area = route_data.area().unwrap_or_default();

        let mut seen = HashSet::new();
        formats
            .iter()
            .map(|format| locations::expand(format, view_name, controller, area))
            .filter(|location| seen.insert(location.clone()))
            .collect()
    }

    /// Whether a view file exists at `location`.
    pub fn exists(&self, location: &str) -> bool {
        self.resolve(location).is_some()
    }

    fn is_path(&self, name: &str) -> bool {
        locations::is_app_relative(name)
            || locations::is_relative_path(name, &self.options.view_extension)
    }

    fn resolve(&self, location: &str) -> Option<String> {
        let name = locations::template_name(location)?;
        self.options
            .content_root
            .join(&name)
            .is_file()
            .then_some(name)
    }

    fn view(&self, template_name: String) -> Arc<dyn View> {
        Arc::new(MiniJinjaView {
            env: Arc::clone(&self.env),
            path: format!("/{template_name}"),
            template_name,
        })
    }
}

impl ViewEngine for MiniJinjaViewEngine {
    #[instrument(skip(self), level = "trace")]
    fn get_view(&self, executing_file_path: Option<&str>, view_path: &str) -> ViewEngineResult {
        if !self.is_path(view_path) {
            return ViewEngineResult::not_found(view_path, Vec::new());
        }

        let location = if locations::is_app_relative(view_path) {
            locations::normalize_app_relative(view_path)
        } else {
            locations::combine(executing_file_path, view_path)
        };

        match self.resolve(&location) {
            Some(name) => ViewEngineResult::found(view_path, self.view(name)),
            None => ViewEngineResult::not_found(view_path, vec![location]),
        }
    }

    #[instrument(skip(self, context), level = "trace")]
    fn find_view(&self, context: &ActionContext, view_name: &str) -> ViewEngineResult {
        if self.is_path(view_name) {
            return ViewEngineResult::not_found(view_name, Vec::new());
        }

        let mut searched = Vec::new();
        for location in self.search_locations(&context.route_data, view_name) {
            if let Some(name) = self.resolve(&location) {
                trace!(%location, "View location hit");
                return ViewEngineResult::found(view_name, self.view(name));
            }
            searched.push(location);
        }

        ViewEngineResult::not_found(view_name, searched)
    }
}

/// A view file compiled and rendered through the shared environment.
///
/// The template context exposes `model`, `view_data`, `temp_data` and
/// `route`, plus any [`ViewGlobals`] registered with the request services.
#[derive(Debug)]
pub struct MiniJinjaView {
    env: Arc<Environment<'static>>,
    path: String,
    template_name: String,
}

impl MiniJinjaView {
    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    fn template_context(&self, context: &mut ViewContext) -> ViewResult<(Value, LazyTempData)> {
        let mut root = BTreeMap::new();

        if let Some(globals) = context
            .http_context()
            .request_services()
            .get::<ViewGlobals>()
        {
            root.extend(globals.iter().map(|(k, v)| (k.clone(), Value::from_serialize(v))));
        }

        let temp_data = if context.temp_data.is_loaded() {
            LazyTempData::loaded(context.temp_data.entries()?.clone())
        } else {
            LazyTempData::deferred(
                Arc::clone(context.temp_data.provider()),
                context.temp_data.http_context().clone(),
            )
        };

        root.insert("model".into(), Value::from_serialize(context.view_data.model()));
        root.insert(
            "view_data".into(),
            Value::from_serialize(context.view_data.entries()),
        );
        root.insert(
            "route".into(),
            Value::from_serialize(context.route_data().values()),
        );
        root.insert("temp_data".into(), Value::from_object(temp_data.clone()));

        Ok((root.into_iter().collect(), temp_data))
    }
}

#[async_trait]
impl View for MiniJinjaView {
    fn path(&self) -> &str {
        &self.path
    }

    async fn render(&self, context: &mut ViewContext) -> ViewResult<()> {
        let template = self
            .env
            .get_template(&self.template_name)
            .map_err(ViewError::engine)?;
        let (ctx, temp_data) = self.template_context(context)?;
        let rendered = template.render(ctx);

        // A store failure outranks whatever the template made of the gap.
        if let Some(err) = temp_data.take_failure() {
            return Err(err);
        }
        let output = rendered.map_err(ViewError::engine)?;

        trace!(path = %self.path, bytes = output.len(), "Template rendered");
        context
            .writer
            .write_str(&output)
            .map_err(ViewError::engine)
    }
}

/// `temp_data` as the template sees it.
///
/// The store is only read when a template (or a layout or include it pulls
/// in) looks up a key, so views that ignore temp data never touch the
/// provider. A failed load leaves every key undefined and is reported after
/// the render.
#[derive(Clone)]
struct LazyTempData {
    source: Option<(Arc<dyn TempDataProvider>, HttpContext)>,
    values: Arc<OnceLock<Option<TempDataMap>>>,
    failure: Arc<Mutex<Option<ViewError>>>,
}

impl LazyTempData {
    fn loaded(values: TempDataMap) -> Self {
        Self {
            source: None,
            values: Arc::new(OnceLock::from(Some(values))),
            failure: Arc::default(),
        }
    }

    fn deferred(provider: Arc<dyn TempDataProvider>, http_context: HttpContext) -> Self {
        Self {
            source: Some((provider, http_context)),
            values: Arc::default(),
            failure: Arc::default(),
        }
    }

    fn values(&self) -> Option<&TempDataMap> {
        self.values
            .get_or_init(|| {
                let (provider, http_context) = self.source.as_ref()?;
                match provider.load_temp_data(http_context) {
                    Ok(values) => {
                        trace!(count = values.len(), "Temp data loaded for template");
                        Some(values)
                    }
                    Err(err) => {
                        if let Ok(mut slot) = self.failure.lock() {
                            *slot = Some(err);
                        }
                        None
                    }
                }
            })
            .as_ref()
    }

    fn take_failure(&self) -> Option<ViewError> {
        self.failure.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl fmt::Debug for LazyTempData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyTempData")
            .field("loaded", &self.values.get().is_some())
            .finish_non_exhaustive()
    }
}

impl Object for LazyTempData {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let value = self.values()?.get(key.as_str()?)?;
        Some(Value::from_serialize(value))
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        match self.values() {
            Some(values) => {
                Enumerator::Values(values.keys().map(|k| Value::from(k.as_str())).collect())
            }
            None => Enumerator::Empty,
        }
    }
}
