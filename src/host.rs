//! Host handle
//!
//! The host owns the top-level options, the registry of previously
//! registered or resolved per-application option sets, the recognized
//! lifecycle keys, and the diagnostic sink. A nested scene builds its own
//! host context through [`HostContext::new_nested`], which is where the
//! nested-attribute filter runs, exactly once per configuration.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{default_options, filter_nested_options, merge_options, AppInfo, AppOptions};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::lifecycle::{LifecycleKey, NestingId};
use crate::resolver::{resolve_app_options, AppOverrides, ResolveError};

/// Errors from application registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("cannot register an application without a name")]
    UnnamedApp,

    #[error("application {0:?} is already registered")]
    DuplicateName(String),
}

/// The host handle.
pub struct HostContext {
    /// The host's own resolved top-level options.
    options: AppOptions,
    /// Previously registered or resolved option sets, keyed by name. After a
    /// load, the stored options are the finalized ones.
    app_infos: HashMap<String, AppOptions>,
    /// Hook slots this host recognizes and scopes.
    lifecycle_keys: Vec<LifecycleKey>,
    sink: Arc<dyn DiagnosticSink>,
}

impl HostContext {
    /// Build a top-level host.
    ///
    /// The supplied options merge over the baseline defaults, and every
    /// `apps` entry carrying a name is registered up front.
    pub fn new(options: AppOptions) -> Self {
        let merged = merge_options(&default_options(false), &options);
        Self::from_options(merged, Arc::new(TracingSink))
    }

    /// Build the host context for a nested scene.
    ///
    /// The nested baseline defaults merge under the supplied options, the
    /// nested flag is forced on, and the nested-attribute filter runs
    /// exactly once with `id`: forbidden attributes are stripped with a
    /// warning each and every recognized hook is scoped to the identity.
    pub fn new_nested(options: AppOptions, id: NestingId) -> Self {
        Self::new_nested_with_sink(options, id, Arc::new(TracingSink))
    }

    /// [`HostContext::new_nested`] with an explicit diagnostic sink, so
    /// construction-time warnings reach it.
    pub fn new_nested_with_sink(
        options: AppOptions,
        id: NestingId,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let mut merged = merge_options(&default_options(true), &options);
        merged.nested = Some(true);
        let filtered = filter_nested_options(&LifecycleKey::ALL, merged, id, sink.as_ref());
        Self::from_options(filtered, sink)
    }

    fn from_options(options: AppOptions, sink: Arc<dyn DiagnosticSink>) -> Self {
        let mut host = Self {
            options,
            app_infos: HashMap::new(),
            lifecycle_keys: LifecycleKey::ALL.to_vec(),
            sink,
        };
        // Unnamed or duplicate entries cannot be addressed later; report
        // them and keep the rest.
        let preregistered = host.options.apps.clone();
        for app in preregistered {
            if let Err(err) = host.register_app(app) {
                host.sink.warn(&err.to_string());
            }
        }
        host
    }

    /// Replace the diagnostic sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The host's own resolved top-level options.
    pub fn options(&self) -> &AppOptions {
        &self.options
    }

    /// The hook slots this host recognizes.
    pub fn lifecycle_keys(&self) -> &[LifecycleKey] {
        &self.lifecycle_keys
    }

    /// Register a child application ahead of load.
    ///
    /// The entry may still be absent at this point; a missing entry only
    /// fails at resolution time.
    pub fn register_app(&mut self, options: AppOptions) -> Result<(), RegistryError> {
        let name = options.name.clone().ok_or(RegistryError::UnnamedApp)?;
        if self.app_infos.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        self.app_infos.insert(name, options);
        Ok(())
    }

    /// Previously registered or resolved options for `name`.
    pub fn app_info(&self, name: &str) -> Option<&AppOptions> {
        self.app_infos.get(name)
    }

    /// Resolve `name` and cache the finalized configuration, so later loads
    /// of the same application merge on top of it.
    pub async fn load_app(
        &mut self,
        name: &str,
        overrides: impl Into<AppOverrides>,
    ) -> Result<AppInfo, ResolveError> {
        let info = resolve_app_options(self, name, overrides.into()).await?;
        self.app_infos.insert(name.to_string(), info.to_options());
        Ok(info)
    }
}
