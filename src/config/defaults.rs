//! Default configuration factory
//!
//! Hardcoded baseline values for every configuration. Each call produces an
//! independent instance; there is no shared default state.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::lifecycle::{HookFn, LifecycleHooks, LifecycleKey};
use crate::mount::MountSource;

use super::options::{AppOptions, SandboxOptions};

/// Option keys that are meaningless or unsafe once a configuration is
/// nested. No resolved nested configuration may contain any of them.
pub const INVALID_NESTED_ATTRS: [&str; 4] = [
    "sandbox",
    "auto_refresh_app",
    "disable_statistics",
    "disable_preload_app",
];

/// Clear the named invalid-nested attribute. Returns whether it was present.
pub(crate) fn clear_attr(options: &mut AppOptions, key: &str) -> bool {
    match key {
        "sandbox" => options.sandbox.take().is_some(),
        "auto_refresh_app" => options.auto_refresh_app.take().is_some(),
        "disable_statistics" => options.disable_statistics.take().is_some(),
        "disable_preload_app" => options.disable_preload_app.take().is_some(),
        _ => false,
    }
}

/// Produce the baseline configuration for a host or a nested scene.
///
/// The result carries an empty app list, an empty `props` payload, basename
/// `/`, feature flags at their system defaults, every isolation flag off,
/// a no-op in every lifecycle hook slot (error slots log the failure
/// instead), and a mount provider yielding a fresh detached container.
///
/// With `nested` set, the invalid-nested attributes are absent from the
/// result, silently; only the nested-attribute filter reports
/// caller-supplied offenders.
pub fn default_options(nested: bool) -> AppOptions {
    let mut hooks = LifecycleHooks::new();
    for key in LifecycleKey::ALL {
        hooks.set(key, default_hook(key));
    }

    let mut options = AppOptions {
        name: None,
        entry: None,
        basename: Some("/".to_string()),
        props: Some(Value::Object(Map::new())),
        sandbox: Some(SandboxOptions::disabled()),
        nested: None,
        auto_refresh_app: Some(true),
        disable_statistics: Some(false),
        disable_preload_app: Some(false),
        apps: Vec::new(),
        extra: Map::new(),
        hooks,
        mount: Some(MountSource::detached()),
    };

    if nested {
        for key in INVALID_NESTED_ATTRS {
            clear_attr(&mut options, key);
        }
    }
    options
}

fn default_hook(key: LifecycleKey) -> HookFn {
    if key.is_error_hook() {
        Arc::new(move |args: &mut [Value]| {
            let detail = args.first().map(|arg| arg.to_string()).unwrap_or_default();
            tracing::error!("{key} hook received an unhandled error: {detail}");
            None
        })
    } else {
        Arc::new(|_args: &mut [Value]| None)
    }
}
