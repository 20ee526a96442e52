//! App options resolution
//!
//! The pipeline per load call: normalize the overrides, merge with the
//! registered or top-level configuration, validate the entry, stamp the
//! name, await mount-point resolution, finalize. Fatal conditions surface
//! here rather than inside the merge and filter helpers.

use thiserror::Error;

use crate::config::{merge_options, AppInfo, AppOptions};
use crate::host::HostContext;
use crate::mount::MountError;

/// Errors from app options resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The merged configuration has no resolvable entry. Fatal for this
    /// load call only; other applications and the host are unaffected.
    #[error(
        "cannot load app {name:?}: provide an entry locator or register the application in advance"
    )]
    MissingEntry { name: String },

    /// The mount provider failed; propagated unmodified, no retry.
    #[error(transparent)]
    Mount(#[from] MountError),
}

/// Call-site overrides for one load.
#[derive(Debug, Clone)]
pub enum AppOverrides {
    /// Shorthand: use the string as the entry locator, with the default
    /// basename and the application name.
    Entry(String),
    /// A partial configuration merged over the registered or global options.
    Options(AppOptions),
}

impl AppOverrides {
    fn into_options(self, name: &str) -> AppOptions {
        match self {
            AppOverrides::Entry(entry) => AppOptions {
                name: Some(name.to_string()),
                basename: Some("/".to_string()),
                entry: Some(entry),
                ..AppOptions::default()
            },
            AppOverrides::Options(options) => options,
        }
    }
}

impl Default for AppOverrides {
    fn default() -> Self {
        AppOverrides::Options(AppOptions::default())
    }
}

impl From<&str> for AppOverrides {
    fn from(entry: &str) -> Self {
        AppOverrides::Entry(entry.to_string())
    }
}

impl From<String> for AppOverrides {
    fn from(entry: String) -> Self {
        AppOverrides::Entry(entry)
    }
}

impl From<AppOptions> for AppOverrides {
    fn from(options: AppOptions) -> Self {
        AppOverrides::Options(options)
    }
}

/// Resolve the authoritative configuration for one application.
///
/// The previously registered options for `name` (or the host's top-level
/// options when none are registered) merge as the older side under the
/// call-site overrides. The merged result must carry an entry locator;
/// the supplied name is stamped over whatever merging produced; and a
/// configured mount source is resolved, awaiting its provider, before the
/// finalized [`AppInfo`] is returned.
pub async fn resolve_app_options(
    host: &HostContext,
    name: &str,
    overrides: AppOverrides,
) -> Result<AppInfo, ResolveError> {
    let overrides = overrides.into_options(name);

    let mut merged = match host.app_info(name) {
        Some(registered) => merge_options(registered, &overrides),
        None => merge_options(host.options(), &overrides),
    };

    let entry = merged
        .entry
        .clone()
        .filter(|entry| !entry.is_empty())
        .ok_or_else(|| ResolveError::MissingEntry {
            name: name.to_string(),
        })?;

    merged.name = Some(name.to_string());

    let mount_point = match &merged.mount {
        Some(source) => Some(source.resolve().await?),
        None => None,
    };

    let basename = merged.basename.clone().unwrap_or_else(|| "/".to_string());

    Ok(AppInfo {
        name: name.to_string(),
        entry,
        basename,
        mount_point,
        options: merged,
    })
}
