//! Application option and info types
//!
//! [`AppOptions`] is the partial, mergeable form a configuration passes
//! through while layers combine; [`AppInfo`] is the finalized, validated
//! form the resolver hands back once an entry is known and the mount point
//! is resolved.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lifecycle::LifecycleHooks;
use crate::mount::{MountPoint, MountSource};

/// Isolation posture for one application.
///
/// Flags are tri-state so partial configurations override only the flags
/// they set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxOptions {
    /// Use snapshot-and-restore isolation around activation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<bool>,

    /// Disable scope-level isolation of the application's execution scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_with: Option<bool>,

    /// Fail closed when the isolation boundary cannot be enforced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_isolation: Option<bool>,
}

impl SandboxOptions {
    /// Posture with every isolation feature off.
    pub fn disabled() -> Self {
        Self {
            snapshot: Some(false),
            disable_with: Some(false),
            strict_isolation: Some(false),
        }
    }
}

/// The option set governing one application or the whole host.
///
/// Absent fields mean "inherit from the layer below"; merging combines
/// layers without mutating either side. `props` is an opaque payload handed
/// to application code and always replaces wholesale; its internal
/// structure belongs to the payload owner. Hook slots and the mount source
/// are carried outside the structural data and merge slot-wise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    /// Application name; the resolver stamps it on finalized configurations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Resolvable resource locator. Required once finalized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,

    /// Path prefix for route matching. `/` unless configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basename: Option<String>,

    /// Opaque payload handed to the application. Replace, never merge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<Value>,

    /// Isolation posture. Invalid once `nested` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sandbox: Option<SandboxOptions>,

    /// Whether this configuration is for an application that itself hosts
    /// children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<bool>,

    /// Re-activate the application when its route re-enters. Invalid nested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_refresh_app: Option<bool>,

    /// Suppress usage statistics collection. Invalid nested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_statistics: Option<bool>,

    /// Suppress background preloading of registered applications. Invalid
    /// nested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_preload_app: Option<bool>,

    /// Child applications registered up front.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub apps: Vec<AppOptions>,

    /// Embedder-defined options; merge structurally like any named field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// Lifecycle hook slots.
    #[serde(skip)]
    pub hooks: LifecycleHooks,

    /// Mount target or its deferred provider.
    #[serde(skip)]
    pub mount: Option<MountSource>,
}

impl AppOptions {
    /// Whether this configuration is flagged as nested.
    pub fn is_nested(&self) -> bool {
        self.nested.unwrap_or(false)
    }
}

/// Finalized, validated configuration for one application.
#[derive(Debug, Clone)]
pub struct AppInfo {
    /// Application name.
    pub name: String,

    /// Resolvable resource locator.
    pub entry: String,

    /// Path prefix; `/` unless configured.
    pub basename: String,

    /// Resolved mount point, when a mount source was configured.
    pub mount_point: Option<MountPoint>,

    /// The full merged option set this info was finalized from.
    pub options: AppOptions,
}

impl AppInfo {
    /// The mergeable option form of this info.
    ///
    /// Used as the base layer for subsequent loads of the same application;
    /// the resolved mount point is carried as an already-resolved target so
    /// a provider is not awaited twice.
    pub fn to_options(&self) -> AppOptions {
        let mut options = self.options.clone();
        options.name = Some(self.name.clone());
        options.entry = Some(self.entry.clone());
        options.basename = Some(self.basename.clone());
        if let Some(point) = &self.mount_point {
            options.mount = Some(MountSource::Target(point.clone()));
        }
        options
    }
}
