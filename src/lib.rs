//! apphost: hierarchical configuration resolution and lifecycle-hook
//! scoping for a multi-application host.
//!
//! The crate computes, per child application, a single authoritative
//! configuration: global defaults, previously registered per-app settings,
//! and call-site overrides merge deeply, except the opaque `props` payload,
//! which always replaces wholesale. Configurations destined for nested
//! applications are sanitized (forbidden attributes stripped with a
//! diagnostic each) and their lifecycle hooks wrapped so every invocation
//! carries the originating nesting identity. Mount-point resolution may
//! suspend and is awaited before a configuration is final.
//!
//! The usual flow: build a [`HostContext`] (top level via
//! [`HostContext::new`], nested scene via [`HostContext::new_nested`]),
//! register applications, then [`HostContext::load_app`]. Call
//! [`resolver::resolve_app_options`] directly for a cache-free resolution.

pub mod config;
pub mod diagnostics;
pub mod host;
pub mod lifecycle;
pub mod mount;
pub mod resolver;

pub use config::{
    default_options, deep_merge, filter_nested_options, merge_options, AppInfo, AppOptions,
    SandboxOptions, INVALID_NESTED_ATTRS,
};
pub use diagnostics::{DiagnosticSink, MemorySink, TracingSink};
pub use host::{HostContext, RegistryError};
pub use lifecycle::{
    is_invocation_context, scoped_hook, HookFn, LifecycleHooks, LifecycleKey, NestingId,
};
pub use mount::{MountError, MountPoint, MountProvider, MountSource};
pub use resolver::{resolve_app_options, AppOverrides, ResolveError};
