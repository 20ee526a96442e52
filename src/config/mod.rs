//! Configuration model
//!
//! Option types, the default factory, the merge engine, and the
//! nested-attribute filter. Resolution of a full per-application
//! configuration lives in [`crate::resolver`].

mod defaults;
mod filter;
mod merge;
mod options;

pub use defaults::{default_options, INVALID_NESTED_ATTRS};
pub use filter::filter_nested_options;
pub use merge::{deep_merge, merge_options};
pub use options::{AppInfo, AppOptions, SandboxOptions};
