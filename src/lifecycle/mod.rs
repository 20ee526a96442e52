//! Lifecycle hook slots and nesting-scope wrapping.

mod hooks;
mod scope;

pub use hooks::{is_invocation_context, HookFn, LifecycleHooks, LifecycleKey};
pub use scope::{scoped_hook, NestingId};
