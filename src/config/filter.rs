//! Nested-attribute filtering and hook scoping
//!
//! A configuration destined for a nested application passes through this
//! filter exactly once during construction: forbidden attributes are
//! stripped with a diagnostic each, and every recognized lifecycle hook is
//! wrapped so invocations carry the nesting identity.

use crate::diagnostics::DiagnosticSink;
use crate::lifecycle::{scoped_hook, LifecycleKey, NestingId};

use super::defaults::{clear_attr, INVALID_NESTED_ATTRS};
use super::options::AppOptions;

/// Sanitize a configuration destined for a nested application and scope its
/// hooks to the nesting identity.
///
/// With the nested flag set, every invalid-nested attribute present on the
/// configuration is removed and one warning per removed key goes to the
/// sink; removing an absent key is a no-op. Independently of the nested
/// flag, every recognized lifecycle slot holding a hook is replaced with its
/// scoped wrapper bound to `id`.
///
/// The configuration is consumed and the transformed value returned. Apply
/// at most once: a second pass would wrap the hooks a second time.
pub fn filter_nested_options(
    lifecycle_keys: &[LifecycleKey],
    mut options: AppOptions,
    id: NestingId,
    sink: &dyn DiagnosticSink,
) -> AppOptions {
    if options.is_nested() {
        for key in INVALID_NESTED_ATTRS {
            if clear_attr(&mut options, key) {
                sink.warn(&format!(
                    "nested scene does not support the \"{key}\" option"
                ));
            }
        }
    }

    for key in lifecycle_keys {
        if let Some(hook) = options.hooks.take(*key) {
            options.hooks.set(*key, scoped_hook(hook, id));
        }
    }
    options
}
