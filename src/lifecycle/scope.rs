//! Nesting identity and the hook scoping wrapper
//!
//! A nested application's hooks must still fire when the host invokes them,
//! but the host needs to know which nested instance an invocation pertains
//! to. Wrapping every hook with [`scoped_hook`] stamps the nesting identity
//! onto the invocation context before the original hook is allowed to run.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::hooks::{is_invocation_context, HookFn};

/// Identity of a nested application instance.
///
/// Assigned once per nested-application activation and stamped onto hook
/// invocation contexts so the host can route hook effects to the instance
/// that originated the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NestingId(u64);

impl NestingId {
    /// The zero identity. A hook scoped to it never runs once a context is
    /// found (see [`scoped_hook`]).
    pub const TOP_LEVEL: NestingId = NestingId(0);

    /// Wrap a raw identity value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw identity value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether this is the zero identity.
    pub const fn is_top_level(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for NestingId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NestingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Wrap a hook so its invocations are tagged with the nesting identity.
///
/// The wrapper scans its arguments in positional order for the first
/// invocation context (see [`is_invocation_context`]). Without one, the
/// original hook runs with the arguments unchanged and its result passes
/// through. With one, `id` is stamped onto the context's `nested` field and
/// the original hook runs only for a non-zero identity; the stamp is applied
/// either way.
///
/// The zero identity therefore suppresses the hook even though a valid
/// context was found. That gate is load-bearing and pinned by tests; keep
/// the stamp and the check separate and in this order.
pub fn scoped_hook(original: HookFn, id: NestingId) -> HookFn {
    Arc::new(move |args: &mut [Value]| {
        let position = args.iter().position(|arg| is_invocation_context(arg));
        let Some(position) = position else {
            return original(args);
        };
        args[position]["nested"] = Value::from(id.get());
        if id.is_top_level() {
            return None;
        }
        original(args)
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    /// Hook that records the arguments it was invoked with.
    fn recording_hook(
        calls: Arc<AtomicUsize>,
        seen: Arc<Mutex<Vec<Value>>>,
        result: Option<Value>,
    ) -> HookFn {
        Arc::new(move |args| {
            calls.fetch_add(1, Ordering::SeqCst);
            seen.lock().unwrap().extend(args.iter().cloned());
            result.clone()
        })
    }

    #[test]
    fn test_context_is_stamped_before_hook_runs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let hook = scoped_hook(
            recording_hook(calls.clone(), seen.clone(), None),
            NestingId::new(5),
        );

        let mut args = [json!({"name": "shop"})];
        hook(&mut args);

        assert_eq!(calls.load(Ordering::SeqCst), 1, "hook should run for id 5");
        let seen = seen.lock().unwrap();
        assert_eq!(
            seen[0]["nested"],
            json!(5),
            "the hook must observe the stamped identity"
        );
        assert_eq!(args[0]["nested"], json!(5));
    }

    #[test]
    fn test_zero_identity_stamps_but_suppresses_hook() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let hook = scoped_hook(
            recording_hook(calls.clone(), seen, Some(json!("never"))),
            NestingId::TOP_LEVEL,
        );

        let mut args = [json!({"name": "shop"})];
        let result = hook(&mut args);

        // The zero identity suppresses the hook even though a context was
        // found; the stamp still lands. Pinned behavior, not to be "fixed".
        assert_eq!(calls.load(Ordering::SeqCst), 0, "hook must not run for id 0");
        assert_eq!(result, None);
        assert_eq!(args[0]["nested"], json!(0), "stamp is applied regardless");
    }

    #[test]
    fn test_no_context_passes_arguments_through() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let hook = scoped_hook(
            recording_hook(calls.clone(), seen.clone(), Some(json!("through"))),
            NestingId::new(7),
        );

        let mut args = [json!("plain"), json!(1), json!({"title": "no name"})];
        let result = hook(&mut args);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(result, Some(json!("through")), "return value passes through");
        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![json!("plain"), json!(1), json!({"title": "no name"})],
            "arguments must reach the hook unchanged"
        );
    }

    #[test]
    fn test_first_context_in_positional_order_wins() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let hook = scoped_hook(
            recording_hook(calls.clone(), seen, None),
            NestingId::new(3),
        );

        let mut args = [
            json!(10),
            json!({"name": "first"}),
            json!({"name": "second"}),
        ];
        hook(&mut args);

        assert_eq!(args[1]["nested"], json!(3), "first context gets the stamp");
        assert_eq!(
            args[2].get("nested"),
            None,
            "later contexts are left untouched"
        );
    }

    #[test]
    fn test_top_level_constant_is_zero() {
        assert_eq!(NestingId::TOP_LEVEL.get(), 0);
        assert!(NestingId::TOP_LEVEL.is_top_level());
        assert!(!NestingId::new(1).is_top_level());
    }
}
