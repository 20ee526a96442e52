//! Lifecycle hook slots
//!
//! An application configuration carries a fixed set of named callback slots,
//! invoked by the host at defined points of the load/mount/unmount life span.
//! Hook arguments are open-shaped JSON values; the slot set is closed.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// A lifecycle hook callback.
///
/// Receives the positional arguments the host dispatches for the slot and
/// may return a value to the dispatcher.
pub type HookFn = Arc<dyn Fn(&mut [Value]) -> Option<Value> + Send + Sync>;

/// The closed set of lifecycle hook slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleKey {
    /// Before the application's resources are fetched.
    BeforeLoad,
    /// After the application's resources are fetched.
    AfterLoad,
    /// Before the application's code is evaluated.
    BeforeEval,
    /// After the application's code is evaluated.
    AfterEval,
    /// Before the application renders into its mount point.
    BeforeMount,
    /// After the application rendered.
    AfterMount,
    /// Before the application is torn down.
    BeforeUnmount,
    /// After the application was torn down.
    AfterUnmount,
    /// A load failed.
    ErrorLoad,
    /// A mount failed.
    ErrorMount,
    /// An unmount failed.
    ErrorUnmount,
    /// No registered application matched the active route.
    RouteNotMatched,
}

impl LifecycleKey {
    /// Every recognized hook slot.
    pub const ALL: [LifecycleKey; 12] = [
        LifecycleKey::BeforeLoad,
        LifecycleKey::AfterLoad,
        LifecycleKey::BeforeEval,
        LifecycleKey::AfterEval,
        LifecycleKey::BeforeMount,
        LifecycleKey::AfterMount,
        LifecycleKey::BeforeUnmount,
        LifecycleKey::AfterUnmount,
        LifecycleKey::ErrorLoad,
        LifecycleKey::ErrorMount,
        LifecycleKey::ErrorUnmount,
        LifecycleKey::RouteNotMatched,
    ];

    /// Whether this slot reports a failure rather than lifecycle progress.
    pub fn is_error_hook(self) -> bool {
        matches!(
            self,
            LifecycleKey::ErrorLoad | LifecycleKey::ErrorMount | LifecycleKey::ErrorUnmount
        )
    }
}

impl fmt::Display for LifecycleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleKey::BeforeLoad => "before_load",
            LifecycleKey::AfterLoad => "after_load",
            LifecycleKey::BeforeEval => "before_eval",
            LifecycleKey::AfterEval => "after_eval",
            LifecycleKey::BeforeMount => "before_mount",
            LifecycleKey::AfterMount => "after_mount",
            LifecycleKey::BeforeUnmount => "before_unmount",
            LifecycleKey::AfterUnmount => "after_unmount",
            LifecycleKey::ErrorLoad => "error_load",
            LifecycleKey::ErrorMount => "error_mount",
            LifecycleKey::ErrorUnmount => "error_unmount",
            LifecycleKey::RouteNotMatched => "route_not_matched",
        };
        f.write_str(name)
    }
}

/// Recognize a hook argument that describes an application instance.
///
/// A context is a JSON object carrying at least a `name` field. Only such
/// arguments are eligible to receive a nesting-identity stamp.
pub fn is_invocation_context(value: &Value) -> bool {
    value.as_object().map_or(false, |map| map.contains_key("name"))
}

/// The populated lifecycle hook slots of one configuration.
///
/// Slots merge slot-wise across configurations: a newer configuration's hook
/// replaces the older one's for the same slot, untouched slots carry over.
#[derive(Clone, Default)]
pub struct LifecycleHooks {
    slots: HashMap<LifecycleKey, HookFn>,
}

impl LifecycleHooks {
    /// An empty slot set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a hook in `key`'s slot, replacing any previous hook.
    pub fn set(&mut self, key: LifecycleKey, hook: HookFn) {
        self.slots.insert(key, hook);
    }

    /// The hook in `key`'s slot, if populated.
    pub fn get(&self, key: LifecycleKey) -> Option<&HookFn> {
        self.slots.get(&key)
    }

    /// Remove and return the hook in `key`'s slot.
    pub fn take(&mut self, key: LifecycleKey) -> Option<HookFn> {
        self.slots.remove(&key)
    }

    /// The populated slot keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = LifecycleKey> + '_ {
        self.slots.keys().copied()
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot is populated.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Invoke the hook in `key`'s slot, if populated.
    pub fn invoke(&self, key: LifecycleKey, args: &mut [Value]) -> Option<Value> {
        self.slots.get(&key).and_then(|hook| hook(args))
    }

    /// Slot-wise merge: `newer`'s hooks win where both sides populate a slot.
    pub fn merged_with(&self, newer: &LifecycleHooks) -> LifecycleHooks {
        let mut slots = self.slots.clone();
        for (key, hook) in &newer.slots {
            slots.insert(*key, hook.clone());
        }
        LifecycleHooks { slots }
    }
}

impl fmt::Debug for LifecycleHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self.slots.keys().map(|k| k.to_string()).collect();
        keys.sort();
        f.debug_tuple("LifecycleHooks").field(&keys).finish()
    }
}
