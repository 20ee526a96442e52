//! Configuration merge engine
//!
//! Layers combine with:
//! - Objects: deep-merge by key
//! - Arrays: REPLACE (newer side wins entirely)
//! - Scalars: override (newer side wins)
//!
//! The one exception is the `props` payload: it is opaque to the host and
//! always replaces wholesale, never combining structurally.

use serde_json::{Map, Value};

use super::options::{AppOptions, SandboxOptions};

/// Deep merge two JSON values.
///
/// Merge semantics:
/// - Objects: deep-merge by key (recursive)
/// - Arrays: REPLACE (overlay wins entirely)
/// - Scalars and mismatched kinds: override (overlay wins)
/// - Null: override (null can override any value)
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = if let Some(base_value) = base_map.remove(&key) {
                    deep_merge(base_value, overlay_value)
                } else {
                    overlay_value
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }

        (Value::Array(_), overlay @ Value::Array(_)) => overlay,

        (_, overlay) => overlay,
    }
}

/// Merge an older and a newer option set into a fresh value.
///
/// Named fields inherit from `old` where `new` leaves them unset; structured
/// fields (the sandbox posture, embedder extras) combine at matching paths
/// via [`deep_merge`] semantics. `props` is held out of the structural
/// merge: the newer side's payload wins wholesale when present, otherwise
/// the older payload is kept untouched. Hook slots merge slot-wise with the
/// newer side winning per slot; the newer mount source wins when present.
/// Neither input is mutated.
pub fn merge_options(old: &AppOptions, new: &AppOptions) -> AppOptions {
    AppOptions {
        name: new.name.clone().or_else(|| old.name.clone()),
        entry: new.entry.clone().or_else(|| old.entry.clone()),
        basename: new.basename.clone().or_else(|| old.basename.clone()),
        props: new.props.clone().or_else(|| old.props.clone()),
        sandbox: merge_sandbox(old.sandbox, new.sandbox),
        nested: new.nested.or(old.nested),
        auto_refresh_app: new.auto_refresh_app.or(old.auto_refresh_app),
        disable_statistics: new.disable_statistics.or(old.disable_statistics),
        disable_preload_app: new.disable_preload_app.or(old.disable_preload_app),
        apps: if new.apps.is_empty() {
            old.apps.clone()
        } else {
            new.apps.clone()
        },
        extra: merge_extra(&old.extra, &new.extra),
        hooks: old.hooks.merged_with(&new.hooks),
        mount: new.mount.clone().or_else(|| old.mount.clone()),
    }
}

/// Flag-wise sandbox merge; the newer side overrides only the flags it sets.
fn merge_sandbox(
    old: Option<SandboxOptions>,
    new: Option<SandboxOptions>,
) -> Option<SandboxOptions> {
    match (old, new) {
        (Some(old), Some(new)) => Some(SandboxOptions {
            snapshot: new.snapshot.or(old.snapshot),
            disable_with: new.disable_with.or(old.disable_with),
            strict_isolation: new.strict_isolation.or(old.strict_isolation),
        }),
        (old, None) => old,
        (None, new) => new,
    }
}

fn merge_extra(old: &Map<String, Value>, new: &Map<String, Value>) -> Map<String, Value> {
    match deep_merge(Value::Object(old.clone()), Value::Object(new.clone())) {
        Value::Object(map) => map,
        // deep_merge of two objects always yields an object
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn with_extra(entries: Value) -> AppOptions {
        let mut options = AppOptions::default();
        if let Value::Object(map) = entries {
            options.extra = map;
        }
        options
    }

    #[test]
    fn test_scalar_override() {
        let base = json!({"timeout": 100});
        let overlay = json!({"timeout": 200});
        let result = deep_merge(base, overlay);
        assert_eq!(result["timeout"], 200);
    }

    #[test]
    fn test_object_deep_merge() {
        let base = json!({
            "loader": {
                "retries": 2,
                "cache": true
            }
        });
        let overlay = json!({
            "loader": {
                "retries": 5
            }
        });
        let result = deep_merge(base, overlay);

        assert_eq!(result["loader"]["retries"], 5);
        assert_eq!(result["loader"]["cache"], true, "unset key is preserved");
    }

    #[test]
    fn test_array_replace() {
        let base = json!({"routes": ["/a", "/b", "/c"]});
        let overlay = json!({"routes": ["/x"]});
        let result = deep_merge(base, overlay);

        let routes = result["routes"].as_array().unwrap();
        assert_eq!(routes.len(), 1, "arrays replace, never concatenate");
        assert_eq!(routes[0], "/x");
    }

    #[test]
    fn test_null_override() {
        let base = json!({"value": 100});
        let overlay = json!({"value": null});
        let result = deep_merge(base, overlay);
        assert!(result["value"].is_null());
    }

    #[test]
    fn test_props_new_side_wins_wholesale() {
        let old = AppOptions {
            props: Some(json!({"user": {"id": 1, "role": "admin"}, "theme": "dark"})),
            ..AppOptions::default()
        };
        let new = AppOptions {
            props: Some(json!({"user": {"id": 2}})),
            ..AppOptions::default()
        };

        let merged = merge_options(&old, &new);
        assert_eq!(
            merged.props,
            Some(json!({"user": {"id": 2}})),
            "props must never combine structurally"
        );
    }

    #[test]
    fn test_props_old_side_kept_when_new_absent() {
        let old = AppOptions {
            props: Some(json!({"token": "abc"})),
            ..AppOptions::default()
        };
        let new = AppOptions::default();

        let merged = merge_options(&old, &new);
        assert_eq!(merged.props, Some(json!({"token": "abc"})));
    }

    #[test]
    fn test_named_fields_inherit_from_old_layer() {
        let old = AppOptions {
            entry: Some("https://x/entry.html".to_string()),
            basename: Some("/shop".to_string()),
            auto_refresh_app: Some(true),
            ..AppOptions::default()
        };
        let new = AppOptions {
            basename: Some("/store".to_string()),
            ..AppOptions::default()
        };

        let merged = merge_options(&old, &new);
        assert_eq!(merged.entry.as_deref(), Some("https://x/entry.html"));
        assert_eq!(merged.basename.as_deref(), Some("/store"));
        assert_eq!(merged.auto_refresh_app, Some(true));
    }

    #[test]
    fn test_sandbox_merges_flag_wise() {
        let old = AppOptions {
            sandbox: Some(SandboxOptions {
                snapshot: Some(true),
                ..SandboxOptions::default()
            }),
            ..AppOptions::default()
        };
        let new = AppOptions {
            sandbox: Some(SandboxOptions {
                strict_isolation: Some(true),
                ..SandboxOptions::default()
            }),
            ..AppOptions::default()
        };

        let merged = merge_options(&old, &new).sandbox.unwrap();
        assert_eq!(merged.snapshot, Some(true));
        assert_eq!(merged.strict_isolation, Some(true));
        assert_eq!(merged.disable_with, None);
    }

    #[test]
    fn test_extra_fields_deep_combine() {
        let old = with_extra(json!({"loader": {"retries": 2, "cache": true}}));
        let new = with_extra(json!({"loader": {"retries": 5}, "theme": "dark"}));

        let merged = merge_options(&old, &new);
        assert_eq!(merged.extra["loader"], json!({"retries": 5, "cache": true}));
        assert_eq!(merged.extra["theme"], json!("dark"));
    }

    #[test]
    fn test_apps_list_replaces() {
        let old = AppOptions {
            apps: vec![AppOptions {
                name: Some("a".to_string()),
                ..AppOptions::default()
            }],
            ..AppOptions::default()
        };
        let new = AppOptions {
            apps: vec![
                AppOptions {
                    name: Some("b".to_string()),
                    ..AppOptions::default()
                },
                AppOptions {
                    name: Some("c".to_string()),
                    ..AppOptions::default()
                },
            ],
            ..AppOptions::default()
        };

        let merged = merge_options(&old, &new);
        let names: Vec<_> = merged.apps.iter().filter_map(|a| a.name.as_deref()).collect();
        assert_eq!(names, vec!["b", "c"], "sequences replace like arrays");
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let old = AppOptions {
            props: Some(json!({"a": 1})),
            ..AppOptions::default()
        };
        let new = AppOptions {
            props: Some(json!({"b": 2})),
            ..AppOptions::default()
        };

        let _ = merge_options(&old, &new);
        assert_eq!(old.props, Some(json!({"a": 1})));
        assert_eq!(new.props, Some(json!({"b": 2})));
    }

    #[test]
    fn test_either_side_may_be_empty() {
        let populated = AppOptions {
            entry: Some("https://x/entry.html".to_string()),
            ..AppOptions::default()
        };
        let empty = AppOptions::default();

        let forward = merge_options(&empty, &populated);
        let backward = merge_options(&populated, &empty);
        assert_eq!(forward.entry.as_deref(), Some("https://x/entry.html"));
        assert_eq!(backward.entry.as_deref(), Some("https://x/entry.html"));
    }
}
