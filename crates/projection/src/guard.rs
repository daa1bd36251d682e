//! Projection construction and the leak assertion.

use serde::Serialize;
use serde_json::Value;

/// Maps an internal record to its typed public view.
pub trait Projectable {
    type View: Serialize;

    fn view(&self) -> Self::View;
}

/// Keys that must never appear in a public payload, at any depth.
pub const FORBIDDEN_KEYS: &[&str] = &[
    "tier",
    "plan",
    "billingId",
    "billing_id",
    "stripeCustomerId",
    "storageAssetId",
    "storage_asset_id",
    "assetId",
    "deletedAt",
    "deleted_at",
    "email",
    "contactEmail",
    "internalNotes",
    "internal_notes",
    "viewCount",
    "draftRevisions",
];

/// Key prefixes that are forbidden outright.
pub const FORBIDDEN_PREFIXES: &[&str] = &["billing", "stripe"];

/// Build the public view for an entity.
///
/// The type-level allow-list is the production guarantee; in non-production
/// builds the serialized view is additionally walked for forbidden keys so a
/// careless view edit fails loudly in testing/staging instead of shipping.
pub fn project<T: Projectable>(entity: &T) -> T::View {
    let view = entity.view();

    #[cfg(debug_assertions)]
    {
        if let Ok(value) = serde_json::to_value(&view) {
            assert_no_forbidden_keys(&value);
        }
    }

    view
}

/// Walk a serialized payload and panic on any forbidden key.
///
/// Called unconditionally from tests; `project` runs it under
/// `debug_assertions` only.
pub fn assert_no_forbidden_keys(value: &Value) {
    walk(value, &mut Vec::new());
}

fn walk(value: &Value, path: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let forbidden = FORBIDDEN_KEYS.contains(&key.as_str())
                    || FORBIDDEN_PREFIXES.iter().any(|p| key.starts_with(p));
                if forbidden {
                    path.push(key.clone());
                    panic!("forbidden key in public projection: {}", path.join("."));
                }
                path.push(key.clone());
                walk(child, path);
                path.pop();
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, path);
            }
        }
        _ => {}
    }
}
