//! Recovery of plain property maps from key/value-pair document encodings.
//!
//! Storage may hand back a layer's `properties` as an ordered list of
//! `{"Key": .., "Value": ..}` pairs instead of a JSON object, sometimes wrapped
//! one level deeper (`[[{"Key":"Key","Value":k},{"Key":"Value","Value":v}], ..]`)
//! and at any depth inside the document (e.g. inside gradient `colors`).
//! The functions here fold those encodings back into objects so the rest of
//! the engine only ever sees a canonical [`PropertyMap`].

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::{Layer, PropertyMap};

const PAIR_KEY: &str = "Key";
const PAIR_VALUE: &str = "Value";

/// Normalize a raw `properties` document into a plain map.
///
/// Anything that does not normalize to an object (null, scalars, plain arrays)
/// yields an empty map, so callers can read fields with defaults directly.
#[must_use]
pub fn normalize_properties(raw: &Value) -> PropertyMap {
    match raw {
        Value::Object(_) | Value::Array(_) => match normalize_value(raw) {
            Value::Object(map) => map,
            _ => PropertyMap::new(),
        },
        _ => PropertyMap::new(),
    }
}

/// Recursively fold key/value-pair lists into objects.
///
/// Arrays are normalized element-wise first and folded afterwards, which is
/// what collapses the double-wrapped encoding: each inner two-pair list turns
/// into `{"Key": k, "Value": v}`, and the outer list of those is then folded.
#[must_use]
pub fn normalize_value(raw: &Value) -> Value {
    match raw {
        Value::Array(items) => {
            let mapped: Vec<Value> = items.iter().map(normalize_value).collect();
            if is_pair_list(&mapped) {
                Value::Object(fold_pairs(mapped))
            } else {
                Value::Array(mapped)
            }
        }
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), normalize_value(value)))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

/// Normalize a layer's property bag. Idempotent.
#[must_use]
pub fn normalize_layer(mut layer: Layer) -> Layer {
    let raw = Value::Object(std::mem::take(&mut layer.properties));
    layer.properties = normalize_properties(&raw);
    layer
}

/// Normalize every layer in a list.
#[must_use]
pub fn normalize_layers(layers: Vec<Layer>) -> Vec<Layer> {
    layers.into_iter().map(normalize_layer).collect()
}

/// Serde adapter that normalizes a `properties` field while deserializing.
///
/// # Errors
///
/// Only fails if the input is not valid JSON for the deserializer.
pub fn deserialize_properties<'de, D>(deserializer: D) -> Result<PropertyMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(normalize_properties(&raw))
}

/// Serde adapter that reads an explicit `null` as the type's default.
///
/// Stored documents write empty lists as `null`; `#[serde(default)]` alone
/// only covers a missing key.
///
/// # Errors
///
/// Fails if a non-null value does not match `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// The first element decides: stored documents are homogeneous, and a partial
// entry further down is dropped rather than turning the whole list back into
// an array.
fn is_pair_list(items: &[Value]) -> bool {
    items.first().is_some_and(is_pair)
}

fn is_pair(item: &Value) -> bool {
    item.as_object()
        .is_some_and(|obj| obj.contains_key(PAIR_KEY) && obj.contains_key(PAIR_VALUE))
}

fn fold_pairs(items: Vec<Value>) -> Map<String, Value> {
    let mut folded = Map::new();
    for item in items {
        let Value::Object(mut entry) = item else {
            tracing::debug!("Dropping non-object entry from key/value list");
            continue;
        };
        let (Some(key), Some(value)) = (entry.remove(PAIR_KEY), entry.remove(PAIR_VALUE)) else {
            tracing::warn!("Dropping partial key/value entry");
            continue;
        };
        match pair_key(&key) {
            Some(name) => {
                folded.insert(name, value);
            }
            None => tracing::debug!("Dropping key/value entry with non-scalar key"),
        }
    }
    folded
}

fn pair_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
