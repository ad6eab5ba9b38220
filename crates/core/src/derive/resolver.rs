//! Document-local `$ref` resolution and inlining
//!
//! References take the form `<anything>#<json-pointer>`; everything before
//! the `#` is ignored, the fragment is resolved against the document root.
//! Inlining replaces every `$ref` node with its fully resolved target while
//! letting sibling keys override same-named keys from the target.

use serde_json::{Map, Value};

use super::error::DeriveError;

/// Resolve a `$ref` string to the value it points at within `document`.
///
/// The fragment after `#` is stripped of leading slashes, split on `/`, and
/// unescaped (`~1` to `/`, `~0` to `~`) before walking the document key by
/// key. Array segments are interpreted as indices.
pub fn resolve_pointer<'a>(document: &'a Value, reference: &str) -> Result<&'a Value, DeriveError> {
    let Some(hash) = reference.find('#') else {
        return Err(DeriveError::UnsupportedReference {
            reference: reference.to_string(),
        });
    };

    let fragment = reference[hash + 1..].trim_start_matches('/');

    let mut current = document;
    for segment in fragment.split('/').filter(|s| !s.is_empty()) {
        let key = segment.replace("~1", "/").replace("~0", "~");
        current = match current {
            Value::Object(map) => map.get(&key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
        .ok_or_else(|| DeriveError::UnresolvedReference {
            reference: reference.to_string(),
        })?;
    }

    Ok(current)
}

/// Return the final path segment of a reference, e.g.
/// `"#/definitions/GeoJSON.LineString"` yields `"GeoJSON.LineString"`.
pub fn last_pointer_segment(reference: &str) -> &str {
    let fragment = reference.rsplit('#').next().unwrap_or(reference);
    fragment
        .rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or(fragment)
}

/// Produce a structurally equivalent value with every `$ref` node replaced
/// by its fully resolved, recursively inlined target.
///
/// Sibling keys present alongside `$ref` take precedence over same-named
/// keys of the resolved target, and the merged result is inlined again to
/// catch references introduced by the target or the override. Re-entering a
/// reference that is currently being inlined fails with
/// [`DeriveError::CyclicReference`] rather than recursing without bound.
pub fn inline_refs(document: &Value, node: &Value) -> Result<Value, DeriveError> {
    let mut chain = Vec::new();
    inline_value(document, node, &mut chain)
}

fn inline_value(
    document: &Value,
    node: &Value,
    chain: &mut Vec<String>,
) -> Result<Value, DeriveError> {
    match node {
        Value::Array(items) => {
            let inlined = items
                .iter()
                .map(|item| inline_value(document, item, chain))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(inlined))
        }
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("$ref") {
                return inline_reference(document, reference, map, chain);
            }

            let mut inlined = Map::with_capacity(map.len());
            for (key, value) in map {
                inlined.insert(key.clone(), inline_value(document, value, chain)?);
            }
            Ok(Value::Object(inlined))
        }
        other => Ok(other.clone()),
    }
}

fn inline_reference(
    document: &Value,
    reference: &str,
    node: &Map<String, Value>,
    chain: &mut Vec<String>,
) -> Result<Value, DeriveError> {
    if chain.iter().any(|seen| seen == reference) {
        return Err(DeriveError::CyclicReference {
            reference: reference.to_string(),
        });
    }

    let target = resolve_pointer(document, reference)?;

    // Target keys first, then siblings override, then inline the merged
    // object as a whole. A non-object target cannot carry sibling overrides
    // and is inlined as-is.
    let merged = match target {
        Value::Object(target_map) => {
            let mut merged = target_map.clone();
            for (key, value) in node {
                if key != "$ref" {
                    merged.insert(key.clone(), value.clone());
                }
            }
            Value::Object(merged)
        }
        other => other.clone(),
    };

    chain.push(reference.to_string());
    let inlined = inline_value(document, &merged, chain);
    chain.pop();
    inlined
}
