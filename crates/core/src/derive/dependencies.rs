//! Conditional dependency synthesis
//!
//! A definition that pins a discriminator tag to a single value (an `enum`
//! with exactly one element) implicitly states "my other properties apply
//! only when that tag has that value". This module turns those facts into
//! JSON Schema `dependencies` rules: one `allOf` conjunction per
//! contributing definition, `anyOf` across definitions.

use serde_json::{Map, Value, json};

use super::extract::FieldDefinition;

/// Build the discriminator clauses a definition contributes, scanning
/// `discriminators` in order. A clause is produced for every tag whose
/// property schema declares a single-element `enum`.
pub fn discriminator_clauses(
    properties: &Map<String, Value>,
    discriminators: &[String],
) -> Vec<Value> {
    let mut clauses = Vec::new();

    for tag in discriminators {
        let Some(values) = properties
            .get(tag)
            .and_then(|schema| schema.get("enum"))
            .and_then(Value::as_array)
        else {
            continue;
        };
        if let [value] = values.as_slice() {
            clauses.push(json!({
                "required": [tag],
                "properties": {
                    tag.as_str(): { "type": "string", "const": value }
                }
            }));
        }
    }

    clauses
}

/// Synthesize the `dependencies` mapping for a geometry group.
///
/// Every non-discriminator property of a clause-bearing definition is
/// registered against the conjunction of that definition's clauses. A
/// property with one registered context emits `{"allOf": [...]}`; several
/// contexts emit `{"anyOf": [{"allOf": ...}, ...]}` in encounter order.
/// Definitions without clauses register nothing, leaving their properties
/// unconditionally available. Discriminator tags never depend on themselves.
pub fn synthesize_dependencies(
    definitions: &[FieldDefinition],
    discriminators: &[String],
) -> Map<String, Value> {
    // property name -> one clause set per contributing definition
    let mut contexts: Vec<(String, Vec<Vec<Value>>)> = Vec::new();

    for definition in definitions {
        let clauses = discriminator_clauses(&definition.properties, discriminators);
        if clauses.is_empty() {
            continue;
        }

        for name in definition.properties.keys() {
            if discriminators.iter().any(|tag| tag == name) {
                continue;
            }
            match contexts.iter_mut().find(|(existing, _)| existing == name) {
                Some((_, sets)) => sets.push(clauses.clone()),
                None => contexts.push((name.clone(), vec![clauses.clone()])),
            }
        }
    }

    let mut dependencies = Map::new();
    for (name, mut sets) in contexts {
        let rule = if sets.len() == 1 {
            json!({ "allOf": sets.remove(0) })
        } else {
            let arms: Vec<Value> = sets.into_iter().map(|set| json!({ "allOf": set })).collect();
            json!({ "anyOf": arms })
        };
        dependencies.insert(name, rule);
    }

    dependencies
}
