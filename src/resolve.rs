//! Local `$ref`/`ref` resolution over a parsed JSON document.
//!
//! Resolution is lazy/on-demand against an id index built up front, so forward
//! references (target declared after the referencing node) work in one pass.
//! Cycle detection uses an in-flight stack rather than a visited set: the same
//! id may legitimately resolve many times across parallel branches, only
//! re-entrant resolution is illegal.

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};

use crate::error::{parse_json, ModelError};

/// Where a `$id` was first seen. Borrows the parsed document, so "same node"
/// is pointer equality — the duplicate-id rule distinguishes the identical
/// node from a structurally equal twin.
#[derive(Debug)]
pub struct IdTarget<'a> {
    pub value: &'a Value,
    pub path: String,
}

pub type IdIndex<'a> = IndexMap<String, IdTarget<'a>>;

// ------------------------------ Id index ---------------------------------- //

/// Depth-first scan over objects and arrays (primitives carry no ids).
/// Every object with a string `$id` registers under the raw id and, when the
/// id does not already start with `#`, under `#id` as well.
pub fn collect_id_targets(root: &Value) -> Result<IdIndex<'_>, ModelError> {
    let mut ids = IndexMap::new();
    collect_into(root, "root", &mut ids)?;
    Ok(ids)
}

fn collect_into<'a>(
    value: &'a Value,
    path: &str,
    ids: &mut IdIndex<'a>,
) -> Result<(), ModelError> {
    match value {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_into(item, &format!("{path}[{index}]"), ids)?;
            }
        }
        Value::Object(map) => {
            if let Some(Value::String(id)) = map.get("$id") {
                register_id(ids, id.clone(), value, path)?;
                if !id.starts_with('#') {
                    register_id(ids, format!("#{id}"), value, path)?;
                }
            }
            for (key, child) in map {
                collect_into(child, &format!("{path}.{key}"), ids)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn register_id<'a>(
    ids: &mut IdIndex<'a>,
    id: String,
    value: &'a Value,
    path: &str,
) -> Result<(), ModelError> {
    if let Some(existing) = ids.get(&id) {
        if std::ptr::eq(existing.value, value) {
            return Ok(());
        }
        return Err(ModelError::DuplicateId {
            id,
            first_path: existing.path.clone(),
            second_path: path.to_string(),
        });
    }
    ids.insert(id, IdTarget { value, path: path.to_string() });
    Ok(())
}

// ---------------------------- Target lookup ------------------------------- //

/// `#` is the root; `#/...` walks an RFC-6901 pointer (serde_json handles the
/// `~1`/`~0` unescaping); anything else is an id lookup, raw first, then with
/// a leading `#` stripped.
pub fn resolve_reference_target<'a>(
    root: &'a Value,
    ids: &IdIndex<'a>,
    reference: &str,
) -> Result<&'a Value, ModelError> {
    if reference == "#" {
        return Ok(root);
    }
    if let Some(pointer) = reference.strip_prefix('#') {
        if pointer.starts_with('/') {
            return root.pointer(pointer).ok_or_else(|| ModelError::ReferenceNotFound {
                reference: reference.to_string(),
            });
        }
    }

    if let Some(target) = ids.get(reference) {
        return Ok(target.value);
    }
    let stripped = reference.strip_prefix('#').unwrap_or(reference);
    if let Some(target) = ids.get(stripped) {
        return Ok(target.value);
    }

    // A slash in a non-`#/` reference can never be an id the collector made:
    // it is a malformed pointer, not a missing one.
    if reference.contains('/') {
        return Err(ModelError::InvalidPointer {
            reference: reference.to_string(),
        });
    }
    Err(ModelError::ReferenceNotFound {
        reference: reference.to_string(),
    })
}

// --------------------------- Recursive rewrite ---------------------------- //

/// First of `$ref`, `ref` whose value is a string.
fn reference_key(map: &Map<String, Value>) -> Option<(&'static str, &str)> {
    for key in ["$ref", "ref"] {
        if let Some(Value::String(reference)) = map.get(key) {
            return Some((key, reference));
        }
    }
    None
}

/// Rewrite `value`, replacing every reference node with its resolved target.
///
/// `stack` holds the references currently being resolved; re-pushing one is a
/// cycle. It is scoped to a single top-level call and threaded `&mut` through
/// the recursion — no global state.
pub fn resolve_refs(
    value: &Value,
    root: &Value,
    ids: &IdIndex<'_>,
    stack: &mut IndexSet<String>,
    path: &str,
) -> Result<Value, ModelError> {
    match value {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                out.push(resolve_refs(item, root, ids, stack, &format!("{path}[{index}]"))?);
            }
            Ok(Value::Array(out))
        }
        Value::Object(map) => match reference_key(map) {
            None => {
                let mut out = Map::new();
                for (key, child) in map {
                    out.insert(
                        key.clone(),
                        resolve_refs(child, root, ids, stack, &format!("{path}.{key}"))?,
                    );
                }
                Ok(Value::Object(out))
            }
            Some((ref_key, reference)) => {
                if !stack.insert(reference.to_string()) {
                    return Err(ModelError::CircularReference {
                        path: path.to_string(),
                        reference: reference.to_string(),
                    });
                }
                let target = resolve_reference_target(root, ids, reference)?;
                // Same stack: nested cycles through other ids still trip.
                let resolved = resolve_refs(target, root, ids, stack, path)?;
                // The inline overrides live in the referencing object, not the
                // target; they resolve after the entry is popped so a sibling
                // may re-reference the same target without tripping the guard.
                stack.pop();

                if map.len() == 1 {
                    Ok(resolved)
                } else {
                    let Value::Object(target_fields) = resolved else {
                        return Err(ModelError::MergeTarget {
                            path: path.to_string(),
                            reference: reference.to_string(),
                        });
                    };
                    // Shallow merge, inline keys win on collision.
                    let mut merged = target_fields;
                    for (key, child) in map {
                        if key.as_str() == ref_key {
                            continue;
                        }
                        merged.insert(
                            key.clone(),
                            resolve_refs(child, root, ids, stack, &format!("{path}.{key}"))?,
                        );
                    }
                    Ok(Value::Object(merged))
                }
            }
        },
        primitive => Ok(primitive.clone()),
    }
}

// ------------------------------ Entry point ------------------------------- //

/// Parse `text`, build the id index once, and either return the tree unchanged
/// or resolve every reference from the root.
pub fn parse_and_format_json(text: &str, resolve: bool) -> Result<Value, ModelError> {
    let value = parse_json(text)?;
    if !resolve {
        return Ok(value);
    }
    let ids = collect_id_targets(&value)?;
    let mut stack = IndexSet::new();
    resolve_refs(&value, &value, &ids, &mut stack, "root")
}

/// Convenience for the CLI: resolved (or passthrough) tree as 2-space-indented
/// text, key order preserved.
pub fn format_json(text: &str, resolve: bool) -> Result<String, ModelError> {
    let value = parse_and_format_json(text, resolve)?;
    // Value has string keys and an infallible Serialize impl; re-serializing
    // a tree that just came out of the parser cannot fail.
    Ok(serde_json::to_string_pretty(&value)
        .expect("pretty-printing a parsed serde_json::Value is infallible"))
}

// ------------------------------- Tests ------------------------------------ //
