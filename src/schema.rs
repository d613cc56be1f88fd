//! Structural schema inference: one JSON value in, a typed tree plus a flat,
//! deduplicated list of named object definitions out. No serde_json::Value
//! escapes this module's output types.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    String,
    Integer,
    Number,
    Boolean,
    Null,
    Unknown,
}

impl PrimitiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeNode {
    Primitive(PrimitiveKind),
    Array(Box<TypeNode>),
    /// A back-reference to a named definition, never an ownership edge.
    ObjectRef(String),
    /// Operands deduplicated by structural signature.
    Union(Vec<TypeNode>),
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldDef {
    /// Original key, preserved for serialization round-tripping.
    pub json_key: String,
    /// lowerCamel base name; each backend re-cases it.
    pub field_name: String,
    pub ty: TypeNode,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub root: TypeNode,
    /// Flat, append-only; a parent def precedes the defs allocated while
    /// recursing into it, so targets needing declaration order can emit as-is.
    pub defs: Vec<ObjectDef>,
}

// ------------------------------ Inference --------------------------------- //

pub fn build_schema(value: &Value, root_name: &str) -> Schema {
    let mut builder = SchemaBuilder::default();
    let root = builder.infer(value, root_name);
    Schema { root, defs: builder.defs }
}

#[derive(Default)]
struct SchemaBuilder {
    defs: Vec<ObjectDef>,
    used_names: IndexSet<String>,
    /// (name hint, raw shape) -> allocated name. Structurally identical
    /// objects sharing a hint (array elements) collapse to one definition;
    /// objects under different hints never merge even when shaped alike.
    memo: IndexMap<(String, String), String>,
}

impl SchemaBuilder {
    fn infer(&mut self, value: &Value, name_hint: &str) -> TypeNode {
        match value {
            Value::Null => TypeNode::Primitive(PrimitiveKind::Null),
            Value::Bool(_) => TypeNode::Primitive(PrimitiveKind::Boolean),
            Value::Number(n) => TypeNode::Primitive(classify_number(n)),
            Value::String(_) => TypeNode::Primitive(PrimitiveKind::String),
            Value::Array(items) => {
                if items.is_empty() {
                    return TypeNode::Array(Box::new(TypeNode::Primitive(PrimitiveKind::Unknown)));
                }
                let item_hint = format!("{name_hint}Item");
                let mut merged: Option<TypeNode> = None;
                for item in items {
                    let ty = self.infer(item, &item_hint);
                    merged = Some(match merged {
                        None => ty,
                        Some(acc) => merge_type_nodes(acc, ty),
                    });
                }
                TypeNode::Array(Box::new(merged.unwrap()))
            }
            Value::Object(map) => {
                let memo_key = (name_hint.to_string(), shape_signature(value));
                if let Some(name) = self.memo.get(&memo_key) {
                    return TypeNode::ObjectRef(name.clone());
                }

                let name = make_unique_name(name_hint, &mut self.used_names);
                self.memo.insert(memo_key, name.clone());

                // Reserve the slot before recursing so this def precedes any
                // nested defs it causes.
                let index = self.defs.len();
                self.defs.push(ObjectDef { name: name.clone(), fields: Vec::new() });

                let mut fields = Vec::with_capacity(map.len());
                for (key, child) in map {
                    let child_hint = format!("{name}{}", pascal_case(key));
                    let ty = self.infer(child, &child_hint);
                    fields.push(FieldDef {
                        json_key: key.clone(),
                        field_name: camel_case(key),
                        ty,
                    });
                }
                self.defs[index].fields = fields;
                TypeNode::ObjectRef(name)
            }
        }
    }
}

fn classify_number(n: &serde_json::Number) -> PrimitiveKind {
    if n.is_i64() || n.is_u64() {
        return PrimitiveKind::Integer;
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 => PrimitiveKind::Integer,
        Some(_) => PrimitiveKind::Number,
        None => PrimitiveKind::Unknown,
    }
}

/// Canonical fingerprint of a raw JSON value's shape (keys and kinds, not
/// literal values). Drives the array-element collapse in `SchemaBuilder`.
fn shape_signature(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(_) => "boolean".into(),
        Value::Number(n) => classify_number(n).as_str().into(),
        Value::String(_) => "string".into(),
        Value::Array(items) => {
            // Element shapes fold the way `merge_type_nodes` folds element
            // types: deduplicated and order-independent, so `[1]` and `[1, 2]`
            // sign alike and still collapse to one definition.
            let mut inner: Vec<String> = Vec::new();
            for item in items {
                let sig = shape_signature(item);
                if !inner.contains(&sig) {
                    inner.push(sig);
                }
            }
            inner.sort();
            format!("array:[{}]", inner.join(","))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{k}={}", shape_signature(v)))
                .collect();
            format!("object:{{{}}}", inner.join(","))
        }
    }
}

// ------------------------------- Merging ---------------------------------- //

/// Signature of an *inferred* type. Object identity is the assigned name:
/// two structurally identical but separately-named defs do not merge.
pub fn signature(node: &TypeNode) -> String {
    match node {
        TypeNode::Primitive(kind) => kind.as_str().to_string(),
        TypeNode::Array(elem) => format!("array:{}", signature(elem)),
        TypeNode::ObjectRef(name) => format!("object:{name}"),
        TypeNode::Union(options) => {
            let mut sigs: Vec<String> = options.iter().map(signature).collect();
            sigs.sort();
            format!("union:{}", sigs.join("|"))
        }
    }
}

/// Fold two inferred types into one. Equal signatures collapse to `a`;
/// otherwise union operands are flattened and deduplicated, and a one-operand
/// union collapses back to the operand.
pub fn merge_type_nodes(a: TypeNode, b: TypeNode) -> TypeNode {
    if signature(&a) == signature(&b) {
        return a;
    }
    let mut options: Vec<TypeNode> = match a {
        TypeNode::Union(operands) => operands,
        other => vec![other],
    };
    let incoming = match b {
        TypeNode::Union(operands) => operands,
        other => vec![other],
    };
    for candidate in incoming {
        let candidate_sig = signature(&candidate);
        if !options.iter().any(|o| signature(o) == candidate_sig) {
            options.push(candidate);
        }
    }
    if options.len() == 1 {
        options.pop().unwrap()
    } else {
        TypeNode::Union(options)
    }
}

// -------------------------------- Naming ---------------------------------- //

/// PascalCase-normalize `suggestion`; `Model` when nothing survives; smallest
/// free numeric suffix >= 2 on collision. Marks the result used.
pub fn make_unique_name(suggestion: &str, used_names: &mut IndexSet<String>) -> String {
    let base = {
        let normalized = pascal_case(suggestion);
        if normalized.is_empty() { "Model".to_string() } else { normalized }
    };
    let name = if used_names.contains(&base) {
        let mut n = 2usize;
        loop {
            let candidate = format!("{base}{n}");
            if !used_names.contains(&candidate) {
                break candidate;
            }
            n += 1;
        }
    } else {
        base
    };
    used_names.insert(name.clone());
    name
}

/// Strip non-alphanumerics, split, capitalize each chunk, concatenate.
pub fn pascal_case(input: &str) -> String {
    input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            let mut chars = chunk.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

pub fn camel_case(input: &str) -> String {
    let pascal = pascal_case(input);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => "field".to_string(),
    }
}

pub fn snake_case(input: &str) -> String {
    let pascal = pascal_case(input);
    if pascal.is_empty() {
        return "field".to_string();
    }
    let mut out = String::with_capacity(pascal.len() + 4);
    for (i, c) in pascal.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ref_name(node: &TypeNode) -> &str {
        match node {
            TypeNode::ObjectRef(name) => name,
            other => panic!("expected ObjectRef, got {other:?}"),
        }
    }

    #[test]
    fn nested_objects_get_parent_prefixed_names() {
        let v = json!({"profile": {"address": {"city": "X"}}});
        let schema = build_schema(&v, "Usuario");
        let names: Vec<&str> = schema.defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Usuario", "UsuarioProfile", "UsuarioProfileAddress"]);

        // Each parent references its child def by name.
        assert_eq!(ref_name(&schema.defs[0].fields[0].ty), "UsuarioProfile");
        assert_eq!(ref_name(&schema.defs[1].fields[0].ty), "UsuarioProfileAddress");
    }

    #[test]
    fn primitives_classify_by_kind() {
        let v = json!({"name": "Matti", "age": 30, "score": 4.5, "active": true, "gone": null});
        let schema = build_schema(&v, "Usuario");
        let kinds: Vec<&TypeNode> = schema.defs[0].fields.iter().map(|f| &f.ty).collect();
        assert_eq!(*kinds[0], TypeNode::Primitive(PrimitiveKind::String));
        assert_eq!(*kinds[1], TypeNode::Primitive(PrimitiveKind::Integer));
        assert_eq!(*kinds[2], TypeNode::Primitive(PrimitiveKind::Number));
        assert_eq!(*kinds[3], TypeNode::Primitive(PrimitiveKind::Boolean));
        assert_eq!(*kinds[4], TypeNode::Primitive(PrimitiveKind::Null));
    }

    #[test]
    fn whole_valued_float_counts_as_integer() {
        let schema = build_schema(&json!(3.0), "N");
        assert_eq!(schema.root, TypeNode::Primitive(PrimitiveKind::Integer));
    }

    #[test]
    fn empty_array_infers_unknown_element() {
        let schema = build_schema(&json!([]), "Empty");
        assert_eq!(
            schema.root,
            TypeNode::Array(Box::new(TypeNode::Primitive(PrimitiveKind::Unknown)))
        );
    }

    #[test]
    fn identical_array_elements_share_one_definition() {
        let v = json!({"items": [{"id": 1}, {"id": 2}, {"id": 3}]});
        let schema = build_schema(&v, "Lista");
        let names: Vec<&str> = schema.defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Lista", "ListaItemsItem"]);
        match &schema.defs[0].fields[0].ty {
            TypeNode::Array(elem) => assert_eq!(ref_name(elem), "ListaItemsItem"),
            other => panic!("expected array field, got {other:?}"),
        }
    }

    #[test]
    fn elements_with_same_inferred_shape_share_a_definition_despite_array_lengths() {
        let v = json!({"items": [{"tags": [1]}, {"tags": [1, 2]}]});
        let schema = build_schema(&v, "Lista");
        let names: Vec<&str> = schema.defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Lista", "ListaItemsItem"]);
        match &schema.defs[0].fields[0].ty {
            TypeNode::Array(elem) => assert_eq!(ref_name(elem), "ListaItemsItem"),
            other => panic!("expected array field, got {other:?}"),
        }
    }

    #[test]
    fn differing_array_elements_union_with_suffixed_names() {
        let v = json!([{"a": 1}, {"b": "x"}]);
        let schema = build_schema(&v, "Mixto");
        let names: Vec<&str> = schema.defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["MixtoItem", "MixtoItem2"]);
        match &schema.root {
            TypeNode::Array(elem) => match elem.as_ref() {
                TypeNode::Union(options) => assert_eq!(options.len(), 2),
                other => panic!("expected union element, got {other:?}"),
            },
            other => panic!("expected array root, got {other:?}"),
        }
    }

    #[test]
    fn mixed_scalar_array_folds_to_union() {
        let schema = build_schema(&json!([1, "x", 2, "y"]), "Vals");
        match &schema.root {
            TypeNode::Array(elem) => {
                assert_eq!(signature(elem), "union:integer|string");
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn union_with_single_survivor_collapses() {
        let merged = merge_type_nodes(
            TypeNode::Union(vec![TypeNode::Primitive(PrimitiveKind::String)]),
            TypeNode::Primitive(PrimitiveKind::String),
        );
        assert_eq!(merged, TypeNode::Primitive(PrimitiveKind::String));
    }

    #[test]
    fn union_signature_is_order_independent() {
        let a = TypeNode::Union(vec![
            TypeNode::Primitive(PrimitiveKind::String),
            TypeNode::Primitive(PrimitiveKind::Integer),
        ]);
        let b = TypeNode::Union(vec![
            TypeNode::Primitive(PrimitiveKind::Integer),
            TypeNode::Primitive(PrimitiveKind::String),
        ]);
        assert_eq!(signature(&a), signature(&b));
    }

    #[test]
    fn unique_names_take_numeric_suffixes() {
        let mut used = IndexSet::new();
        assert_eq!(make_unique_name("user data", &mut used), "UserData");
        assert_eq!(make_unique_name("user-data", &mut used), "UserData2");
        assert_eq!(make_unique_name("user_data", &mut used), "UserData3");
        assert_eq!(make_unique_name("!!!", &mut used), "Model");
    }

    #[test]
    fn casing_helpers_are_deterministic() {
        assert_eq!(pascal_case("first name"), "FirstName");
        assert_eq!(camel_case("first-name"), "firstName");
        assert_eq!(snake_case("firstName"), "first_name");
        assert_eq!(snake_case("HTTPCode"), "h_t_t_p_code");
    }

    #[test]
    fn inference_is_deterministic() {
        let v = json!({"a": [{"x": 1}, {"x": 2}], "b": {"c": [1, "s"]}});
        let one = serde_json::to_string(&build_schema(&v, "Root")).unwrap();
        let two = serde_json::to_string(&build_schema(&v, "Root")).unwrap();
        assert_eq!(one, two);
    }
}
