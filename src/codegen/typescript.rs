//! TypeScript backend. Fields keep their original JSON keys (quoted when not
//! a valid identifier); unions are first-class.

use super::{wrapper_name, ModelRenderer};
use crate::schema::{ObjectDef, PrimitiveKind, TypeNode};

pub struct TypeScript;

impl ModelRenderer for TypeScript {
    fn render(&self, root: &TypeNode, defs: &[ObjectDef], root_name: &str) -> String {
        if defs.is_empty() {
            return format!("export type {} = {};\n", wrapper_name(root_name), type_ref(root));
        }
        let mut out = String::new();
        for (i, def) in defs.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("export interface {} {{\n", def.name));
            for field in &def.fields {
                out.push_str(&format!("  {}: {};\n", field_key(&field.json_key), type_ref(&field.ty)));
            }
            out.push_str("}\n");
        }
        out
    }
}

fn type_ref(node: &TypeNode) -> String {
    match node {
        TypeNode::Primitive(kind) => match kind {
            PrimitiveKind::String => "string".into(),
            PrimitiveKind::Integer | PrimitiveKind::Number => "number".into(),
            PrimitiveKind::Boolean => "boolean".into(),
            PrimitiveKind::Null => "null".into(),
            PrimitiveKind::Unknown => "unknown".into(),
        },
        TypeNode::Array(elem) => match elem.as_ref() {
            TypeNode::Union(_) => format!("({})[]", type_ref(elem)),
            other => format!("{}[]", type_ref(other)),
        },
        TypeNode::ObjectRef(name) => name.clone(),
        TypeNode::Union(options) => {
            let parts: Vec<String> = options.iter().map(type_ref).collect();
            parts.join(" | ")
        }
    }
}

fn field_key(json_key: &str) -> String {
    let valid = !json_key.is_empty()
        && json_key
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && json_key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if valid {
        json_key.to_string()
    } else {
        format!("{json_key:?}")
    }
}

#[cfg(test)]
mod tests {
    use crate::codegen::{generate_model_from_json, ModelLanguage};

    #[test]
    fn end_to_end_interface_with_primitive_fields() {
        let out = generate_model_from_json(
            r#"{"name":"Matti","age":30,"active":true}"#,
            ModelLanguage::Typescript,
            "Usuario",
        )
        .unwrap();
        assert!(out.contains("export interface Usuario {"), "got: {out}");
        assert!(out.contains("name: string;"), "got: {out}");
        assert!(out.contains("age: number;"), "got: {out}");
        assert!(out.contains("active: boolean;"), "got: {out}");
    }

    #[test]
    fn floats_and_integers_both_map_to_number() {
        let out = generate_model_from_json(
            r#"{"count": 3, "ratio": 0.5}"#,
            ModelLanguage::Typescript,
            "Stats",
        )
        .unwrap();
        assert!(out.contains("count: number;"));
        assert!(out.contains("ratio: number;"));
    }

    #[test]
    fn union_array_element_is_parenthesized() {
        let out =
            generate_model_from_json(r#"{"vals": [1, "x"]}"#, ModelLanguage::Typescript, "Doc")
                .unwrap();
        assert!(out.contains("vals: (number | string)[];"), "got: {out}");
    }

    #[test]
    fn awkward_keys_are_quoted() {
        let out = generate_model_from_json(
            r#"{"first name": "x"}"#,
            ModelLanguage::Typescript,
            "Doc",
        )
        .unwrap();
        assert!(out.contains("\"first name\": string;"), "got: {out}");
    }

    #[test]
    fn primitive_root_emits_type_alias() {
        let out = generate_model_from_json("[1, 2, 3]", ModelLanguage::Typescript, "ids").unwrap();
        assert_eq!(out, "export type Ids = number[];\n");
    }
}
