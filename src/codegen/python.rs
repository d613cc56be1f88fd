//! Python backend: dataclasses with snake_case fields. The `annotations`
//! future import keeps references lazy, so defs emit in declaration order
//! even though parents precede the classes they reference.

use super::{visit_type_nodes, wrapper_name, ModelRenderer};
use crate::schema::{snake_case, ObjectDef, PrimitiveKind, TypeNode};

pub struct Python;

impl ModelRenderer for Python {
    fn render(&self, root: &TypeNode, defs: &[ObjectDef], root_name: &str) -> String {
        let mut out = String::from("from __future__ import annotations\n\n");
        out.push_str("from dataclasses import dataclass\n");
        if let Some(typing) = typing_import(root, defs) {
            out.push_str(&typing);
        }
        out.push('\n');

        if defs.is_empty() {
            out.push_str(&format!(
                "\n@dataclass\nclass {}:\n    value: {}\n",
                wrapper_name(root_name),
                type_ref(root)
            ));
            return out;
        }

        for def in defs {
            out.push_str(&format!("\n@dataclass\nclass {}:\n", def.name));
            if def.fields.is_empty() {
                out.push_str("    pass\n");
            }
            for field in &def.fields {
                out.push_str(&format!(
                    "    {}: {}\n",
                    snake_case(&field.json_key),
                    type_ref(&field.ty)
                ));
            }
        }
        out
    }
}

fn typing_import(root: &TypeNode, defs: &[ObjectDef]) -> Option<String> {
    let (mut any, mut list, mut union) = (false, false, false);
    visit_type_nodes(root, defs, &mut |node| match node {
        TypeNode::Primitive(PrimitiveKind::Unknown) => any = true,
        TypeNode::Array(_) => list = true,
        TypeNode::Union(_) => union = true,
        _ => {}
    });
    let mut names = Vec::new();
    if any {
        names.push("Any");
    }
    if list {
        names.push("List");
    }
    if union {
        names.push("Union");
    }
    if names.is_empty() {
        None
    } else {
        Some(format!("from typing import {}\n", names.join(", ")))
    }
}

fn type_ref(node: &TypeNode) -> String {
    match node {
        TypeNode::Primitive(kind) => match kind {
            PrimitiveKind::String => "str".into(),
            PrimitiveKind::Integer => "int".into(),
            PrimitiveKind::Number => "float".into(),
            PrimitiveKind::Boolean => "bool".into(),
            PrimitiveKind::Null => "None".into(),
            PrimitiveKind::Unknown => "Any".into(),
        },
        TypeNode::Array(elem) => format!("List[{}]", type_ref(elem)),
        TypeNode::ObjectRef(name) => name.clone(),
        TypeNode::Union(options) => {
            let parts: Vec<String> = options.iter().map(type_ref).collect();
            format!("Union[{}]", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::codegen::{generate_model_from_json, ModelLanguage};

    #[test]
    fn dataclasses_use_snake_case_fields() {
        let out = generate_model_from_json(
            r#"{"firstName": "x", "age": 3}"#,
            ModelLanguage::Python,
            "Usuario",
        )
        .unwrap();
        assert!(out.starts_with("from __future__ import annotations\n"), "got: {out}");
        assert!(out.contains("@dataclass\nclass Usuario:\n"), "got: {out}");
        assert!(out.contains("    first_name: str\n"), "got: {out}");
        assert!(out.contains("    age: int\n"), "got: {out}");
    }

    #[test]
    fn typing_imports_only_what_is_used() {
        let out = generate_model_from_json(
            r#"{"vals": [1, "x"], "blob": []}"#,
            ModelLanguage::Python,
            "Doc",
        )
        .unwrap();
        assert!(out.contains("from typing import Any, List, Union\n"), "got: {out}");
        assert!(out.contains("vals: List[Union[int, str]]"), "got: {out}");
        assert!(out.contains("blob: List[Any]"), "got: {out}");
    }

    #[test]
    fn empty_object_emits_pass() {
        let out = generate_model_from_json("{}", ModelLanguage::Python, "Empty").unwrap();
        assert!(out.contains("class Empty:\n    pass\n"), "got: {out}");
    }

    #[test]
    fn scalar_root_wraps_in_value_field() {
        let out = generate_model_from_json("\"hola\"", ModelLanguage::Python, "Saludo").unwrap();
        assert!(out.contains("class Saludo:\n    value: str\n"), "got: {out}");
    }
}
