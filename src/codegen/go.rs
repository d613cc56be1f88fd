//! Go backend: structs with json tags, tab indentation. Unions, nulls, and
//! unknowns render as `any`.

use super::{wrapper_name, ModelRenderer};
use crate::schema::{pascal_case, ObjectDef, PrimitiveKind, TypeNode};

pub struct Go;

impl ModelRenderer for Go {
    fn render(&self, root: &TypeNode, defs: &[ObjectDef], root_name: &str) -> String {
        if defs.is_empty() {
            return format!("type {} {}\n", wrapper_name(root_name), type_ref(root));
        }
        let mut out = String::new();
        for (i, def) in defs.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("type {} struct {{\n", def.name));
            for field in &def.fields {
                out.push_str(&format!(
                    "\t{} {} `json:{:?}`\n",
                    exported_name(&field.field_name),
                    type_ref(&field.ty),
                    field.json_key
                ));
            }
            out.push_str("}\n");
        }
        out
    }
}

fn exported_name(field_name: &str) -> String {
    let name = pascal_case(field_name);
    if name.is_empty() { "Value".to_string() } else { name }
}

fn type_ref(node: &TypeNode) -> String {
    match node {
        TypeNode::Primitive(kind) => match kind {
            PrimitiveKind::String => "string".into(),
            PrimitiveKind::Integer => "int64".into(),
            PrimitiveKind::Number => "float64".into(),
            PrimitiveKind::Boolean => "bool".into(),
            PrimitiveKind::Null | PrimitiveKind::Unknown => "any".into(),
        },
        TypeNode::Array(elem) => format!("[]{}", type_ref(elem)),
        TypeNode::ObjectRef(name) => name.clone(),
        TypeNode::Union(_) => "any".into(),
    }
}

#[cfg(test)]
mod tests {
    use crate::codegen::{generate_model_from_json, ModelLanguage};

    #[test]
    fn structs_carry_json_tags() {
        let out = generate_model_from_json(
            r#"{"first_name": "x", "age": 3}"#,
            ModelLanguage::Go,
            "Usuario",
        )
        .unwrap();
        assert!(out.contains("type Usuario struct {"), "got: {out}");
        assert!(out.contains("\tFirstName string `json:\"first_name\"`\n"), "got: {out}");
        assert!(out.contains("\tAge int64 `json:\"age\"`\n"), "got: {out}");
    }

    #[test]
    fn slices_and_unions() {
        let out = generate_model_from_json(
            r#"{"ids": [1, 2], "mixed": [1, "x"]}"#,
            ModelLanguage::Go,
            "Doc",
        )
        .unwrap();
        assert!(out.contains("Ids []int64"), "got: {out}");
        assert!(out.contains("Mixed []any"), "got: {out}");
    }

    #[test]
    fn scalar_root_becomes_named_type() {
        let out = generate_model_from_json("[1.5]", ModelLanguage::Go, "ratios").unwrap();
        assert_eq!(out, "type Ratios []float64\n");
    }
}
