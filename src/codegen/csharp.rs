//! C# backend: POCO classes with `JsonPropertyName` attributes so the
//! original JSON keys survive round-tripping. Unions degrade to `object`.

use super::{uses_array, wrapper_name, ModelRenderer};
use crate::schema::{pascal_case, ObjectDef, PrimitiveKind, TypeNode};

pub struct CSharp;

impl ModelRenderer for CSharp {
    fn render(&self, root: &TypeNode, defs: &[ObjectDef], root_name: &str) -> String {
        let mut out = String::new();
        if uses_array(root, defs) {
            out.push_str("using System.Collections.Generic;\n");
        }
        if !defs.is_empty() {
            out.push_str("using System.Text.Json.Serialization;\n");
        }
        if !out.is_empty() {
            out.push('\n');
        }

        if defs.is_empty() {
            out.push_str(&format!(
                "public class {}\n{{\n    public {} Value {{ get; set; }}\n}}\n",
                wrapper_name(root_name),
                type_ref(root)
            ));
            return out;
        }

        for (i, def) in defs.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("public class {}\n{{\n", def.name));
            for (j, field) in def.fields.iter().enumerate() {
                if j > 0 {
                    out.push('\n');
                }
                out.push_str(&format!("    [JsonPropertyName({:?})]\n", field.json_key));
                out.push_str(&format!(
                    "    public {} {} {{ get; set; }}\n",
                    type_ref(&field.ty),
                    property_name(&field.field_name)
                ));
            }
            out.push_str("}\n");
        }
        out
    }
}

fn property_name(field_name: &str) -> String {
    let name = pascal_case(field_name);
    if name.is_empty() { "Value".to_string() } else { name }
}

fn type_ref(node: &TypeNode) -> String {
    match node {
        TypeNode::Primitive(kind) => match kind {
            PrimitiveKind::String => "string".into(),
            PrimitiveKind::Integer => "long".into(),
            PrimitiveKind::Number => "double".into(),
            PrimitiveKind::Boolean => "bool".into(),
            PrimitiveKind::Null | PrimitiveKind::Unknown => "object".into(),
        },
        TypeNode::Array(elem) => format!("List<{}>", type_ref(elem)),
        TypeNode::ObjectRef(name) => name.clone(),
        // No native unions; fall back to the any-equivalent.
        TypeNode::Union(_) => "object".into(),
    }
}

#[cfg(test)]
mod tests {
    use crate::codegen::{generate_model_from_json, ModelLanguage};

    #[test]
    fn classes_carry_json_property_names() {
        let out = generate_model_from_json(
            r#"{"first_name": "x", "age": 3}"#,
            ModelLanguage::Csharp,
            "Usuario",
        )
        .unwrap();
        assert!(out.contains("public class Usuario"), "got: {out}");
        assert!(out.contains("[JsonPropertyName(\"first_name\")]"), "got: {out}");
        assert!(out.contains("public string FirstName { get; set; }"), "got: {out}");
        assert!(out.contains("public long Age { get; set; }"), "got: {out}");
    }

    #[test]
    fn array_fields_use_generic_lists() {
        let out = generate_model_from_json(
            r#"{"scores": [1.5, 2.5]}"#,
            ModelLanguage::Csharp,
            "Doc",
        )
        .unwrap();
        assert!(out.starts_with("using System.Collections.Generic;\n"), "got: {out}");
        assert!(out.contains("public List<double> Scores { get; set; }"), "got: {out}");
    }

    #[test]
    fn scalar_root_wraps_in_value_member() {
        let out = generate_model_from_json("true", ModelLanguage::Csharp, "flag").unwrap();
        assert!(out.contains("public class Flag"), "got: {out}");
        assert!(out.contains("public bool Value { get; set; }"), "got: {out}");
    }
}
