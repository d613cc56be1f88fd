//! Kotlin backend: data classes with lowerCamel properties. Unions and nulls
//! degrade to `Any?`.

use super::{wrapper_name, ModelRenderer};
use crate::schema::{ObjectDef, PrimitiveKind, TypeNode};

pub struct Kotlin;

impl ModelRenderer for Kotlin {
    fn render(&self, root: &TypeNode, defs: &[ObjectDef], root_name: &str) -> String {
        if defs.is_empty() {
            return format!(
                "data class {}(\n    val value: {},\n)\n",
                wrapper_name(root_name),
                type_ref(root)
            );
        }
        let mut out = String::new();
        for (i, def) in defs.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            // A data class needs at least one property.
            if def.fields.is_empty() {
                out.push_str(&format!("class {}\n", def.name));
                continue;
            }
            out.push_str(&format!("data class {}(\n", def.name));
            for field in &def.fields {
                out.push_str(&format!(
                    "    val {}: {},\n",
                    field.field_name,
                    type_ref(&field.ty)
                ));
            }
            out.push_str(")\n");
        }
        out
    }
}

fn type_ref(node: &TypeNode) -> String {
    match node {
        TypeNode::Primitive(kind) => match kind {
            PrimitiveKind::String => "String".into(),
            PrimitiveKind::Integer => "Long".into(),
            PrimitiveKind::Number => "Double".into(),
            PrimitiveKind::Boolean => "Boolean".into(),
            PrimitiveKind::Null | PrimitiveKind::Unknown => "Any?".into(),
        },
        TypeNode::Array(elem) => format!("List<{}>", type_ref(elem)),
        TypeNode::ObjectRef(name) => name.clone(),
        TypeNode::Union(_) => "Any?".into(),
    }
}
