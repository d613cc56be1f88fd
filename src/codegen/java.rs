//! Java backend: plain public-field classes. Primitive scalars stay unboxed
//! at field positions and box inside generics.

use super::{uses_array, wrapper_name, ModelRenderer};
use crate::schema::{ObjectDef, PrimitiveKind, TypeNode};

pub struct Java;

impl ModelRenderer for Java {
    fn render(&self, root: &TypeNode, defs: &[ObjectDef], root_name: &str) -> String {
        let mut out = String::new();
        if uses_array(root, defs) {
            out.push_str("import java.util.List;\n\n");
        }

        if defs.is_empty() {
            out.push_str(&format!(
                "public class {} {{\n    public {} value;\n}}\n",
                wrapper_name(root_name),
                field_type(root)
            ));
            return out;
        }

        for (i, def) in defs.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("public class {} {{\n", def.name));
            for field in &def.fields {
                out.push_str(&format!(
                    "    public {} {};\n",
                    field_type(&field.ty),
                    field.field_name
                ));
            }
            out.push_str("}\n");
        }
        out
    }
}

fn field_type(node: &TypeNode) -> String {
    match node {
        TypeNode::Primitive(kind) => match kind {
            PrimitiveKind::String => "String".into(),
            PrimitiveKind::Integer => "long".into(),
            PrimitiveKind::Number => "double".into(),
            PrimitiveKind::Boolean => "boolean".into(),
            PrimitiveKind::Null | PrimitiveKind::Unknown => "Object".into(),
        },
        TypeNode::Array(elem) => format!("List<{}>", boxed_type(elem)),
        TypeNode::ObjectRef(name) => name.clone(),
        TypeNode::Union(_) => "Object".into(),
    }
}

fn boxed_type(node: &TypeNode) -> String {
    match node {
        TypeNode::Primitive(PrimitiveKind::Integer) => "Long".into(),
        TypeNode::Primitive(PrimitiveKind::Number) => "Double".into(),
        TypeNode::Primitive(PrimitiveKind::Boolean) => "Boolean".into(),
        other => field_type(other),
    }
}
