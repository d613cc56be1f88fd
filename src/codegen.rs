//! Model emission: render an inferred schema as type declarations in one of
//! six target languages. Pure tree transforms, no I/O.

pub mod csharp;
pub mod go;
pub mod java;
pub mod kotlin;
pub mod python;
pub mod typescript;

use clap::ValueEnum;

use crate::error::{parse_json, ModelError};
use crate::schema::{build_schema, pascal_case, ObjectDef, TypeNode};

/// Closed set of emission targets; adding one forces every `match` below to
/// acknowledge it.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelLanguage {
    Typescript,
    Csharp,
    Java,
    Python,
    Kotlin,
    Go,
}

/// Shared backend contract: render each definition as a declaration, each
/// type node as a reference. When `defs` is empty the root was a primitive or
/// an array of primitives; emit a single wrapper named from `root_name`.
/// Otherwise emit `defs` in order and ignore `root`/`root_name` — the root is
/// always the first definition pushed during inference.
pub trait ModelRenderer {
    fn render(&self, root: &TypeNode, defs: &[ObjectDef], root_name: &str) -> String;
}

pub fn render_model(
    language: ModelLanguage,
    root: &TypeNode,
    defs: &[ObjectDef],
    root_name: &str,
) -> String {
    match language {
        ModelLanguage::Typescript => typescript::TypeScript.render(root, defs, root_name),
        ModelLanguage::Csharp => csharp::CSharp.render(root, defs, root_name),
        ModelLanguage::Java => java::Java.render(root, defs, root_name),
        ModelLanguage::Python => python::Python.render(root, defs, root_name),
        ModelLanguage::Kotlin => kotlin::Kotlin.render(root, defs, root_name),
        ModelLanguage::Go => go::Go.render(root, defs, root_name),
    }
}

/// Parse, infer, render. Syntax failures come back wrapped so the caller can
/// tell "bad model input" apart from resolver-side parse errors.
pub fn generate_model_from_json(
    text: &str,
    language: ModelLanguage,
    root_name: &str,
) -> Result<String, ModelError> {
    let value = parse_json(text).map_err(|err| ModelError::ModelGeneration(Box::new(err)))?;
    let schema = build_schema(&value, root_name);
    Ok(render_model(language, &schema.root, &schema.defs, root_name))
}

// ----------------------------- Shared helpers ----------------------------- //

pub(crate) fn wrapper_name(root_name: &str) -> String {
    let name = pascal_case(root_name);
    if name.is_empty() { "Model".to_string() } else { name }
}

/// Visit every type node a backend will render: the field types when `defs`
/// is non-empty, the wrapper's root type otherwise, recursing through array
/// elements and union operands. Backends use this to decide imports.
pub(crate) fn visit_type_nodes<'a>(
    root: &'a TypeNode,
    defs: &'a [ObjectDef],
    visit: &mut impl FnMut(&'a TypeNode),
) {
    fn walk<'a>(node: &'a TypeNode, visit: &mut impl FnMut(&'a TypeNode)) {
        visit(node);
        match node {
            TypeNode::Array(elem) => walk(elem, visit),
            TypeNode::Union(options) => {
                for option in options {
                    walk(option, visit);
                }
            }
            _ => {}
        }
    }
    if defs.is_empty() {
        walk(root, visit);
    } else {
        for def in defs {
            for field in &def.fields {
                walk(&field.ty, visit);
            }
        }
    }
}

pub(crate) fn uses_array(root: &TypeNode, defs: &[ObjectDef]) -> bool {
    let mut found = false;
    visit_type_nodes(root, defs, &mut |node| {
        found |= matches!(node, TypeNode::Array(_));
    });
    found
}

// ------------------------------- Tests ------------------------------------ //
