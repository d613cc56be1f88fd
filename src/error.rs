//! Error taxonomy for the resolver and the model pipeline.
//!
//! Every failure is a synchronous `Result`; transformations are deterministic,
//! so nothing is retried or swallowed. The CLI layer decides presentation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Input is not well-formed JSON. Keeps serde_json's native message
    /// (which carries line/column) plus the JSON path where decoding stopped.
    #[error("invalid JSON at {path}: {source}")]
    Syntax {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A `$ref`/`ref` value that is neither a `#/` pointer nor a known id.
    #[error("invalid JSON pointer: `{reference}`")]
    InvalidPointer { reference: String },

    /// Pointer segment walk or id lookup came up empty.
    #[error("reference not found: `{reference}`")]
    ReferenceNotFound { reference: String },

    /// The same `$id` bound to two distinct nodes.
    #[error("duplicate $id `{id}`: first seen at {first_path}, again at {second_path}")]
    DuplicateId {
        id: String,
        first_path: String,
        second_path: String,
    },

    /// A reference re-entered while already being resolved.
    #[error("circular reference at {path}: `{reference}` is already being resolved")]
    CircularReference { path: String, reference: String },

    /// Inline override keys exist but the resolved target is not an object.
    #[error("cannot merge inline keys at {path}: target of `{reference}` is not an object")]
    MergeTarget { path: String, reference: String },

    /// The schema/emitter pipeline was handed unparseable input.
    #[error("model generation failed: {0}")]
    ModelGeneration(#[source] Box<ModelError>),
}

/// Parse JSON text with path context in the failure message.
///
/// `serde_path_to_error` tracks how deep the deserializer got before failing;
/// `into_inner` hands back the native serde_json error with line/column intact.
pub fn parse_json(text: &str) -> Result<serde_json::Value, ModelError> {
    let de = &mut serde_json::Deserializer::from_str(text);
    serde_path_to_error::deserialize(de).map_err(|err| {
        let path = err.path().to_string();
        ModelError::Syntax {
            path,
            source: err.into_inner(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_accepts_well_formed_input() {
        let v = parse_json(r#"{"a": [1, 2, 3]}"#).unwrap();
        assert_eq!(v["a"][2], serde_json::json!(3));
    }

    #[test]
    fn parse_json_reports_position_and_path() {
        let err = parse_json(r#"{"outer": {"inner": nope}}"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("invalid JSON"), "got: {msg}");
        assert!(msg.contains("outer"), "path context missing: {msg}");
        assert!(msg.contains("column"), "serde position missing: {msg}");
    }
}
