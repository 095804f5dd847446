//! Error type for the render pipeline.
//!
//! None of these reach JavaScript from `renderTree`: the boundary logs them
//! and returns normally, leaving a partial render in place.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures inside a render pass.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("dom operation failed: {0}")]
    Dom(String),

    #[error("no global window or document")]
    NoDocument,

    #[error("invalid tree snapshot: {0}")]
    InvalidTree(String),

    #[error("invalid animation path: {0}")]
    InvalidPath(String),

    #[error("failed to serialize render plan: {0}")]
    Serialize(String),
}

impl From<JsValue> for RenderError {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(message) => RenderError::Dom(message),
            None => RenderError::Dom(format!("{value:?}")),
        }
    }
}

impl From<RenderError> for JsValue {
    fn from(error: RenderError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = RenderError::InvalidTree("missing field `value`".into());
        assert_eq!(err.to_string(), "invalid tree snapshot: missing field `value`");
        assert_eq!(RenderError::NoDocument.to_string(), "no global window or document");
    }
}
