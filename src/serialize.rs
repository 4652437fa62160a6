//! Props → embeddable source literal.
//!
//! The emitter treats serialization as a black box behind [`PropsSerializer`].
//! Whatever implementation is plugged in must produce a literal that, parsed
//! by a JS engine, is deeply equal to the input for every JSON-compatible
//! value, and must be safe to place inside an inline `<script>`.

use serde_json::Value;
use thiserror::Error;

use crate::utils::escape_script_sensitive;

/// Failure to turn a props value into source text.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("props are not JSON-serializable: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported props value: {0}")]
    Unsupported(String),
}

/// Converts a props value into a JS source literal.
pub trait PropsSerializer: Send + Sync {
    fn serialize(&self, props: &Value) -> Result<String, SerializeError>;
}

impl<F> PropsSerializer for F
where
    F: Fn(&Value) -> Result<String, SerializeError> + Send + Sync,
{
    fn serialize(&self, props: &Value) -> Result<String, SerializeError> {
        self(props)
    }
}

/// Default serializer: compact JSON with script-sensitive characters escaped.
///
/// JSON is a subset of JS expression syntax, and the escaping only rewrites
/// characters inside string literals into `\uXXXX` form, so the literal stays
/// valid JSON as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLiteralSerializer;

impl PropsSerializer for JsonLiteralSerializer {
    fn serialize(&self, props: &Value) -> Result<String, SerializeError> {
        let json = serde_json::to_string(props)?;
        Ok(escape_script_sensitive(&json))
    }
}
