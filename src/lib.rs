//! # Slinkity Loader
//!
//! Build-time generator for island loader scripts. For every mount point on
//! a page it emits one inline `<script type="module">` that imports a
//! client-side loader and hands it the component, renderer, props and
//! pre-rendered children to hydrate into
//! `slinkity-mount-point[data-s-id="<id>"]`.
//!
//! Generation is pure: the same inputs always produce the same bytes, and
//! nothing here touches the filesystem except [`LoaderRegistry::from_path`].

pub mod directive;
pub mod emit;
pub mod imports;
pub mod registry;
pub mod script;
pub mod serialize;
pub mod utils;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub use directive::{decode, LoaderDirective};
pub use emit::{emit, emit_with_diagnostics, emit_with_serializer, EmitOutput};
pub use registry::{LoaderRegistry, LoaderStrategy, ModuleRef};
pub use serialize::{JsonLiteralSerializer, PropsSerializer, SerializeError};

// ---------------------------------------------------------------------------
// MountContext
// ---------------------------------------------------------------------------

/// Everything needed to wire one component instance into the page.
#[derive(Debug, Clone, PartialEq)]
pub struct MountContext {
    /// Unique per page. Used as DOM selector key and binding-name suffix.
    pub id: String,
    /// Path to the component module.
    pub component_path: String,
    /// Path to the client renderer module for the component's framework.
    pub renderer_path: String,
    /// Props handed to the component on hydration.
    pub props: Value,
    /// Pre-rendered child markup. `None` is emitted as an empty string.
    pub children: Option<String>,
}

impl MountContext {
    pub fn new(
        id: impl Into<String>,
        component_path: impl Into<String>,
        renderer_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            component_path: component_path.into(),
            renderer_path: renderer_path.into(),
            props: Value::Object(Map::new()),
            children: None,
        }
    }

    pub fn with_props_value(mut self, props: Value) -> Self {
        self.props = props;
        self
    }

    /// Convert any `Serialize` value into props.
    ///
    /// Fails for values with no JSON representation (e.g. maps with
    /// non-string keys), naming this mount point in the error.
    pub fn with_props<T: Serialize>(mut self, props: &T) -> Result<Self, ScriptError> {
        self.props =
            serde_json::to_value(props).map_err(|e| ScriptError::PropsSerialization {
                mount_id: self.id.clone(),
                component_path: self.component_path.clone(),
                source: SerializeError::Json(e),
            })?;
        Ok(self)
    }

    pub fn with_children(mut self, children: impl Into<String>) -> Self {
        self.children = Some(children.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Diagnostic
// ---------------------------------------------------------------------------

/// A structured diagnostic emitted during generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub context: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

// ---------------------------------------------------------------------------
// ScriptError
// ---------------------------------------------------------------------------

/// Errors that abort generation for a page.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to serialize props for mount {mount_id} ({component_path}): {source}")]
    PropsSerialization {
        mount_id: String,
        component_path: String,
        #[source]
        source: SerializeError,
    },

    #[error("Invalid loader config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
