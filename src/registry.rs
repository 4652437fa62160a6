//! Loader registry: canonical loader name → client module + import strategy.
//!
//! The registry is supplied by build configuration. On the wire each entry is
//! `{ "client": ModuleRef, "isDynamicComponentImport": bool }`; in memory the
//! flag and the module travel together as a [`LoaderStrategy`] so they can
//! never disagree.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::is_js_identifier;
use crate::ScriptError;

// ---------------------------------------------------------------------------
// ModuleRef
// ---------------------------------------------------------------------------

/// Reference to a loader's client-side module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleRef {
    /// Bare module path; the loader is its default export.
    Default(String),
    /// Named export of a module.
    Named {
        #[serde(rename = "name")]
        export: String,
        #[serde(rename = "mod")]
        module: String,
    },
}

impl ModuleRef {
    pub fn default_export(module: impl Into<String>) -> Self {
        Self::Default(module.into())
    }

    pub fn named(export: impl Into<String>, module: impl Into<String>) -> Self {
        Self::Named {
            export: export.into(),
            module: module.into(),
        }
    }

    /// The module specifier, regardless of export style.
    pub fn module(&self) -> &str {
        match self {
            Self::Default(module) => module,
            Self::Named { module, .. } => module,
        }
    }

    fn validate(&self, loader: &str) -> Result<(), ScriptError> {
        if self.module().trim().is_empty() {
            return Err(ScriptError::Config(format!(
                "loader '{}' has an empty client module path",
                loader
            )));
        }
        if let Self::Named { export, .. } = self {
            if !is_js_identifier(export) {
                return Err(ScriptError::Config(format!(
                    "loader '{}' names export '{}', which is not a valid identifier",
                    loader, export
                )));
            }
        }
        Ok(())
    }
}

impl From<&str> for ModuleRef {
    fn from(module: &str) -> Self {
        Self::Default(module.to_string())
    }
}

// ---------------------------------------------------------------------------
// LoaderStrategy
// ---------------------------------------------------------------------------

/// How a loader wants the component and renderer modules delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ComponentLoaderConfig", into = "ComponentLoaderConfig")]
pub enum LoaderStrategy {
    /// Component and renderer are imported at the top of the script.
    Eager(ModuleRef),
    /// Component and renderer are fetched only when the loader fires.
    Dynamic(ModuleRef),
}

impl LoaderStrategy {
    /// The loader's own client module.
    pub fn client(&self) -> &ModuleRef {
        match self {
            Self::Eager(client) | Self::Dynamic(client) => client,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }
}

/// Wire shape of one registry entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ComponentLoaderConfig {
    client: ModuleRef,
    #[serde(default)]
    is_dynamic_component_import: bool,
}

impl From<ComponentLoaderConfig> for LoaderStrategy {
    fn from(config: ComponentLoaderConfig) -> Self {
        if config.is_dynamic_component_import {
            Self::Dynamic(config.client)
        } else {
            Self::Eager(config.client)
        }
    }
}

impl From<LoaderStrategy> for ComponentLoaderConfig {
    fn from(strategy: LoaderStrategy) -> Self {
        let is_dynamic_component_import = strategy.is_dynamic();
        let client = match strategy {
            LoaderStrategy::Eager(client) | LoaderStrategy::Dynamic(client) => client,
        };
        Self {
            client,
            is_dynamic_component_import,
        }
    }
}

// ---------------------------------------------------------------------------
// LoaderRegistry
// ---------------------------------------------------------------------------

/// Read-only map of loader names available to a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoaderRegistry {
    loaders: BTreeMap<String, LoaderStrategy>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a registry from its JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        let registry: Self = serde_json::from_str(json)?;
        registry.validate()?;
        Ok(registry)
    }

    /// Load a registry from a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading loader registry");
        Self::from_json_str(&json)
    }

    /// Register a loader, replacing any previous entry of the same name.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        strategy: LoaderStrategy,
    ) -> Result<Option<LoaderStrategy>, ScriptError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ScriptError::Config("loader name must be non-empty".into()));
        }
        strategy.client().validate(&name)?;
        Ok(self.loaders.insert(name, strategy))
    }

    /// Look up a canonical loader name. `None` means "render static only".
    pub fn resolve(&self, name: &str) -> Option<&LoaderStrategy> {
        self.loaders.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.loaders.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    fn validate(&self) -> Result<(), ScriptError> {
        for (name, strategy) in &self.loaders {
            if name.is_empty() {
                return Err(ScriptError::Config("loader name must be non-empty".into()));
            }
            strategy.client().validate(name)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "onClientLoad": { "client": "/_slinkity/onClientLoad.mjs" },
        "onClientVisible": {
            "client": "/_slinkity/onClientVisible.mjs",
            "isDynamicComponentImport": true
        },
        "onClientMedia": {
            "client": { "name": "media", "mod": "/_slinkity/loaders.mjs" },
            "isDynamicComponentImport": false
        }
    }"#;

    #[test]
    fn parses_config_shape() {
        let registry = LoaderRegistry::from_json_str(CONFIG).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.resolve("onClientLoad"),
            Some(&LoaderStrategy::Eager(ModuleRef::default_export(
                "/_slinkity/onClientLoad.mjs"
            )))
        );
        assert_eq!(
            registry.resolve("onClientVisible"),
            Some(&LoaderStrategy::Dynamic(ModuleRef::default_export(
                "/_slinkity/onClientVisible.mjs"
            )))
        );
        assert_eq!(
            registry.resolve("onClientMedia").map(LoaderStrategy::client),
            Some(&ModuleRef::named("media", "/_slinkity/loaders.mjs"))
        );
    }

    #[test]
    fn missing_name_resolves_to_none() {
        let registry = LoaderRegistry::from_json_str(CONFIG).unwrap();
        assert!(registry.resolve("onClientIdle").is_none());
        assert!(registry.resolve("none").is_none());
        assert!(LoaderRegistry::new().resolve("onClientLoad").is_none());
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = LoaderRegistry::from_json_str(
            r#"{ "onClientLoad": { "client": "/a.mjs", "dynamic": true } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScriptError::Json(_)));
    }

    #[test]
    fn rejects_empty_module_path() {
        let err =
            LoaderRegistry::from_json_str(r#"{ "onClientLoad": { "client": " " } }"#).unwrap_err();
        assert!(err.to_string().contains("onClientLoad"));
    }

    #[test]
    fn rejects_bad_export_name() {
        let mut registry = LoaderRegistry::new();
        let err = registry
            .insert(
                "onClientMedia",
                LoaderStrategy::Eager(ModuleRef::named("not-an-ident", "/l.mjs")),
            )
            .unwrap_err();
        assert!(matches!(err, ScriptError::Config(_)));
    }

    #[test]
    fn insert_replaces_previous() {
        let mut registry = LoaderRegistry::new();
        registry
            .insert("onClientIdle", LoaderStrategy::Eager("/a.mjs".into()))
            .unwrap();
        let previous = registry
            .insert("onClientIdle", LoaderStrategy::Dynamic("/b.mjs".into()))
            .unwrap();
        assert_eq!(previous, Some(LoaderStrategy::Eager("/a.mjs".into())));
        assert!(registry.resolve("onClientIdle").unwrap().is_dynamic());
    }

    #[test]
    fn serializes_back_to_wire_shape() {
        let registry = LoaderRegistry::from_json_str(CONFIG).unwrap();
        let value = serde_json::to_value(&registry).unwrap();
        assert_eq!(
            value["onClientVisible"],
            serde_json::json!({
                "client": "/_slinkity/onClientVisible.mjs",
                "isDynamicComponentImport": true
            })
        );
        assert_eq!(
            value["onClientMedia"]["client"],
            serde_json::json!({ "name": "media", "mod": "/_slinkity/loaders.mjs" })
        );
    }
}
