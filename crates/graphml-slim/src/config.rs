//! Configuration types for GraphML simplification.
//!
//! The key codes used by the exporting tool are the only tunable part of the
//! transformation. All types implement [`serde::Deserialize`] so they can be
//! loaded from a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`KeyConfig`] - The `data` key codes for node labels, edge labels and
//!   shared style data.
//!
//! # Example
//!
//! ```
//! # use graphml_slim::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.keys().node_label(), "d4");
//! assert_eq!(config.keys().edge_label(), "d11");
//! assert_eq!(config.keys().shared(), "d19");
//! ```

use serde::Deserialize;

use crate::error::SlimError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Key code section.
    #[serde(default)]
    keys: KeyConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given key codes.
    pub fn new(keys: KeyConfig) -> Self {
        Self { keys }
    }

    /// Returns the key code configuration.
    pub fn keys(&self) -> &KeyConfig {
        &self.keys
    }

    /// Returns a mutable reference to the key code configuration.
    pub fn keys_mut(&mut self) -> &mut KeyConfig {
        &mut self.keys
    }

    /// Check that the configuration can drive a transformation.
    ///
    /// # Errors
    ///
    /// Returns [`SlimError::Config`] if a key code is empty or if the node
    /// label key or edge label key equals the shared key, which would make
    /// every label disappear with the shared data.
    pub fn validate(&self) -> Result<(), SlimError> {
        let keys = &self.keys;
        for (field, value) in [
            ("node_label", keys.node_label()),
            ("edge_label", keys.edge_label()),
            ("shared", keys.shared()),
        ] {
            if value.trim().is_empty() {
                return Err(SlimError::Config(format!("key `{field}` must not be empty")));
            }
        }
        if keys.node_label() == keys.shared() || keys.edge_label() == keys.shared() {
            return Err(SlimError::Config(format!(
                "label keys must differ from the shared key `{}`",
                keys.shared()
            )));
        }
        Ok(())
    }
}

/// Key codes of the `data` entries the simplifier cares about.
///
/// Defaults follow the yFiles export convention: `d4` for node labels, `d11`
/// for edge labels and `d19` for shared style data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    node_label: String,
    edge_label: String,
    shared: String,
}

impl KeyConfig {
    /// Creates a new [`KeyConfig`].
    ///
    /// # Arguments
    ///
    /// * `node_label` - Key of the node label entry.
    /// * `edge_label` - Key of the edge label entry.
    /// * `shared` - Key of the shared data entries removed everywhere.
    pub fn new(
        node_label: impl Into<String>,
        edge_label: impl Into<String>,
        shared: impl Into<String>,
    ) -> Self {
        Self {
            node_label: node_label.into(),
            edge_label: edge_label.into(),
            shared: shared.into(),
        }
    }

    pub fn node_label(&self) -> &str {
        &self.node_label
    }

    pub fn edge_label(&self) -> &str {
        &self.edge_label
    }

    pub fn shared(&self) -> &str {
        &self.shared
    }

    pub fn set_node_label(&mut self, key: impl Into<String>) {
        self.node_label = key.into();
    }

    pub fn set_edge_label(&mut self, key: impl Into<String>) {
        self.edge_label = key.into();
    }

    pub fn set_shared(&mut self, key: impl Into<String>) {
        self.shared = key.into();
    }
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self::new("d4", "d11", "d19")
    }
}
