//! Configuration resolution for the CLI.
//!
//! The key codes come from up to two layers: one TOML file, found by
//! [`ConfigSource::locate`], and the key flags on the command line. Flags win
//! over the file, and the file wins over the built-in defaults. The merged
//! result is validated before it is handed to the simplifier.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use graphml_slim::{
    SlimError,
    config::{AppConfig, KeyConfig},
};

use crate::Args;

/// Working-directory location of the project configuration file.
const LOCAL_CONFIG: &str = "graphml-slim/config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
}

impl From<ConfigError> for SlimError {
    fn from(err: ConfigError) -> Self {
        SlimError::Config(err.to_string())
    }
}

/// Where the configuration file layer comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`; must exist.
    Explicit(PathBuf),
    /// `graphml-slim/config.toml` in the working directory.
    Local(PathBuf),
    /// `config.toml` in the platform configuration directory.
    System(PathBuf),
    /// No file; built-in defaults only.
    Defaults,
}

impl ConfigSource {
    /// Pick the file layer: the explicit path, else the local file, else the
    /// system file, else none.
    pub fn locate(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return Self::Explicit(path.to_path_buf());
        }

        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Self::Local(local);
        }

        match ProjectDirs::from("com", "graphml-slim", "graphml-slim") {
            Some(dirs) => {
                let system = dirs.config_dir().join("config.toml");
                if system.exists() {
                    return Self::System(system);
                }
                debug!(path = system.display().to_string(); "System configuration file not found");
            }
            None => debug!("Could not determine platform-specific config directory"),
        }

        Self::Defaults
    }

    fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Local(path) | Self::System(path) => Some(path.as_path()),
            Self::Defaults => None,
        }
    }

    /// Read the file layer, or the defaults when there is no file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if the file is gone and
    /// [`ConfigError::Parse`] if it is not valid TOML for [`AppConfig`].
    fn read(&self) -> Result<AppConfig, SlimError> {
        let Some(path) = self.path() else {
            return Ok(AppConfig::default());
        };
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()).into());
        }

        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(config)
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) => write!(f, "explicit file {}", path.display()),
            Self::Local(path) => write!(f, "local file {}", path.display()),
            Self::System(path) => write!(f, "system file {}", path.display()),
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Key codes given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOverrides {
    node_label: Option<String>,
    edge_label: Option<String>,
    shared: Option<String>,
}

impl KeyOverrides {
    pub fn is_empty(&self) -> bool {
        self.node_label.is_none() && self.edge_label.is_none() && self.shared.is_none()
    }

    /// Replace the keys of `keys` that were given on the command line.
    fn apply(&self, keys: &mut KeyConfig) {
        if let Some(key) = &self.node_label {
            keys.set_node_label(key);
        }
        if let Some(key) = &self.edge_label {
            keys.set_edge_label(key);
        }
        if let Some(key) = &self.shared {
            keys.set_shared(key);
        }
    }
}

impl From<&Args> for KeyOverrides {
    fn from(args: &Args) -> Self {
        Self {
            node_label: args.node_label_key.clone(),
            edge_label: args.edge_label_key.clone(),
            shared: args.shared_key.clone(),
        }
    }
}

/// Resolve the configuration for a run.
///
/// Layers, lowest precedence first: built-in defaults, the file picked by
/// [`ConfigSource::locate`], then the key flags in `args`.
///
/// # Errors
///
/// Returns [`SlimError::Config`] if an explicit file is missing, the file is
/// not valid TOML, or the merged keys fail [`AppConfig::validate`].
pub fn load_config(args: &Args) -> Result<AppConfig, SlimError> {
    let source = ConfigSource::locate(args.config.as_deref().map(Path::new));
    info!(source:%; "Loading configuration");

    let mut config = source.read()?;

    let overrides = KeyOverrides::from(args);
    if !overrides.is_empty() {
        debug!(overrides:?; "Applying key overrides from the command line");
        overrides.apply(config.keys_mut());
    }

    config.validate()?;
    debug!(keys:? = config.keys(); "Configuration resolved");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn args_with(config: &Path, extra: &[&str]) -> Args {
        let config = config.to_string_lossy().to_string();
        let mut argv = vec!["graphml-slim", "in.graphml", "--config", config.as_str()];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[keys]\nnode_label = \"d6\"\nedge_label = \"d10\"\nshared = \"d2\"\n",
        );

        let config = load_config(&args_with(&path, &[])).expect("Failed to load config");
        assert_eq!(config.keys(), &KeyConfig::new("d6", "d10", "d2"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[keys]\nedge_label = \"d12\"\n");

        let config = load_config(&args_with(&path, &[])).unwrap();
        assert_eq!(config.keys(), &KeyConfig::new("d4", "d12", "d19"));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");

        let config = load_config(&args_with(&path, &[])).unwrap();
        assert_eq!(config.keys(), &KeyConfig::default());
    }

    #[test]
    fn test_flags_take_precedence_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[keys]\nnode_label = \"d6\"\nedge_label = \"d10\"\n",
        );

        let config = load_config(&args_with(&path, &["--node-label-key", "d8"])).unwrap();

        // node label from the flag, edge label from the file, shared from defaults
        assert_eq!(config.keys(), &KeyConfig::new("d8", "d10", "d19"));
    }

    #[test]
    fn test_merged_keys_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[keys]\nshared = \"d2\"\n");

        let err = load_config(&args_with(&path, &["--edge-label-key", "d2"])).unwrap_err();
        assert!(matches!(err, SlimError::Config(_)), "got {err:?}");
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nowhere.toml");

        let err = load_config(&args_with(&path, &[])).unwrap_err();
        match err {
            SlimError::Config(message) => {
                assert!(message.starts_with("Missing configuration file"));
            }
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[keys\nnode_label = ");

        let err = load_config(&args_with(&path, &[])).unwrap_err();
        match err {
            SlimError::Config(message) => {
                assert!(message.starts_with("Failed to parse TOML configuration"));
            }
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_locate_prefers_explicit_path() {
        let source = ConfigSource::locate(Some(Path::new("custom.toml")));
        assert_eq!(source, ConfigSource::Explicit(PathBuf::from("custom.toml")));
        assert_eq!(source.to_string(), "explicit file custom.toml");
    }

    #[test]
    fn test_overrides_from_args() {
        let args = Args::parse_from(["graphml-slim", "in.graphml", "--shared-key", "d2"]);
        let overrides = KeyOverrides::from(&args);
        assert!(!overrides.is_empty());

        let mut keys = KeyConfig::default();
        overrides.apply(&mut keys);
        assert_eq!(keys, KeyConfig::new("d4", "d11", "d2"));

        let none = Args::parse_from(["graphml-slim", "in.graphml"]);
        assert!(KeyOverrides::from(&none).is_empty());
    }
}
