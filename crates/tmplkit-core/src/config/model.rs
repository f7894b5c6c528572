use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TmplkitError};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "tmplkit.toml";

/// tmplkit.toml schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Data files merged into the context in order, relative to the config file
    #[serde(default)]
    pub files: Vec<PathBuf>,
    /// Inline values merged after the data files
    #[serde(default)]
    pub globals: toml::Table,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_builtins")]
    pub builtins: bool,
    #[serde(default)]
    pub trailing_newline: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            builtins: true,
            trailing_newline: false,
        }
    }
}

fn default_builtins() -> bool {
    true
}

impl Config {
    /// Parse a config file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for this schema
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config =
            toml::from_str(&content).map_err(|e| TmplkitError::ConfigParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        // Data file paths are relative to the config file
        if let Some(base) = path.parent() {
            for file in &mut config.context.files {
                if file.is_relative() {
                    *file = base.join(&*file);
                }
            }
        }
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmplkit_testkit::temp_dir_in_workspace;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.render.builtins);
        assert!(!config.render.trailing_newline);
        assert!(config.context.files.is_empty());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_file_resolves_relative_data_paths() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[context]\nfiles = [\"data/site.toml\"]\n\n[context.globals]\nsite = \"Blog\"\n\n[render]\nbuiltins = false\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.context.files, vec![temp.path().join("data/site.toml")]);
        assert_eq!(
            config.context.globals.get("site"),
            Some(&toml::Value::String("Blog".to_string()))
        );
        assert!(!config.render.builtins);
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[render]\nbuiltins = \"yes\"\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, TmplkitError::ConfigParseError { .. }));
        assert!(err.to_string().contains("CONFIG_PARSE_ERROR"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp = temp_dir_in_workspace();
        let config = Config::load_or_default(&temp.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
