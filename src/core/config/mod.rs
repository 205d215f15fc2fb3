//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! tagver has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$TAGVER_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/tagver/config.toml`
//! 3. `~/.tagver/config.toml` (`$HOME`, else the platform home directory)
//!
//! # Repo Config Locations
//!
//! Searched in order:
//! 1. `<git dir>/tagver/config.toml` (canonical, never committed)
//! 2. `.tagver.toml` in the working tree root (committed with the project)
//!
//! # Example
//!
//! ```no_run
//! use tagver::core::config::Config;
//! use tagver::core::env::ProcessEnv;
//! use std::path::Path;
//!
//! let result = Config::load(&ProcessEnv, Some(Path::new(".git")), Some(Path::new("."))).unwrap();
//! let config = result.config;
//! println!("Separator: {}", config.separator());
//! println!("CI aware: {}", config.ci());
//! ```

pub mod schema;

pub use schema::ConfigFile;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::env::Env;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence rules: repo config overrides global
/// config, which overrides defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: ConfigFile,
    /// Repository configuration (if in a repo)
    pub repo: Option<ConfigFile>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Default identifier separator.
    pub const DEFAULT_SEPARATOR: &'static str = "-";

    /// Load configuration from default locations.
    ///
    /// `git_dir` and `work_dir` locate repo config; pass `None` outside a
    /// repository (or for a bare one, in the case of `work_dir`).
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be read, parsed,
    /// or validated. Missing config files are not an error.
    pub fn load(
        env: &impl Env,
        git_dir: Option<&Path>,
        work_dir: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = Self::load_global(env)?;
        let (repo, repo_path) = Self::load_repo(git_dir, work_dir, &mut warnings)?;

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path,
                repo_path,
            },
            warnings,
        })
    }

    /// Load global configuration from standard locations.
    fn load_global(env: &impl Env) -> Result<(ConfigFile, Option<PathBuf>), ConfigError> {
        let mut candidates = Vec::new();
        if let Some(path) = env.non_empty("TAGVER_CONFIG") {
            candidates.push(PathBuf::from(path));
        }
        if let Some(xdg_home) = env.non_empty("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("tagver/config.toml"));
        }
        let home = env.non_empty("HOME").map(PathBuf::from).or_else(dirs::home_dir);
        if let Some(home) = home {
            candidates.push(home.join(".tagver/config.toml"));
        }

        for path in candidates {
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((ConfigFile::default(), None))
    }

    /// Load repository configuration from standard locations.
    fn load_repo(
        git_dir: Option<&Path>,
        work_dir: Option<&Path>,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(Option<ConfigFile>, Option<PathBuf>), ConfigError> {
        let canonical = git_dir.map(|dir| dir.join("tagver/config.toml"));
        let committed = work_dir.map(|dir| dir.join(".tagver.toml"));

        match (canonical, committed) {
            (Some(canonical), committed) if canonical.exists() => {
                if let Some(committed) = committed.filter(|p| p.exists()) {
                    warnings.push(ConfigWarning {
                        message: format!(
                            "Ignoring '{}' because '{}' takes precedence",
                            committed.display(),
                            canonical.display()
                        ),
                        path: committed,
                    });
                }
                let config = Self::read_config(&canonical)?;
                Ok((Some(config), Some(canonical)))
            }
            (_, Some(committed)) if committed.exists() => {
                let config = Self::read_config(&committed)?;
                Ok((Some(config), Some(committed)))
            }
            _ => Ok((None, None)),
        }
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn layered<'a, T>(&'a self, pick: impl Fn(&'a ConfigFile) -> Option<T>) -> Option<T> {
        self.repo.as_ref().and_then(&pick).or_else(|| pick(&self.global))
    }

    /// Get the identifier separator.
    ///
    /// Defaults to `-` if not configured.
    pub fn separator(&self) -> &str {
        self.layered(|c| c.separator.as_deref())
            .unwrap_or(Self::DEFAULT_SEPARATOR)
    }

    /// Check if the unclean suffix should be dropped by default.
    ///
    /// Defaults to `false` if not configured.
    pub fn ignore_unclean_tag(&self) -> bool {
        self.layered(|c| c.ignore_unclean_tag).unwrap_or(false)
    }

    /// Check if CI environment variables are honored.
    ///
    /// Defaults to `true` if not configured.
    pub fn ci(&self) -> bool {
        self.layered(|c| c.ci).unwrap_or(true)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_with(vars: &[(&str, &Path)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.display().to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.separator(), "-");
        assert!(!config.ignore_unclean_tag());
        assert!(config.ci());
    }

    #[test]
    fn load_global_from_env() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "separator = \"_\"\nci = false\n").unwrap();

        let env = env_with(&[("TAGVER_CONFIG", &config_path)]);
        let result = Config::load(&env, None, None).unwrap();

        assert_eq!(result.config.separator(), "_");
        assert!(!result.config.ci());
        assert_eq!(
            result.config.global_config_loaded_from(),
            Some(config_path.as_path())
        );
    }

    #[test]
    fn load_global_from_xdg() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("tagver");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "ignore_unclean_tag = true").unwrap();

        let env = env_with(&[("XDG_CONFIG_HOME", temp.path())]);
        let result = Config::load(&env, None, None).unwrap();

        assert!(result.config.ignore_unclean_tag());
    }

    #[test]
    fn load_global_from_home() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".tagver")).unwrap();
        fs::write(temp.path().join(".tagver/config.toml"), "ci = false").unwrap();

        let env = env_with(&[("HOME", temp.path())]);
        let result = Config::load(&env, None, None).unwrap();

        assert!(!result.config.ci());
        assert_eq!(
            result.config.global_config_loaded_from(),
            Some(temp.path().join(".tagver/config.toml").as_path())
        );
    }

    #[test]
    fn load_repo_config() {
        let temp = TempDir::new().unwrap();
        let git_dir = temp.path().join(".git");
        fs::create_dir_all(git_dir.join("tagver")).unwrap();
        fs::write(git_dir.join("tagver/config.toml"), "separator = \".\"").unwrap();

        let result = Config::load(&HashMap::new(), Some(&git_dir), Some(temp.path())).unwrap();

        assert_eq!(result.config.separator(), ".");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn load_committed_repo_config() {
        let temp = TempDir::new().unwrap();
        let git_dir = temp.path().join(".git");
        fs::create_dir_all(&git_dir).unwrap();
        fs::write(temp.path().join(".tagver.toml"), "ci = false").unwrap();

        let result = Config::load(&HashMap::new(), Some(&git_dir), Some(temp.path())).unwrap();

        assert!(!result.config.ci());
        assert!(result
            .config
            .repo_config_loaded_from()
            .is_some_and(|p| p.ends_with(".tagver.toml")));
    }

    #[test]
    fn shadowed_committed_config_warns() {
        let temp = TempDir::new().unwrap();
        let git_dir = temp.path().join(".git");
        fs::create_dir_all(git_dir.join("tagver")).unwrap();
        fs::write(git_dir.join("tagver/config.toml"), "separator = \"+\"").unwrap();
        fs::write(temp.path().join(".tagver.toml"), "separator = \".\"").unwrap();

        let result = Config::load(&HashMap::new(), Some(&git_dir), Some(temp.path())).unwrap();

        assert_eq!(result.config.separator(), "+");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("takes precedence"));
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".tagver.toml"), "match = \"v*\"").unwrap();

        let result = Config::load(&HashMap::new(), None, Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn invalid_separator_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".tagver.toml"), "separator = \"\"").unwrap();

        let result = Config::load(&HashMap::new(), None, Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn precedence_repo_overrides_global() {
        let config = Config {
            global: ConfigFile {
                separator: Some("_".to_string()),
                ci: Some(false),
                ..Default::default()
            },
            repo: Some(ConfigFile {
                separator: Some(".".to_string()),
                ..Default::default()
            }),
            global_path: None,
            repo_path: None,
        };

        assert_eq!(config.separator(), ".");
        // Falls through to global when the repo leaves it unset
        assert!(!config.ci());
    }
}
