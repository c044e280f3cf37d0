//! Configuration handling for gitstack

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GitStackError;

/// Environment variable naming an alternate config file
pub const CONFIG_ENV: &str = "GITSTACK_CONFIG";

/// Stack file used when nothing else is configured, relative to the home directory
pub const DEFAULT_STORE_FILE: &str = ".stack.txt";

/// Gitstack configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Gitstack-specific settings
    #[serde(default)]
    pub gitstack: GitStackConfig,
}

/// Core gitstack settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitStackConfig {
    /// Where the stack file lives
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Path to the git binary
    #[serde(default = "default_git_path")]
    pub git_path: String,
}

fn default_git_path() -> String {
    "git".to_string()
}

impl Default for GitStackConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            git_path: default_git_path(),
        }
    }
}

impl Config {
    /// Config file location: `$GITSTACK_CONFIG`, else `<config dir>/gitstack/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => dirs::config_dir().map(|dir| dir.join("gitstack").join("config.toml")),
        }
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, GitStackError> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| GitStackError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from the default location, if there is one
    pub fn discover() -> Result<Self, GitStackError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse config TOML
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resolve the stack file: explicit override, then config, then `~/.stack.txt`
    pub fn store_path(&self, cli_override: Option<&Path>) -> Result<PathBuf, GitStackError> {
        if let Some(path) = cli_override {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = &self.gitstack.store_path {
            return Ok(path.clone());
        }
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_STORE_FILE))
            .ok_or_else(|| {
                GitStackError::Config(
                    "cannot locate home directory; set --store or GITSTACK_FILE".to_string(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.gitstack.git_path, "git");
        assert!(config.gitstack.store_path.is_none());
    }

    #[test]
    fn test_parse_settings() {
        let config = Config::parse(
            r#"
[gitstack]
store_path = "/tmp/stack.txt"
git_path = "/usr/local/bin/git"
"#,
        )
        .unwrap();
        assert_eq!(
            config.gitstack.store_path,
            Some(PathBuf::from("/tmp/stack.txt"))
        );
        assert_eq!(config.gitstack.git_path, "/usr/local/bin/git");
    }

    #[test]
    fn test_store_path_precedence() {
        let config = Config::parse("[gitstack]\nstore_path = \"from-config.txt\"\n").unwrap();
        assert_eq!(
            config.store_path(Some(Path::new("from-flag.txt"))).unwrap(),
            PathBuf::from("from-flag.txt")
        );
        assert_eq!(
            config.store_path(None).unwrap(),
            PathBuf::from("from-config.txt")
        );
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(missing.gitstack.git_path, "git");

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "[gitstack\nstore_path = 3").unwrap();
        assert!(matches!(
            Config::load(&bad),
            Err(GitStackError::Config(_))
        ));
    }
}
