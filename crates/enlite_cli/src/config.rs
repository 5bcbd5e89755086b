//! CLI configuration file.
//!
//! # Invariants
//! - Relative paths in the file resolve against the file's own directory.
//! - `--db` on the command line wins over `database_path`.

use anyhow::{bail, Context};
use enlite_core::default_log_level;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/enlite.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    pub database_path: PathBuf,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Reads and parses a TOML config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: CliConfig = toml::from_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.database_path = resolve_against(base, &config.database_path);
        config.log_dir = config.log_dir.map(|dir| resolve_against(base, &dir));
        Ok(config)
    }

    /// Builds the effective configuration from the optional file and `--db`.
    ///
    /// An explicit `--config` must exist; the default location may be absent
    /// when `--db` is given.
    pub fn resolve(config_path: Option<&Path>, db_override: Option<&Path>) -> anyhow::Result<Self> {
        let file = match config_path {
            Some(path) => Some(Self::load(path)?),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    Some(Self::load(default_path)?)
                } else {
                    None
                }
            }
        };

        match (file, db_override) {
            (Some(mut config), Some(db)) => {
                config.database_path = db.to_path_buf();
                Ok(config)
            }
            (Some(config), None) => Ok(config),
            (None, Some(db)) => Ok(Self {
                database_path: db.to_path_buf(),
                log_dir: None,
                log_level: None,
            }),
            (None, None) => bail!(
                "no reference database configured; pass --db or create {DEFAULT_CONFIG_PATH}"
            ),
        }
    }

    /// Configured log level, or the build's default when unset.
    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::CliConfig;
    use std::fs;
    use std::path::Path;

    #[test]
    fn load_resolves_relative_paths_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enlite.toml");
        fs::write(
            &path,
            "database_path = \"data/reference.db\"\nlog_dir = \"logs\"\nlog_level = \"debug\"\n",
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.database_path, dir.path().join("data/reference.db"));
        assert_eq!(config.log_dir, Some(dir.path().join("logs")));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn load_keeps_absolute_paths_and_optional_fields() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("abs.db");
        let path = dir.path().join("enlite.toml");
        fs::write(&path, format!("database_path = {:?}\n", db.display().to_string())).unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.database_path, db);
        assert!(config.log_dir.is_none());
        assert!(config.log_level.is_none());
    }

    #[test]
    fn load_rejects_unknown_keys_and_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enlite.toml");

        fs::write(&path, "database_path = \"x.db\"\ncache = true\n").unwrap();
        assert!(CliConfig::load(&path).is_err());

        fs::write(&path, "log_level = \"info\"\n").unwrap();
        let err = CliConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("database_path"));
    }

    #[test]
    fn db_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enlite.toml");
        fs::write(&path, "database_path = \"from_file.db\"\nlog_level = \"warn\"\n").unwrap();

        let config = CliConfig::resolve(Some(&path), Some(Path::new("/tmp/override.db"))).unwrap();
        assert_eq!(config.database_path, Path::new("/tmp/override.db"));
        assert_eq!(config.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn log_level_falls_back_to_build_default() {
        let mut config = CliConfig {
            database_path: "reference.db".into(),
            log_dir: None,
            log_level: None,
        };
        assert_eq!(config.effective_log_level(), enlite_core::default_log_level());

        config.log_level = Some("warn".to_string());
        assert_eq!(config.effective_log_level(), "warn");
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = CliConfig::resolve(Some(&missing), None).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
