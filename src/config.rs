use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SUMMARY_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BookbotConfig {
    pub database: Option<String>,
    pub port: Option<u16>,
    /// Artificial delay before a generated summary is returned
    pub summary_delay_ms: Option<u64>,
}

impl BookbotConfig {
    pub fn database_path(&self) -> PathBuf {
        self.database
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| default_database_path_in(Path::new(".")))
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn summary_delay(&self) -> Duration {
        Duration::from_millis(self.summary_delay_ms.unwrap_or(DEFAULT_SUMMARY_DELAY_MS))
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("bookbot.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".bookbot").join("bookbot.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<BookbotConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: BookbotConfig = toml::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

/// The config file with command-line overrides applied on top.
///
/// When `database` is given, a config file that cannot be read is only
/// warned about and defaults are used for everything else.
pub fn resolve_config(path: &Path, database: Option<&Path>) -> anyhow::Result<BookbotConfig> {
    let file_config = match load_config(Some(path)) {
        Ok(config) => config.unwrap_or_default(),
        Err(e) if database.is_some() => {
            tracing::warn!("Ignoring config: {:#}", e);
            BookbotConfig::default()
        }
        Err(e) => return Err(e),
    };

    Ok(BookbotConfig {
        database: database
            .map(|p| p.to_string_lossy().to_string())
            .or(file_config.database.clone()),
        ..file_config
    })
}

pub fn write_config(path: &Path, config: &BookbotConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BookbotConfig::default();
        assert_eq!(config.port(), DEFAULT_PORT);
        assert_eq!(config.summary_delay(), Duration::from_millis(2000));
        assert_eq!(config.database_path(), Path::new(".").join(".bookbot").join("bookbot.db"));
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("bookbot.toml"))).unwrap().is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookbot.toml");
        let config = BookbotConfig {
            database: Some("books.db".to_string()),
            port: Some(8080),
            summary_delay_ms: Some(0),
        };

        write_config(&path, &config, false).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(config.clone()));

        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &BookbotConfig::default(), true).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(BookbotConfig::default()));
    }

    #[test]
    fn test_database_flag_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookbot.toml");
        std::fs::write(&path, "database = \"file.db\"\nport = 8080\n").unwrap();

        let config = resolve_config(&path, None).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("file.db"));

        let config = resolve_config(&path, Some(Path::new("flag.db"))).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("flag.db"));
        assert_eq!(config.port(), 8080);
    }

    #[test]
    fn test_missing_file_resolves_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = resolve_config(&dir.path().join("bookbot.toml"), None).unwrap();
        assert_eq!(config, BookbotConfig::default());
    }

    #[test]
    fn test_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookbot.toml");
        std::fs::write(&path, "database = [broken").unwrap();

        let err = resolve_config(&path, None).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse"));

        // The database flag still works
        let config = resolve_config(&path, Some(Path::new("flag.db"))).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("flag.db"));
        assert_eq!(config.port(), DEFAULT_PORT);

        // And a forced write replaces it
        write_config(&path, &BookbotConfig::default(), true).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(BookbotConfig::default()));
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("bookbot.db");

        ensure_db_dir(&db).unwrap();
        assert!(dir.path().join("nested").is_dir());
    }
}
