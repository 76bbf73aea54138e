//! ConfigStore - Agenda Configuration on Disk
//!
//! The configuration lives in `agenda.toml` inside the platform config
//! directory. A missing or empty file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_FILE_NAME;
use crate::domain::AgendaConfig;
use crate::error::Result;

use super::get_or_create_config_dir;

/// Path of the configuration file in the platform config directory
pub fn config_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the configuration from the platform config directory
pub fn load_config() -> Result<AgendaConfig> {
    load_config_from(&config_path()?)
}

/// Load and validate a configuration file
pub fn load_config_from(path: &Path) -> Result<AgendaConfig> {
    if !path.exists() {
        tracing::debug!(path = ?path, "No config file, using defaults");
        return Ok(AgendaConfig::default());
    }

    tracing::info!(path = ?path, "Loading config file");
    let value = fs::read_to_string(path)?;
    if value.trim().is_empty() {
        return Ok(AgendaConfig::default());
    }

    let config: AgendaConfig = toml::from_str(&value).map_err(|e| {
        tracing::error!(error = %e, path = ?path, "Failed to parse config file");
        e
    })?;
    config.validate()?;

    Ok(config)
}

/// Save a configuration file
pub fn save_config_to(path: &Path, config: &AgendaConfig) -> Result<()> {
    let value = toml::to_string_pretty(config)?;
    fs::write(path, value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_missing_and_empty_file_give_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert_eq!(load_config_from(&path).expect("load"), AgendaConfig::default());

        fs::write(&path, "  \n").expect("write");
        assert_eq!(load_config_from(&path).expect("load"), AgendaConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = AgendaConfig::default()
            .with_buffer_size(14)
            .with_selected_day(NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"));

        save_config_to(&path, &config).expect("save");
        assert_eq!(load_config_from(&path).expect("load"), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "buffer_size = 7\n").expect("write");

        let config = load_config_from(&path).expect("load");
        assert_eq!(config.buffer_size, 7);
        assert_eq!(config.data_load_threshold, 15);
    }

    #[test]
    fn test_invalid_files_are_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&path, "buffer_size = 0\n").expect("write");
        assert!(matches!(load_config_from(&path), Err(Error::Invalid { .. })));

        fs::write(&path, "buffer_size = \"many\"\n").expect("write");
        assert!(matches!(load_config_from(&path), Err(Error::TomlDe { .. })));
    }
}
