//! Application configuration.
//!
//! Stored as pretty-printed JSON (`config.json`) in the platform data
//! directory. A missing file means defaults; a file with an unparseable
//! palette color is rejected at load time.
//!
//! ```rust,no_run
//! use taskfeed::libs::config::Config;
//!
//! let config = Config::read()?;
//! let palette = config.palette()?;
//! println!("serving content://{}", config.authority);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use crate::provider::colors::{Argb, Palette};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_AUTHORITY: &str = "taskfeed.tasksprovider";
pub const BACKUP_DIR_NAME: &str = "backups";

/// Overrides for the priority color palette, as `#RRGGBB` or `#AARRGGBB`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PaletteConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grey: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Root identifier of the provider's `content://` paths.
    #[serde(default = "default_authority")]
    pub authority: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<PaletteConfig>,

    /// Where backups are written. Defaults to `backups/` in the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,
}

fn default_authority() -> String {
    DEFAULT_AUTHORITY.to_string()
}

/// An authority must be a single non-empty URI component, otherwise no
/// `content://` path could ever match it.
pub fn validate_authority(authority: &str) -> Result<()> {
    if authority.is_empty() || authority.chars().any(|c| matches!(c, '/' | '?' | '#') || c.is_whitespace()) {
        return Err(msg_error_anyhow!(Message::InvalidAuthority(authority.to_string())));
    }
    Ok(())
}

impl Default for Config {
    fn default() -> Self {
        Config {
            authority: default_authority(),
            palette: None,
            backup_dir: None,
        }
    }
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config =
            serde_json::from_str(&config_str).map_err(|e| msg_error_anyhow!(Message::ConfigParseError(e.to_string())))?;
        validate_authority(&config.authority)?;
        config.palette()?;
        Ok(config)
    }

    /// Writes the configuration and returns the file path.
    pub fn save(&self) -> Result<PathBuf> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)?;
        Ok(config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        validate_authority(&self.authority)?;
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Default palette with any configured overrides applied.
    pub fn palette(&self) -> Result<Palette> {
        let mut palette = Palette::default();
        let Some(overrides) = &self.palette else {
            return Ok(palette);
        };

        for (role, value, slot) in [
            ("red", &overrides.red, &mut palette.red),
            ("amber", &overrides.amber, &mut palette.amber),
            ("blue", &overrides.blue, &mut palette.blue),
            ("grey", &overrides.grey, &mut palette.grey),
        ] {
            if let Some(value) = value {
                *slot = Argb::parse(value)
                    .map_err(|_| msg_error_anyhow!(Message::InvalidPaletteColor(role.to_string(), value.clone())))?;
            }
        }
        Ok(palette)
    }

    pub fn backup_dir(&self) -> PathBuf {
        match &self.backup_dir {
            Some(dir) => dir.clone(),
            None => DataStorage::new().base_path().join(BACKUP_DIR_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.authority, DEFAULT_AUTHORITY);
    }

    #[test]
    fn authority_must_be_one_uri_component() {
        assert!(validate_authority(DEFAULT_AUTHORITY).is_ok());
        assert!(validate_authority("org.example.tasks").is_ok());
        for bad in ["", "a/b", "a?b", "a#b", "a b"] {
            let err = validate_authority(bad).unwrap_err();
            assert!(err.to_string().contains("authority"), "{bad}");
        }
    }

    #[test]
    fn palette_overrides_apply_per_role() {
        let config = Config {
            palette: Some(PaletteConfig {
                blue: Some("#0000FF".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let palette = config.palette().unwrap();
        assert_eq!(palette.blue, Argb(0xFF0000FF));
        assert_eq!(palette.red, Palette::default().red);
    }

    #[test]
    fn bad_palette_color_names_the_role() {
        let config = Config {
            palette: Some(PaletteConfig {
                amber: Some("orange".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = config.palette().unwrap_err();
        assert!(err.to_string().contains("amber"));
        assert!(err.to_string().contains("orange"));
    }
}
