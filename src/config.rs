//! Configuration management for fxf
//!
//! Settings are layered: built-in defaults, an optional settings file named on
//! the command line, then command-line overrides. Nothing is read from the
//! environment.

use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Mount table consulted when nothing else is configured
pub const DEFAULT_MOUNT_TABLE: &str = "/etc/fstab";

/// First field of the mount entry that describes the transfer directory
pub const DEFAULT_MOUNT_TAG: &str = "/vstation_fxf";

/// Combined size ceiling of the transfer directory (1 GiB)
pub const DEFAULT_QUOTA_BYTES: u64 = 0x4000_0000;

/// Settings for a single run
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Line-oriented mount table to scan for the transfer directory
    pub mount_table: PathBuf,

    /// Prefix identifying the transfer directory entry
    pub mount_tag: String,

    /// An add is refused once `source + current usage` reaches this many bytes
    pub quota_bytes: u64,
}

/// Values given on the command line; they win over every other layer.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub mount_table: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mount_table: PathBuf::from(DEFAULT_MOUNT_TABLE),
            mount_tag: DEFAULT_MOUNT_TAG.to_string(),
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional TOML file and CLI overrides
    pub fn load(settings_file: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("mount_table", DEFAULT_MOUNT_TABLE)?
            .set_default("mount_tag", DEFAULT_MOUNT_TAG)?
            .set_default("quota_bytes", DEFAULT_QUOTA_BYTES)?;

        if let Some(path) = settings_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        if let Some(mount_table) = &overrides.mount_table {
            builder = builder.set_override("mount_table", mount_table.to_string_lossy().into_owned())?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.mount_table.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("mount_table cannot be empty".into()));
        }

        if self.mount_tag.trim().is_empty() {
            return Err(ConfigError::Invalid("mount_tag cannot be empty".into()));
        }

        if self.mount_tag.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(
                "mount_tag cannot contain whitespace".into(),
            ));
        }

        if self.quota_bytes == 0 {
            return Err(ConfigError::Invalid(
                "quota_bytes must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_without_any_layer() {
        let settings = Settings::load(None, &Overrides::default()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.quota_bytes, 0x40000000);
    }

    #[test]
    fn override_wins_over_settings_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("fxf.toml");
        fs::write(
            &file,
            "mount_table = \"/from/file\"\nmount_tag = \"/other_tag\"\nquota_bytes = 4096\n",
        )
        .unwrap();

        let overrides = Overrides {
            mount_table: Some(PathBuf::from("/from/cli")),
        };
        let settings = Settings::load(Some(file.as_path()), &overrides).unwrap();

        assert_eq!(settings.mount_table, PathBuf::from("/from/cli"));
        assert_eq!(settings.mount_tag, "/other_tag");
        assert_eq!(settings.quota_bytes, 4096);
    }

    #[test]
    fn zero_quota_is_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("fxf.toml");
        fs::write(&file, "quota_bytes = 0\n").unwrap();

        let err = Settings::load(Some(file.as_path()), &Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_settings_file_is_an_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("absent.toml");

        assert!(Settings::load(Some(file.as_path()), &Overrides::default()).is_err());
    }
}
