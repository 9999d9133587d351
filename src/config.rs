//! Configuration management for export defaults.
//!
//! Reads defaults from `~/.config/adsb2tsv/settings.conf` (Linux/macOS)
//! or `%LOCALAPPDATA%\adsb2tsv\settings.conf` (Windows). The file is
//! optional; command line flags override anything set in it.

use crate::types::{ExportError, Result};
use configparser::ini::Ini;
use std::path::PathBuf;

/// Export defaults read from the settings file.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Directory receiving the date-partitioned output tree
    pub output_root: Option<PathBuf>,
    /// Maximum open handles kept by the file cache
    pub file_limit: Option<usize>,
    /// Extra headroom reclaimed per cache trim pass
    pub trim_size: Option<usize>,
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// A missing file is not an error: everything falls back to built-in
    /// defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut ini = Ini::new();
        ini.load(path).map_err(ExportError::Config)?;

        let config = Config {
            output_root: ini
                .get("output", "root")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            file_limit: read_size(&ini, "cache", "limit")?,
            trim_size: read_size(&ini, "cache", "trim_size")?,
        };

        Ok(config)
    }

    /// Get the platform-specific config directory for adsb2tsv.
    pub fn config_dir() -> Result<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir()
                .map(|p| p.join("adsb2tsv"))
                .ok_or_else(|| ExportError::Config("Could not determine config directory".into()))
        }

        #[cfg(target_os = "macos")]
        {
            dirs::config_dir()
                .map(|p| p.join("adsb2tsv"))
                .ok_or_else(|| ExportError::Config("Could not determine config directory".into()))
        }

        #[cfg(target_os = "windows")]
        {
            dirs::data_local_dir()
                .map(|p| p.join("adsb2tsv"))
                .ok_or_else(|| ExportError::Config("Could not determine config directory".into()))
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        {
            dirs::home_dir()
                .map(|p| p.join(".adsb2tsv"))
                .ok_or_else(|| ExportError::Config("Could not determine home directory".into()))
        }
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("settings.conf"))
    }
}

fn read_size(ini: &Ini, section: &str, key: &str) -> Result<Option<usize>> {
    let value = ini
        .getuint(section, key)
        .map_err(|e| ExportError::Config(format!("bad {section}.{key}: {e}")))?;
    Ok(value.map(|v| v as usize))
}

/// Default config file content template.
pub const DEFAULT_CONFIG: &str = r#"[output]
root = tsv

[cache]
limit = 1000
trim_size = 100
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"[output]
root = /srv/tsv

[cache]
limit = 200
trim_size = 20
"#
        )
        .unwrap();

        let config = Config::load_from_path(&temp_file.path().to_path_buf()).unwrap();
        assert_eq!(config.output_root, Some(PathBuf::from("/srv/tsv")));
        assert_eq!(config.file_limit, Some(200));
        assert_eq!(config.trim_size, Some(20));
    }

    #[test]
    fn test_missing_keys_stay_unset() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"[cache]
limit = 50
"#
        )
        .unwrap();

        let config = Config::load_from_path(&temp_file.path().to_path_buf()).unwrap();
        assert_eq!(config.output_root, None);
        assert_eq!(config.file_limit, Some(50));
        assert_eq!(config.trim_size, None);
    }

    #[test]
    fn test_empty_values_treated_as_none() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"[output]
root =
"#
        )
        .unwrap();

        let config = Config::load_from_path(&temp_file.path().to_path_buf()).unwrap();
        assert_eq!(config.output_root, None);
    }

    #[test]
    fn test_non_numeric_limit_is_an_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"[cache]
limit = lots
"#
        )
        .unwrap();

        let result = Config::load_from_path(&temp_file.path().to_path_buf());
        assert!(matches!(result, Err(ExportError::Config(_))));
    }

    #[test]
    fn test_default_template_parses() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(DEFAULT_CONFIG.as_bytes()).unwrap();

        let config = Config::load_from_path(&temp_file.path().to_path_buf()).unwrap();
        assert_eq!(config.output_root, Some(PathBuf::from("tsv")));
        assert_eq!(config.file_limit, Some(1000));
        assert_eq!(config.trim_size, Some(100));
    }
}
