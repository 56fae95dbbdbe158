use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

/// Error type for loading config.toml
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Default config location: `$XDG_CONFIG_HOME/todotree/config.toml`,
/// falling back to `~/.config/todotree/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .filter(|v| !v.is_empty())
                .map(|home| PathBuf::from(home).join(".config"))
        })?;
    Some(base.join("todotree").join("config.toml"))
}

/// Load the config.
///
/// An explicitly requested file must exist. Without one, the default location
/// is tried and a missing file yields the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => match default_config_path() {
            Some(path) if path.is_file() => read_config(&path),
            _ => Ok(AppConfig::default()),
        },
    }
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let config = read_config(&path).unwrap();
        assert!(config.ui.show_key_hints);
        assert!(config.ui.palette.is_empty());
        assert_eq!(config.watch.debounce_ms, 100);
    }

    #[test]
    fn full_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r##"[ui]
show_key_hints = false
palette = ["#112233", "#445566"]

[ui.colors]
header_bg = "#000000"

[ui.tag_colors]
ssmd = "#F29959"

[watch]
debounce_ms = 250
"##,
        )
        .unwrap();

        let config = read_config(&path).unwrap();
        assert!(!config.ui.show_key_hints);
        assert_eq!(config.ui.palette, vec!["#112233", "#445566"]);
        assert_eq!(config.ui.colors.get("header_bg").unwrap(), "#000000");
        assert_eq!(config.ui.tag_colors.get("ssmd").unwrap(), "#F29959");
        assert_eq!(config.watch.debounce_ms, 250);
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[ui\nshow_key_hints = maybe").unwrap();
        assert!(matches!(
            read_config(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn explicit_missing_config_is_a_read_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.toml");
        assert!(matches!(
            load_config(Some(path.as_path())),
            Err(ConfigError::ReadError { .. })
        ));
    }
}
