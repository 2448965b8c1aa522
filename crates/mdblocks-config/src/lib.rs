use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// User settings for the `mdblocks` viewer.
///
/// Every field has a default, so an empty file (or a partial one) is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where log output goes. Without it logging stays off, since the TUI owns
    /// the terminal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    pub stream: StreamConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Lines processed per cooperative step before the UI redraws.
    pub batch_lines: usize,
    /// Size of each read from the input source.
    pub read_chunk_bytes: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            batch_lines: 64,
            read_chunk_bytes: 64 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Width of bordered blocks as a percentage of the terminal width.
    pub block_width_percent: u16,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            block_width_percent: 50,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.log_file = config
            .log_file
            .map(|path| Self::expand_path(&path).unwrap_or(path));
        config.stream.batch_lines = config.stream.batch_lines.max(1);
        config.stream.read_chunk_bytes = config.stream.read_chunk_bytes.max(1);
        config.render.block_width_percent = config.render.block_width_percent.clamp(10, 100);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/mdblocks");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    fn load_str(content: &str) -> Config {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, content).unwrap();
        Config::load_from_path(&config_file).unwrap().unwrap()
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/mdblocks/config.toml"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_file, None);
        assert_eq!(config.stream.batch_lines, 64);
        assert_eq!(config.stream.read_chunk_bytes, 65536);
        assert_eq!(config.render.block_width_percent, 50);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(load_str(""), Config::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = load_str(
            r#"
[stream]
batch_lines = 8
"#,
        );
        assert_eq!(config.stream.batch_lines, 8);
        assert_eq!(config.stream.read_chunk_bytes, 65536);
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let config = load_str(
            r#"
[stream]
batch_lines = 0
read_chunk_bytes = 0

[render]
block_width_percent = 250
"#,
        );
        assert_eq!(config.stream.batch_lines, 1);
        assert_eq!(config.stream.read_chunk_bytes, 1);
        assert_eq!(config.render.block_width_percent, 100);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_log_file_with_env_var_in_toml() {
        unsafe {
            env::set_var("MDBLOCKS_TEST_LOG_ROOT", "/custom/logs");
        }

        let config = load_str(
            r#"
log_file = "$MDBLOCKS_TEST_LOG_ROOT/mdblocks.log"
"#,
        );

        assert_eq!(config.log_file, Some(PathBuf::from("/custom/logs/mdblocks.log")));

        unsafe {
            env::remove_var("MDBLOCKS_TEST_LOG_ROOT");
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[stream]\nbatch_lines = \"many\"\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            log_file: Some(PathBuf::from("/tmp/mdblocks.log")),
            stream: StreamConfig {
                batch_lines: 16,
                read_chunk_bytes: 4096,
            },
            render: RenderConfig {
                block_width_percent: 80,
            },
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
