use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

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

/// Everything one conversion run needs, built once at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub serve: bool,
    pub template: PathBuf,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("TEST.md"),
            output: PathBuf::from("output.html"),
            title: "Document".to_string(),
            serve: false,
            template: PathBuf::from("template.html"),
            port: 8080,
        }
    }
}

/// Values given on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub title: Option<String>,
    pub serve: Option<bool>,
    pub template: Option<PathBuf>,
    pub port: Option<u16>,
}

impl Config {
    pub const FILE_NAME: &'static str = "markdown-press.toml";

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

        // Expand shell variables and tilde in the loaded paths
        for path in [&mut config.input, &mut config.output, &mut config.template] {
            if let Some(expanded) = Self::expand_path(path) {
                *path = expanded;
            }
        }

        Ok(Some(config))
    }

    /// Loads `explicit` if given (it must exist), otherwise
    /// [`Config::FILE_NAME`] from the working directory if present,
    /// otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => {
                Self::load_from_path(path)?.ok_or_else(|| ConfigError::NotFound(path.to_path_buf()))
            }
            None => Ok(Self::load_from_path(Self::FILE_NAME)?.unwrap_or_default()),
        }
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Applies command-line values on top of this config.
    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(input) = overrides.input {
            self.input = input;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(title) = overrides.title {
            self.title = title;
        }
        if let Some(serve) = overrides.serve {
            self.serve = serve;
        }
        if let Some(template) = overrides.template {
            self.template = template;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        self
    }

    pub fn serve_url(&self) -> String {
        format!("http://localhost:{}", self.port)
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
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.input, PathBuf::from("TEST.md"));
        assert_eq!(config.output, PathBuf::from("output.html"));
        assert_eq!(config.title, "Document");
        assert!(!config.serve);
        assert_eq!(config.template, PathBuf::from("template.html"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            title: "Roundtrip".to_string(),
            serve: true,
            ..Config::default()
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("title = \"Notes\"\n").unwrap();

        assert_eq!(config.title, "Notes");
        assert_eq!(config.input, PathBuf::from("TEST.md"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        let result = Config::load(Some(missing.as_path()));

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("bad.toml");
        std::fs::write(&config_file, "port = \"not a number\"").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join(Config::FILE_NAME);
        let test_config = Config {
            input: PathBuf::from("/tmp/notes/README.md"),
            port: 9000,
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load(Some(config_file.as_path())).unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_env_var_in_paths() {
        unsafe {
            env::set_var("PRESS_DOCS", "/custom/docs");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "input = \"$PRESS_DOCS/index.md\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.input, PathBuf::from("/custom/docs/index.md"));

        unsafe {
            env::remove_var("PRESS_DOCS");
        }
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/site/output.html");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("site/output.html"));
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::default().merge(ConfigOverrides {
            output: Some(PathBuf::from("site/index.html")),
            serve: Some(true),
            ..ConfigOverrides::default()
        });

        assert_eq!(config.output, PathBuf::from("site/index.html"));
        assert!(config.serve);
        assert_eq!(config.input, PathBuf::from("TEST.md"));
    }

    #[test]
    fn test_serve_url() {
        let config = Config {
            port: 3000,
            ..Config::default()
        };
        assert_eq!(config.serve_url(), "http://localhost:3000");
    }
}
