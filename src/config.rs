use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub bindings: HashMap<String, String>,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct HistoryConfig {
    /// Oldest closes are forgotten past this many. Unbounded when absent.
    pub max_entries: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("undoquit.log")
}

impl Default for Config {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        // Default aliases, vim flavoured
        bindings.insert(":e".to_string(), "Edit".to_string());
        bindings.insert(":split".to_string(), "Split".to_string());
        bindings.insert(":tabnew".to_string(), "TabNew".to_string());
        bindings.insert(":q".to_string(), "Quit".to_string());
        bindings.insert(":quit".to_string(), "Quit".to_string());
        bindings.insert(":only".to_string(), "Only".to_string());
        bindings.insert(":tabonly".to_string(), "TabOnly".to_string());
        bindings.insert(":tabfirst".to_string(), "TabFirst".to_string());
        bindings.insert(":tablast".to_string(), "TabLast".to_string());
        bindings.insert(":Undoquit".to_string(), "Undoquit".to_string());
        bindings.insert("<c-w>u".to_string(), "Undoquit".to_string());
        bindings.insert(":UndoquitHistory".to_string(), "History".to_string());
        bindings.insert(":UndoquitClear".to_string(), "Clear".to_string());
        bindings.insert(":qa".to_string(), "Exit".to_string());

        for i in 1..=9 {
            bindings.insert(format!("{}wincmd w", i), format!("Window {}", i));
            bindings.insert(format!("{}gt", i), format!("Tab {}", i));
        }

        Self {
            bindings,
            history: HistoryConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ConfigNotFound(PathBuf),
    ReadError(PathBuf, String),
    ParseError(PathBuf, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => write!(f, "Config not found at {:?}", path),
            ConfigError::ReadError(path, msg) => {
                write!(f, "Failed to read config {:?}: {}", path, msg)
            }
            ConfigError::ParseError(path, msg) => {
                write!(f, "Failed to parse config {:?}: {}", path, msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("undoquit").join("undoquit.toml"))
            .unwrap_or_else(|| PathBuf::from("undoquit.toml"))
    }

    /// Read and parse the file at `path`.
    ///
    /// Nothing is logged here: the logger is configured from the result, so
    /// the caller reports the outcome once logging is up.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;
        Self::parse(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))
    }

    /// Log how `load_from` went, falling back to defaults on any error.
    pub fn report(path: &Path, loaded: Result<Self, ConfigError>) -> Self {
        match loaded {
            Ok(config) => {
                log::info!("Loaded config from {:?}", path);
                config
            }
            Err(e @ ConfigError::ConfigNotFound(_)) => {
                log::info!("{}, using defaults", e);
                Self::default()
            }
            Err(e) => {
                log::error!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// User bindings are merged over the defaults rather than replacing them.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let cfg = toml::from_str::<Config>(content)?;
        let mut config = Self::default();
        for (key, value) in cfg.bindings {
            config.bindings.insert(key, value);
        }
        config.history = cfg.history;
        config.log = cfg.log;
        Ok(config)
    }
}
