use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment variable that relocates the whole config directory.
pub const HOME_ENV: &str = "POLIERLOG_HOME";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_polier_name")]
    pub polier_name: String,
    #[serde(default = "default_start_time")]
    pub default_start_time: String,
    #[serde(default = "default_end_time")]
    pub default_end_time: String,
    #[serde(default = "default_break_hours")]
    pub default_break_hours: f64,
    #[serde(default = "default_density")]
    pub default_density: f64,
    /// When set, delivery-note numbers must be 4 to 8 digits.
    #[serde(default)]
    pub strict_delivery_note: bool,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_polier_name() -> String {
    "Polier".to_string()
}
fn default_start_time() -> String {
    "07:00".to_string()
}
fn default_end_time() -> String {
    "16:00".to_string()
}
fn default_break_hours() -> f64 {
    0.5
}
fn default_density() -> f64 {
    2.4
}
fn default_export_dir() -> String {
    Config::config_dir().to_string_lossy().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            polier_name: default_polier_name(),
            default_start_time: default_start_time(),
            default_end_time: default_end_time(),
            default_break_hours: default_break_hours(),
            default_density: default_density(),
            strict_delivery_note: false,
            export_dir: default_export_dir(),
        }
    }
}

impl Config {
    /// Return the configuration directory (`$POLIERLOG_HOME` or `~/.polierlog`)
    pub fn config_dir() -> PathBuf {
        if let Ok(custom) = env::var(HOME_ENV)
            && !custom.trim().is_empty()
        {
            return PathBuf::from(custom);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".polierlog")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("polierlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("polierlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// Keys missing from an older file take their default value.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Write the config file and create the directory layout.
    /// Returns the database path that was configured.
    pub fn init_all(custom_db: Option<&str>, write_config: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if write_config {
            fs::write(Self::config_file(), config.to_yaml()?)?;
        }

        Ok(db_path)
    }
}
