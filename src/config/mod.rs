use crate::core::slots::DEFAULT_STEP_MINUTES;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Granularity of the time-in / time-out pickers, in minutes.
    #[serde(default = "default_slot_step")]
    pub slot_step_minutes: u32,
    /// Tracing filter used when RUST_LOG is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_slot_step() -> u32 {
    DEFAULT_STEP_MINUTES
}
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            slot_step_minutes: default_slot_step(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtimesheet")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rtimesheet")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtimesheet.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.slot_step_minutes == 0 || 60 % self.slot_step_minutes != 0 {
            return Err(AppError::Config(format!(
                "slot_step_minutes must divide 60, got {}",
                self.slot_step_minutes
            )));
        }
        Ok(())
    }

    /// Write the default configuration file. An existing file is kept unless `force`.
    pub fn init(force: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let path = Self::config_file();
        if path.exists() && !force {
            return Ok(path);
        }

        let yaml = serde_yaml::to_string(&Self::default())?;
        let mut file = fs::File::create(&path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(path)
    }
}
