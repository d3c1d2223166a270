use crate::error::{FleetCheckError, Result};
use dialoguer::{Confirm, Input};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub rules: RuleConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Thresholds and switches for the rule primitives.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RuleConfig {
    /// Shortest accepted vehicle identifier, in characters.
    #[serde(default = "default_min_vehicle_id_length")]
    pub min_vehicle_id_length: usize,
    /// Treat vehicles in `Maintenance` status as unavailable.
    #[serde(default)]
    pub block_maintenance_status: bool,
    /// Days an inspection stays valid. `None` disables the inspection rule.
    #[serde(default)]
    pub inspection_interval_days: Option<u32>,
    /// Completion markers that mean maintenance work is finished.
    #[serde(default = "default_finished_markers")]
    pub finished_markers: Vec<String>,
}

fn default_min_vehicle_id_length() -> usize {
    3
}

fn default_finished_markers() -> Vec<String> {
    vec!["completed".to_string()]
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            min_vehicle_id_length: default_min_vehicle_id_length(),
            block_maintenance_status: false,
            inspection_interval_days: None,
            finished_markers: default_finished_markers(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding `fleetcheck.db`. Falls back to the XDG data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load from `config_override`, or from the first config found in the
    /// standard locations. Returns defaults when no file exists.
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(FleetCheckError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p.to_path_buf()
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::info!("No config file found, using default rules");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| FleetCheckError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_yaml(&config_str)?;
        tracing::debug!(path = %config_path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| FleetCheckError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.rules.min_vehicle_id_length == 0 {
            return Err(FleetCheckError::Config(
                "rules.min_vehicle_id_length must be at least 1".into(),
            ));
        }
        if self.rules.finished_markers.iter().all(|m| m.trim().is_empty()) {
            return Err(FleetCheckError::Config(
                "rules.finished_markers must contain at least one marker".into(),
            ));
        }
        Ok(())
    }

    /// Search for config.yaml in `./config/` and the XDG config directory.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("fleetcheck").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/fleetcheck/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FleetCheckError::Config("Cannot determine config directory".into()))?
            .join("fleetcheck");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Rule settings");

        let min_vehicle_id_length: usize = Input::new()
            .with_prompt("  Minimum vehicle identifier length")
            .default(default_min_vehicle_id_length())
            .interact_text()
            .map_err(|e| FleetCheckError::Config(format!("Input error: {}", e)))?;

        let block_maintenance_status = Confirm::new()
            .with_prompt("  Treat vehicles in Maintenance status as unavailable?")
            .default(false)
            .interact()
            .map_err(|e| FleetCheckError::Config(format!("Input error: {}", e)))?;

        let inspection_days: u32 = Input::new()
            .with_prompt("  Inspection interval in days (0 to disable)")
            .default(0)
            .interact_text()
            .map_err(|e| FleetCheckError::Config(format!("Input error: {}", e)))?;

        let config = Config {
            rules: RuleConfig {
                min_vehicle_id_length,
                block_maintenance_status,
                inspection_interval_days: (inspection_days > 0).then_some(inspection_days),
                finished_markers: default_finished_markers(),
            },
            storage: StorageConfig::default(),
        };
        config.validate()?;

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| FleetCheckError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# fleetcheck configuration\n# Generated by `fleetcheck init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!();
        println!("Configuration saved to {}", config_path.display());

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return result;
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    /// Resolve the data directory: CLI override, then `storage.data_dir`,
    /// then `FLEETCHECK_DATA_DIR`, then the XDG data directory.
    pub fn data_dir(&self, data_dir_override: Option<&Path>) -> Result<PathBuf> {
        let dir = if let Some(dir) = data_dir_override {
            dir.to_path_buf()
        } else if let Some(dir) = &self.storage.data_dir {
            dir.clone()
        } else if let Ok(dir) = std::env::var("FLEETCHECK_DATA_DIR") {
            PathBuf::from(dir)
        } else {
            dirs::data_dir()
                .ok_or_else(|| FleetCheckError::Config("Cannot determine data directory".into()))?
                .join("fleetcheck")
        };

        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    pub fn db_path(&self, data_dir_override: Option<&Path>) -> Result<PathBuf> {
        Ok(self.data_dir(data_dir_override)?.join("fleetcheck.db"))
    }
}
