//! Configuration loading for the control unit binary.
//!
//! Loads `LgcsConfig` from TOML, applies command-line overrides and
//! validates the result. A missing file is not fatal: the certified
//! defaults are used and a warning is logged.

use std::path::{Path, PathBuf};

use lgcs_common::config::{ConfigError, ConfigLoader, EventFormat, LgcsConfig};
use lgcs_common::gear::config::FaultPolicy;
use lgcs_common::gear::state::GearPosition;
use tracing::{info, warn};

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from this file.
    File(PathBuf),
    /// File missing, defaults used.
    Defaults,
}

/// Command-line overrides, applied on top of the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub initial_position: Option<GearPosition>,
    pub fault_policy: Option<FaultPolicy>,
    pub time_scale: Option<f64>,
    pub log_file: Option<PathBuf>,
    pub json_events: bool,
}

impl Overrides {
    /// Write every set override into `config`.
    pub fn apply(&self, config: &mut LgcsConfig) {
        if let Some(pos) = self.initial_position {
            config.gear.initial_position = pos;
        }
        if let Some(policy) = self.fault_policy {
            config.gear.fault_policy = policy;
        }
        if let Some(scale) = self.time_scale {
            config.gear.time_scale = scale;
        }
        if let Some(ref file) = self.log_file {
            config.log.file = file.clone();
        }
        if self.json_events {
            config.log.format = EventFormat::Json;
        }
    }
}

/// Load `path` (or defaults if it does not exist), apply overrides, validate.
pub fn resolve_config(
    path: &Path,
    overrides: &Overrides,
) -> Result<(LgcsConfig, ConfigSource), ConfigError> {
    let (mut config, source) = match LgcsConfig::load(path) {
        Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
        Err(ConfigError::FileNotFound) => {
            warn!(
                "Config file {} not found. Using certified defaults.",
                path.display()
            );
            (LgcsConfig::default(), ConfigSource::Defaults)
        }
        Err(e) => return Err(e),
    };

    overrides.apply(&mut config);
    config.validate()?;

    info!(
        "Config OK: initial={}, policy={}, down={}s, up={}s, backup_pump={}s, time_scale={}",
        config.gear.initial_position,
        config.gear.fault_policy.as_str(),
        config.gear.gear_down_time_s,
        config.gear.gear_up_time_s,
        config.gear.backup_pump_delay_s,
        config.gear.time_scale,
    );
    Ok((config, source))
}

/// Render the effective configuration as TOML.
pub fn render_config(config: &LgcsConfig) -> Result<String, ConfigError> {
    toml::to_string_pretty(config).map_err(|e| ConfigError::ParseError(e.to_string()))
}
