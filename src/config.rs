use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::InputBag;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default assumption values, overlaid by `--inputs` files and `--set` flags.
    #[serde(default = "default_inputs")]
    pub inputs: InputBag,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub inputs: Option<InputBag>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/service-cost-model/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        Self::from_toml(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        let mut parsed: Self = toml::from_str(data)?;
        // A partial [inputs] table only replaces the defaults it names.
        let mut inputs = default_inputs();
        inputs.merge(&parsed.inputs);
        parsed.inputs = inputs;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(inputs) = overrides.inputs {
            self.inputs.merge(&inputs);
        }
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn default_template() -> String {
        let template = r#"# Fractions are written as 0..1 (0.2 = 20%); hybrid portions as 0..100.
[inputs]
# team model
team_size = 5.0
hourly_rate = 75.0
service_efficiency = 0.6
operational_overhead = 0.2
# ticket model
monthly_tickets = 500.0
hours_per_ticket = 2.0
people_per_ticket = 1.0
# platform
platform_cost = 100000.0
platform_maintenance = 5000.0
time_to_build = 3.0
team_reduction = 0.3
process_efficiency = 0.2
# outsource
vendor_rate = 40.0
management_overhead = 0.15
quality_impact = 0.0
knowledge_loss = 0.2
transition_time = 3.0
transition_cost = 20000.0
# hybrid
platform_portion = 40.0
vendor_portion = 30.0

[server]
host = "127.0.0.1"
port = 3001
"#;
        template.to_string()
    }
}

/// Reads an assumptions file; `.json` files are parsed as JSON, anything else as TOML.
pub fn load_inputs_file(path: &Path) -> Result<InputBag> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading inputs: {}", path.display()))?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let inputs = if is_json {
        serde_json::from_str(&data)
            .with_context(|| format!("failed parsing JSON inputs: {}", path.display()))?
    } else {
        toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML inputs: {}", path.display()))?
    };
    Ok(inputs)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: default_inputs(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

pub fn default_inputs() -> InputBag {
    InputBag::new()
        .with("team_size", 5.0)
        .with("hourly_rate", 75.0)
        .with("service_efficiency", 0.6)
        .with("operational_overhead", 0.2)
        .with("monthly_tickets", 500.0)
        .with("hours_per_ticket", 2.0)
        .with("people_per_ticket", 1.0)
        .with("platform_cost", 100_000.0)
        .with("platform_maintenance", 5_000.0)
        .with("time_to_build", 3.0)
        .with("team_reduction", 0.3)
        .with("process_efficiency", 0.2)
        .with("vendor_rate", 40.0)
        .with("management_overhead", 0.15)
        .with("quality_impact", 0.0)
        .with("knowledge_loss", 0.2)
        .with("transition_time", 3.0)
        .with("transition_cost", 20_000.0)
        .with("platform_portion", 40.0)
        .with("vendor_portion", 30.0)
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}
