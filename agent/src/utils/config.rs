use super::{env::get_env_value, error::ConfigError};
use log::error;
use serde::{Deserialize, Serialize};
use std::{fs::read, str::from_utf8};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AgentToml {
    pub helpdesk: Helpdesk,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Helpdesk {
    /// Ticket creation URL. Ex: https://example.happyfox.com/api/1.1/json/tickets/
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub auth_code: String,
    /// Display name of the destination category queue
    #[serde(default = "default_category_name")]
    pub category: String,
    /// Category id used whenever the name cannot be resolved
    #[serde(default = "default_category_id")]
    pub default_category: u32,
    /// Fallback sender address when the form has no usable email
    #[serde(default)]
    pub default_email: String,
    #[serde(default = "default_log_path")]
    pub log_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_category_name() -> String {
    String::from("Helpdesk - Colorado")
}

fn default_category_id() -> u32 {
    1
}

fn default_log_path() -> String {
    if cfg!(target_os = "windows") {
        format!("{}\\helpdesk-agent", get_env_value("ProgramData"))
    } else {
        String::from("/var/helpdesk-agent")
    }
}

fn default_log_level() -> String {
    String::from("warn")
}

/// Parse the provided agent TOML config file
pub(crate) fn agent_config(path: &str) -> Result<AgentToml, ConfigError> {
    let bytes = match read(path) {
        Ok(result) => result,
        Err(err) => {
            error!("[config] Failed to read config file {path}: {err:?}");
            return Err(ConfigError::ReadFile);
        }
    };

    let config: AgentToml = match toml::from_str(from_utf8(&bytes).unwrap_or_default()) {
        Ok(result) => result,
        Err(err) => {
            error!("[config] Failed to parse agent config {path}: {err:?}");
            return Err(ConfigError::BadToml);
        }
    };

    if config.helpdesk.endpoint.is_empty() {
        return Err(ConfigError::NoEndpoint);
    }

    Ok(config)
}

/// Build a config from environment variables alone, for hosts deployed without
/// an agent.toml file
pub(crate) fn default_config() -> Result<AgentToml, ConfigError> {
    let mut config = AgentToml {
        helpdesk: Helpdesk {
            endpoint: String::new(),
            api_key: String::new(),
            auth_code: String::new(),
            category: default_category_name(),
            default_category: default_category_id(),
            default_email: String::new(),
            log_path: default_log_path(),
            log_level: default_log_level(),
        },
    };

    apply_env(&mut config.helpdesk);
    if config.helpdesk.endpoint.is_empty() {
        error!("[config] No config file and HELPDESK_ENDPOINT is not set");
        return Err(ConfigError::NoEndpoint);
    }

    Ok(config)
}

/// Environment variables win over file values when both are present
pub(crate) fn apply_env(config: &mut Helpdesk) {
    let overrides = [
        ("HELPDESK_ENDPOINT", &mut config.endpoint),
        ("HELPDESK_API_KEY", &mut config.api_key),
        ("HELPDESK_AUTH_CODE", &mut config.auth_code),
        ("HELPDESK_CATEGORY", &mut config.category),
        ("HELPDESK_DEFAULT_EMAIL", &mut config.default_email),
    ];

    for (key, value) in overrides {
        let env_value = get_env_value(key);
        if !env_value.is_empty() {
            *value = env_value;
        }
    }
}
