use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    ReadFile,
    BadToml,
    NoEndpoint,
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReadFile => write!(f, "Failed to read config file"),
            ConfigError::BadToml => write!(f, "Failed to parse TOML data"),
            ConfigError::NoEndpoint => write!(f, "No helpdesk endpoint configured"),
        }
    }
}
