use std::fmt;

#[derive(Debug)]
pub enum AgentError {
    MakeDirectory,
    LogFile,
}

impl std::error::Error for AgentError {}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::MakeDirectory => write!(f, "Failed to create directory"),
            AgentError::LogFile => write!(f, "Failed to create log file"),
        }
    }
}
