use super::config::Helpdesk;
use crate::error::AgentError;
use log::LevelFilter;
use std::fs::{create_dir_all, File};

/// Create the agent log file and pick the log level from the config
pub(crate) fn setup_logging(config: &Helpdesk) -> Result<(File, LevelFilter), AgentError> {
    if let Err(_err) = create_dir_all(&config.log_path) {
        return Err(AgentError::MakeDirectory);
    }

    let log_file = match File::create(format!("{}/agent.log", config.log_path.as_str())) {
        Ok(result) => result,
        Err(_err) => return Err(AgentError::LogFile),
    };

    let log_level = match config.log_level.as_str() {
        "error" => LevelFilter::Error,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        _ => LevelFilter::Warn,
    };

    Ok((log_file, log_level))
}

#[cfg(test)]
mod tests {
    use super::setup_logging;
    use crate::utils::config::Helpdesk;
    use log::LevelFilter;

    #[test]
    fn test_setup_logging() {
        let config = Helpdesk {
            endpoint: String::from("http://127.0.0.1/tickets/"),
            api_key: String::new(),
            auth_code: String::new(),
            category: String::from("Helpdesk - Colorado"),
            default_category: 1,
            default_email: String::new(),
            log_path: String::from("./tmp/helpdesk-agent"),
            log_level: String::from("info"),
        };

        let (_file, level) = setup_logging(&config).unwrap();
        assert_eq!(level, LevelFilter::Info);
    }
}
