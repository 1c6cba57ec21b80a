use crate::activation::{ActivationShell, EventLoop, TicketForm};
use crate::submission::TicketClient;
use crate::utils::config::{agent_config, apply_env, default_config};
use crate::utils::logging::setup_logging;
use log::{info, warn};
use simplelog::{Config, WriteLogger};
use std::{sync::Arc, thread};

/// Start the helpdesk agent and run the UI-owning event loop until quit.
///
/// `make_form` builds the presentation layer around the activation handle.
/// `host` is the out-of-scope tray/hotkey side, it gets its own thread and its
/// own handle for posting activations
pub fn start_agent<F, M, H>(path: Option<&str>, make_form: M, host: H)
where
    F: TicketForm,
    M: FnOnce(ActivationShell) -> F,
    H: FnOnce(ActivationShell) + Send + 'static,
{
    // By default we assume agent.toml is in same directory as binary
    let config_path = path.unwrap_or("agent.toml");

    let mut config = match agent_config(config_path) {
        Ok(result) => result,
        // No usable file, fall back to environment-only configuration
        Err(_err) => match default_config() {
            Ok(result) => result,
            Err(_err) => return,
        },
    };
    apply_env(&mut config.helpdesk);

    match setup_logging(&config.helpdesk) {
        Ok((log_file, level)) => {
            let _ = WriteLogger::init(level, Config::default(), log_file);
        }
        Err(err) => {
            warn!("[agent] Could not set up log file: {err:?}");
        }
    }

    info!(
        "[agent] Running. Tickets go to {} as category \"{}\"",
        config.helpdesk.endpoint, config.helpdesk.category
    );

    let client = Arc::new(TicketClient::new(&config.helpdesk));
    let (event_loop, shell) = EventLoop::new();

    let mut form = make_form(shell.clone());
    thread::spawn(move || host(shell));

    event_loop.run(&mut form, &client);
}
