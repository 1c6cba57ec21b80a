pub(crate) mod shell;

pub use shell::{ActivationShell, EventLoop, TicketForm, UiEvent};
