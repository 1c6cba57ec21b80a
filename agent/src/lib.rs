pub mod activation;
mod error;
pub mod screenshot;
pub mod snapshot;
pub mod start;
pub mod submission;
pub(crate) mod utils;

pub use utils::config::{AgentToml, Helpdesk};
