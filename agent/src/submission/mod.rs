pub(crate) mod client;
pub(crate) mod error;

pub use client::TicketClient;
