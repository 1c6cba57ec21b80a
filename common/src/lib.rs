pub mod snapshot;
pub mod ticket;
