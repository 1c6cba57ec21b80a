pub(crate) mod config;
pub(crate) mod env;
pub(crate) mod error;
pub(crate) mod logging;
pub(crate) mod time;
