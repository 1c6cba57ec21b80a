pub(crate) mod capture;
pub(crate) mod error;

pub use capture::{capture, thumbnail, Screenshot};
