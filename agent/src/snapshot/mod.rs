pub(crate) mod collect;
pub(crate) mod error;

pub use collect::collect;
