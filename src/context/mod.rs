//! GPU device access.

pub use self::context::Context;

mod context;
