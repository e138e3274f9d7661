//! Route handlers, grouped by resource.

pub mod games;
pub mod meta;
pub mod session;
