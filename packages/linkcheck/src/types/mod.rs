//! Data types for the link checking library.

pub mod config;
pub mod record;
pub mod summary;
