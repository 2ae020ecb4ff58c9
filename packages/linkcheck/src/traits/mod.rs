//! Trait abstractions for pluggable infrastructure.

pub mod fetcher;
