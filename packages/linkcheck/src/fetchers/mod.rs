//! Fetcher implementations.
//!
//! - `HttpFetcher` - reqwest client with timeout, redirects and a fixed User-Agent
//! - `MockFetcher` - canned responses for tests

pub mod http;
pub mod mock;

pub use http::HttpFetcher;
pub use mock::{MockFetcher, MockResponse};
