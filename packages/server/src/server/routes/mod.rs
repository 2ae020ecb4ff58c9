// HTTP routes
pub mod check_links;
pub mod health;

pub use check_links::*;
pub use health::*;
