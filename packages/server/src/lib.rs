// Link Check Service - API Core
//
// HTTP boundary around the linkcheck library: form submission, format
// negotiation (JSON / CSV attachment / legacy envelope), static index page.

pub mod config;
pub mod server;

pub use config::*;
