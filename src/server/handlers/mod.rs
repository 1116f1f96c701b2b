//! HTTP request handlers for the web server.

mod aliases;
mod helpers;
mod output;
pub mod requests;
mod suggest;
mod tags;

// Re-export handlers for use by the router
pub use aliases::save_aliases;
pub use output::append_output;
pub use suggest::api_suggest;
pub use tags::{append_tags, save_tags};
