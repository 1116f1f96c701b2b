//! annotag - local annotation backend.
//!
//! Serves a static annotation UI and keeps three JSON documents on disk: a
//! log of annotated output records, a vocabulary of tags, and aliases that
//! normalize loose tag spellings onto canonical tags.

pub mod cli;
pub mod config;
pub mod models;
pub mod server;
pub mod store;
