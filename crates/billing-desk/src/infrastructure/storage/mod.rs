//! Storage infrastructure: configuration and key-value settings persistence.
//!
//! - `config` reads and writes the TOML application config from the
//!   platform-appropriate directory, with defaults on first run.
//! - `settings` implements the application's `SettingsStore` trait, either as
//!   a JSON document on disk or as an in-memory map.

pub mod config;
pub mod settings;
