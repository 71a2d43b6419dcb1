//! Configuration management for platkit.
//!
//! User preferences ([`settings::Config`]) are stored as a TOML file and
//! loaded at startup by the frontend.

pub mod settings;
