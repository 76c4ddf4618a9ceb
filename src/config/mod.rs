//! Configuration module for bqcat.
//!
//! Handles the settings file, environment variables, and project/dataset selection.

mod connection;
mod settings;

pub use connection::{ConnectionConfig, ConnectionError};
pub use settings::{
    expand_env_vars, OutputSettings, ProfileSettings, Settings, SettingsError,
};
