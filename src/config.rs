// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Configuration handling.
//!
//! Generation settings load from an optional `config.toml` under QAGEN's configuration
//! directory. The file is deemed optional, so a missing file simply yields defaults. The API
//! credential is deliberately kept out of the file: it comes from the process environment only,
//! is looked up once at the start of a run, and is injected into the model client from there so
//! business logic never touches ambient state.

use crate::{Error, Result};

use config::{Config, File};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, trace};

/// Environment variable holding the model API credential.
pub const API_KEY_VAR: &str = "API_KEY";

/// Model identifier used when configuration does not override it.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Sampling temperature used when configuration does not override it.
///
/// Moderate randomness on purpose. The tool wants varied destructive scenarios, not the same
/// deterministic table on every run.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Get absolute path to QAGEN's configuration directory.
///
/// # Errors
///
/// - Return [`Error::NoWayConfig`] if path to configuration directory cannot be determined.
///
/// [`Error::NoWayConfig`]: crate::Error::NoWayConfig
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir().map(|path| path.join("qagen")).ok_or(Error::NoWayConfig)
}

/// Generation settings for the model client.
#[derive(Debug, Deserialize, PartialEq)]
pub struct Settings {
    /// Identifier of the hosted model to call.
    pub model: String,

    /// Sampling temperature for generation.
    pub temperature: f32,

    /// Directory to write generated CSV files into.
    pub output_dir: Option<String>,
}

impl Settings {
    /// Construct settings by loading optional configuration file.
    ///
    /// Will not fail if configuration file is missing, because all settings carry defaults.
    ///
    /// # Errors
    ///
    /// - Return [`Error::NoWayConfig`] if configuration directory cannot be determined.
    /// - Return [`Error::Config`] if configuration file cannot be read, or contains invalid TOML
    ///   formatting.
    ///
    /// [`Error::NoWayConfig`]: crate::Error::NoWayConfig
    /// [`Error::Config`]: crate::Error::Config
    pub fn new() -> Result<Self> {
        trace!("Load generation settings");

        let path = config_dir()?.join("config.toml");
        debug!("Load settings at {path:?}");
        let settings: Settings = Config::builder()
            .set_default("model", DEFAULT_MODEL)?
            .set_default("temperature", DEFAULT_TEMPERATURE)?
            .add_source(File::from(path).required(false))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self { model: DEFAULT_MODEL.into(), temperature: DEFAULT_TEMPERATURE as f32, output_dir: None }
    }
}

/// Read model API credential from process environment.
///
/// # Errors
///
/// - Return [`Error::MissingApiKey`] if the variable is unset or blank. Callers must halt before
///   any prompt construction or network activity when this fails.
///
/// [`Error::MissingApiKey`]: crate::Error::MissingApiKey
pub fn api_key() -> Result<String> {
    let value = std::env::var(API_KEY_VAR).unwrap_or_default();
    if value.trim().is_empty() {
        return Err(Error::MissingApiKey);
    }

    Ok(value)
}
