// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Internal library for QAGEN tool.
//!
//! QAGEN stands for "QA edge-case GENerator". It is a tool that collects a feature description
//! from the user, hands a fixed destructive-testing prompt plus that description to a hosted
//! generative model, and renders the model's CSV-formatted answer as a terminal table alongside a
//! downloadable CSV file. The point is to automate the unpredictable half of QA: security probes,
//! boundary values, type mismatches, and localization input that nobody writes by hand.
//!
//! ## The Shape of a Run
//!
//! Every invocation is one linear pass through five stages: collect the three input fields
//! (feature name, platform, free-form context), template them into a fixed prompt, block on a
//! single `generateContent` call against the Gemini API, strip any markdown fencing the model
//! wrapped around its answer, and parse what remains as CSV under a fixed four-column header
//! contract. Nothing persists between runs. There is no cache, no history, and no shared state,
//! so a failed run is retried by simply running the tool again.
//!
//! The API credential is read once from the process environment and injected into the model
//! client. A missing credential halts the run before any prompt is built or any network activity
//! occurs.

#![warn(
    clippy::complexity,
    clippy::correctness,
    missing_debug_implementations,
    rust_2021_compatibility
)]
#![doc(issue_tracker_base_url = "https://github.com/awkless/qagen/issues")]

pub mod client;
pub mod cmd;
pub mod config;
pub mod model;
pub mod normalize;
pub mod prompt;
pub mod table;

/// Error variants for the full generation pipeline.
///
/// Each stage of the pipeline owns a distinct set of variants so callers can branch on the kind
/// of failure instead of matching on error text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// API credential was never placed into process environment.
    #[error("Environment variable 'API_KEY' is not set, cannot reach model API")]
    MissingApiKey,

    /// Feature name field was left empty.
    #[error("Feature name cannot be empty")]
    EmptyFeatureName,

    /// Model endpoint could not produce a usable response.
    #[error("Model call failed: {message}")]
    ModelCall { message: String },

    /// First line of model response did not match the expected CSV header.
    #[error("Expected CSV header {expect:?}, but model produced {found:?}")]
    HeaderMismatch { expect: String, found: String },

    /// Model response body is not parsable CSV.
    #[error("Model response is not valid CSV: {0}")]
    MalformedCsv(#[from] csv::Error),

    /// No way to determine path to configuration directory.
    #[error("Cannot determine path to configuration directory")]
    NoWayConfig,

    #[error(transparent)]
    Config(#[from] ::config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Map error to exit status of QAGEN binary.
///
/// Downcasts to [`Error`] to hand each failure kind its own sysexits-style code. Anything that
/// did not originate from this crate falls through as a plain software fault.
pub fn exit_status_from_error(error: anyhow::Error) -> i32 {
    match error.downcast_ref::<Error>() {
        Some(Error::MissingApiKey | Error::NoWayConfig | Error::Config(..)) => exitcode::CONFIG,
        Some(Error::EmptyFeatureName) => exitcode::USAGE,
        Some(Error::ModelCall { .. }) => exitcode::UNAVAILABLE,
        Some(Error::HeaderMismatch { .. } | Error::MalformedCsv(..)) => exitcode::DATAERR,
        Some(Error::Io(..)) => exitcode::IOERR,
        None => exitcode::SOFTWARE,
    }
}
