// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Data model types.
//!
//! Contains the types that flow through a single generation run: the user's [`TestRequest`], the
//! raw [`ModelResponse`] handed back by the model endpoint, and the parsed [`TestCaseTable`] that
//! gets rendered and written out. All of them live for exactly one run. There is no identity
//! beyond one interaction, and no concurrent access to worry about.

use crate::{Error, Result};

use clap::ValueEnum;
use tracing::debug;

/// Fixed header contract every generated table must satisfy.
///
/// The prompt instructs the model to emit exactly these four columns, and the parser rejects any
/// response whose first record differs.
pub const CSV_HEADER: [&str; 4] =
    ["Category", "Test Case Description", "Test Data / Input", "Expected Result"];

/// Feature description collected from the user.
///
/// # Invariants
///
/// - Feature name is non-empty after trimming.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestRequest {
    /// Name of the feature under test.
    pub feature_name: String,

    /// Platform or environment the feature runs on.
    pub platform: Platform,

    /// Optional free-form context or acceptance criteria.
    pub context: String,
}

impl TestRequest {
    /// Construct new validated test request.
    ///
    /// No validation is performed on platform or context. Context may be empty, and no length
    /// limits or character filtering apply to either field.
    ///
    /// # Errors
    ///
    /// - Return [`Error::EmptyFeatureName`] if feature name is empty after trimming.
    pub fn new(
        feature_name: impl Into<String>,
        platform: Platform,
        context: impl Into<String>,
    ) -> Result<Self> {
        let feature_name = feature_name.into();
        if feature_name.trim().is_empty() {
            return Err(Error::EmptyFeatureName);
        }

        Ok(Self { feature_name, platform, context: context.into() })
    }

    /// File name to offer the generated table under.
    ///
    /// Derived from the feature name with spaces replaced by underscores and every character
    /// lower-cased, e.g. "Login Form" becomes `qa_edge_cases_login_form.csv`.
    pub fn output_file_name(&self) -> String {
        let stem = self.feature_name.replace(' ', "_").to_lowercase();
        format!("qa_edge_cases_{stem}.csv")
    }
}

/// Platform variants a feature under test can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    /// Browser-facing web application.
    WebApplication,

    /// Mobile app for iOS or Android.
    MobileApp,

    /// HTTP REST API surface.
    RestApi,

    /// Database or raw SQL layer.
    DatabaseSql,
}

impl Platform {
    /// All selectable platform variants in display order.
    pub fn all() -> [Platform; 4] {
        [Platform::WebApplication, Platform::MobileApp, Platform::RestApi, Platform::DatabaseSql]
    }

    /// Human readable label used in prompts and generated output.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::WebApplication => "Web Application",
            Platform::MobileApp => "Mobile App (iOS/Android)",
            Platform::RestApi => "REST API",
            Platform::DatabaseSql => "Database / SQL",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Raw text handed back by the model endpoint.
///
/// Ownership is transient. The normalizer consumes it immediately, so nothing here is ever
/// stored or reused across calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelResponse {
    /// Full response body as plain text.
    pub raw_text: String,
}

/// One generated test scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCaseRow {
    /// Which of the required test categories this scenario belongs to.
    pub category: String,

    /// Description of the destructive scenario.
    pub description: String,

    /// Specific payload, input, or state to feed the feature.
    pub test_data: String,

    /// How the feature is expected to hold up.
    pub expected_result: String,
}

/// Ordered collection of generated test scenarios.
///
/// # Invariants
///
/// - All rows carry the same four columns as [`CSV_HEADER`].
/// - Row order matches the order the model produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestCaseTable {
    /// Parsed scenario rows in original order.
    pub rows: Vec<TestCaseRow>,
}

impl TestCaseTable {
    /// Construct new table from parsed rows.
    pub fn new(rows: Vec<TestCaseRow>) -> Self {
        Self { rows }
    }

    /// Number of scenario rows in table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Determine if table holds no scenario rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize table back into a CSV document.
    ///
    /// Always emits the fixed header first, then every row in original order. This is the exact
    /// content offered as a downloadable file.
    ///
    /// # Errors
    ///
    /// - Return [`Error::MalformedCsv`] if a record cannot be written.
    ///
    /// [`Error::MalformedCsv`]: crate::Error::MalformedCsv
    pub fn to_csv(&self) -> Result<String> {
        let mut buffer = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut buffer);
            writer.write_record(CSV_HEADER)?;
            for row in &self.rows {
                writer.write_record([
                    row.category.as_str(),
                    row.description.as_str(),
                    row.test_data.as_str(),
                    row.expected_result.as_str(),
                ])?;
            }
            writer.flush()?;
        }
        debug!("Serialized {} scenario rows to CSV", self.rows.len());

        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
