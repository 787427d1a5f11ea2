// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Command implementation.
//!
//! This module is the forward facing API of internal library. It is meant to be used in `main` of
//! the QAGEN binary. The tool exposes exactly one trigger action, so the CLI is a flat set of
//! options rather than a command set: any input field not given as a flag is collected
//! interactively, then the whole pipeline runs linearly within that one invocation.

use crate::{
    client::{GeminiClient, LlmClient},
    config::{self, Settings},
    model::{Platform, TestCaseTable, TestRequest},
    normalize::normalize,
    prompt::PromptPayload,
    table::{self, TablizeScenarios},
};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use inquire::{Select, Text};
use std::{path::PathBuf, time::Duration};
use tracing::{info, instrument};

/// QAGEN public CLI.
#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "qagen [options]",
    version,
)]
pub struct Qagen {
    /// Name of feature to generate edge cases for.
    #[arg(short, long, value_name = "name")]
    pub feature: Option<String>,

    /// Platform or environment the feature runs on.
    #[arg(short, long, value_enum, value_name = "platform")]
    pub platform: Option<Platform>,

    /// Additional context or acceptance criteria.
    #[arg(short, long, value_name = "text")]
    pub context: Option<String>,

    /// Directory to write generated CSV file into.
    #[arg(short, long, value_name = "dir")]
    pub output: Option<String>,

    /// Render table without writing a CSV file.
    #[arg(long)]
    pub no_save: bool,
}

impl Qagen {
    /// Run scenario generation based on given arguments.
    ///
    /// Halts before any network activity when the API credential is missing, or when the feature
    /// name turns out empty. Every failure is surfaced once and nothing is retried, since a rerun
    /// of the binary is the retry.
    ///
    /// # Errors
    ///
    /// Will fail if any stage of the generation pipeline fails.
    pub async fn run(self) -> Result<()> {
        let settings = Settings::new().with_context(|| "Cannot load generation settings")?;
        let api_key = config::api_key()?;
        let request = self.collect_request()?;

        let client = GeminiClient::new(api_key, &settings)?;
        let table = run_pipeline(&client, &request).await?;
        TablizeScenarios::new(&table).fancy();

        if !self.no_save {
            let dir = resolve_output_dir(self.output.as_deref(), &settings)?;
            let path = table::write_csv_file(&table, &dir, request.output_file_name())?;
            info!("Saved {} scenarios to {path:?}", table.len());
        }

        Ok(())
    }

    /// Collect all three input fields, prompting for whatever flags left out.
    #[instrument(skip(self), level = "debug")]
    fn collect_request(&self) -> Result<TestRequest> {
        let feature = match &self.feature {
            Some(feature) => feature.clone(),
            None => Text::new("Feature name:")
                .with_placeholder("e.g. Credit Card Payment Form")
                .with_help_message("The specific feature you want to test")
                .prompt()?,
        };

        let platform = match self.platform {
            Some(platform) => platform,
            None => Select::new("Platform / environment:", Platform::all().to_vec()).prompt()?,
        };

        let context = match &self.context {
            Some(context) => context.clone(),
            None => Text::new("Additional context / acceptance criteria:")
                .with_placeholder("e.g. Max character limit is 50. Only accepts US currency.")
                .with_help_message("Optional, leave empty to skip")
                .prompt()?,
        };

        let request = TestRequest::new(feature, platform, context)?;
        Ok(request)
    }
}

/// Run full generation pipeline for one request against given model client.
///
/// Linear pass with no reuse and no concurrency: build prompt, block on the model call behind a
/// spinner, strip markdown fencing, parse the CSV body. Exposed with the client as a parameter so
/// tests can drive the pipeline with a canned client instead of the live endpoint.
///
/// # Errors
///
/// - Will fail if the model call fails for whatever reason.
/// - Will fail if the response does not satisfy the CSV header contract.
#[instrument(skip(client, request), level = "debug")]
pub async fn run_pipeline(
    client: &(impl LlmClient + Sync),
    request: &TestRequest,
) -> crate::Result<TestCaseTable> {
    let payload = PromptPayload::new(request);

    let bar = ProgressBar::new_spinner();
    bar.set_message("Analyzing requirements and generating edge cases");
    bar.enable_steady_tick(Duration::from_millis(100));
    let response = client.generate(&payload).await;
    bar.finish_and_clear();

    let cleaned = normalize(&response?.raw_text);
    let table = table::parse(&cleaned)?;
    info!("Analysis complete, generated {} scenarios for {:?}", table.len(), request.feature_name);

    Ok(table)
}

/// Pick target directory for the generated CSV file.
///
/// Precedence: `--output` flag, then `output_dir` from settings, then current working directory.
/// User supplied paths go through shell expansion, so `~` and environment variables work.
fn resolve_output_dir(flag: Option<&str>, settings: &Settings) -> Result<PathBuf> {
    let target = flag.or(settings.output_dir.as_deref());
    let dir = match target {
        Some(path) => PathBuf::from(shellexpand::full(path)?.into_owned()),
        None => std::env::current_dir()?,
    };

    Ok(dir)
}
