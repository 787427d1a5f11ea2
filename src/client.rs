// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Model API client.
//!
//! One operation lives here: send a built prompt to the hosted Gemini `generateContent` endpoint
//! and wait for the full response text. The call is synchronous from the user's point of view,
//! requests exactly one candidate, and samples at a moderate temperature on purpose, since the
//! goal is creative destructive test variety rather than deterministic output.
//!
//! The [`LlmClient`] trait is the seam for substituting a canned client in tests. The credential
//! is injected through the constructor, so nothing in here reads ambient environment state.

use crate::{
    config::Settings,
    model::ModelResponse,
    prompt::PromptPayload,
    Error, Result,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Base URL of the hosted generative model API.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Number of independent completions requested per call.
const CANDIDATE_COUNT: u32 = 1;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Generative model client interface.
#[async_trait]
pub trait LlmClient {
    /// Generate response text for given prompt payload.
    ///
    /// # Errors
    ///
    /// - Return [`Error::ModelCall`] for any transport, authentication, quota, or decoding
    ///   failure. None of them are retried.
    ///
    /// [`Error::ModelCall`]: crate::Error::ModelCall
    async fn generate(&self, payload: &PromptPayload) -> Result<ModelResponse>;
}

/// Client for the hosted Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
}

impl GeminiClient {
    /// Construct new Gemini client with injected credential and generation settings.
    ///
    /// # Errors
    ///
    /// - Return [`Error::ModelCall`] if the underlying HTTP client cannot be constructed.
    ///
    /// [`Error::ModelCall`]: crate::Error::ModelCall
    pub fn new(api_key: impl Into<String>, settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build().map_err(
            |error| Error::ModelCall { message: format!("Cannot construct HTTP client: {error}") },
        )?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    #[instrument(skip(self, payload), level = "debug")]
    async fn generate(&self, payload: &PromptPayload) -> Result<ModelResponse> {
        let url = format!("{GEMINI_BASE_URL}/{}:generateContent?key={}", self.model, self.api_key);
        let body = GenerateContentRequest::from_payload(payload, self.temperature);
        debug!("Request single candidate from {:?} at temperature {}", self.model, self.temperature);

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|error| Error::ModelCall { message: format!("Request failed: {error}") })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::ModelCall { message: format!("API error ({status}): {text}") });
        }

        let json: GenerateContentResponse = response
            .json()
            .await
            .map_err(|error| Error::ModelCall { message: format!("Cannot parse JSON: {error}") })?;

        let raw_text = json.first_candidate_text()?;
        Ok(ModelResponse { raw_text })
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn from_payload(payload: &PromptPayload, temperature: f32) -> Self {
        let parts = vec![
            Part { text: payload.system_instruction.clone() },
            Part { text: payload.user_instruction.clone() },
        ];

        Self {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                candidate_count: CANDIDATE_COUNT,
                temperature,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "candidateCount")]
    candidate_count: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Extract text of first part of first candidate.
    ///
    /// # Errors
    ///
    /// - Return [`Error::ModelCall`] if the response carries no usable candidate text, which
    ///   happens when generation was blocked or the endpoint answered with an empty shell.
    ///
    /// [`Error::ModelCall`]: crate::Error::ModelCall
    fn first_candidate_text(self) -> Result<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(Error::ModelCall { message: "Model returned no candidate text".into() })
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}
