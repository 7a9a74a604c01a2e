// The generative-text port and its live Gemini implementation.
//
// `Enricher` is the single substitution point between live text generation
// and everything else: `Guide` holds an `Option<Box<dyn Enricher>>` and
// treats `None` (or any `Err`) as "use the static templates". Tests plug in
// their own implementations.
//
// `GeminiEnricher` issues one blocking `generateContent` call per prompt:
//
//   POST {endpoint}/models/{model}:generateContent?key={api_key}
//   {"contents": [{"parts": [{"text": prompt}]}]}
//
// and returns the first candidate's first text part, trimmed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EnrichmentConfig;
use crate::error::{EnrichError, Result};

/// Produces free text for a prompt.
pub trait Enricher: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String>;

    /// Short label for logs and status output.
    fn name(&self) -> &str;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Pull the generated text out of a `generateContent` response body.
fn extract_text(body: &str) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| EnrichError::MalformedResponse(e.to_string()))?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| EnrichError::MalformedResponse("no text in first candidate".into()))
}

/// Live enricher backed by the Gemini REST API.
pub struct GeminiEnricher {
    client: reqwest::blocking::Client,
    url: String,
    model: String,
}

impl GeminiEnricher {
    /// Requires a `Ready` config.
    pub fn new(config: &EnrichmentConfig) -> Result<Self> {
        let status = config.status();
        let api_key = match config.api_key.as_deref() {
            Some(key) if config.is_configured() => key,
            _ => return Err(EnrichError::NotConfigured(status)),
        };
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            config.endpoint.trim_end_matches('/'),
            config.model,
            urlencoding::encode(api_key),
        );
        Ok(Self {
            client,
            url,
            model: config.model.clone(),
        })
    }
}

impl Enricher for GeminiEnricher {
    fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };
        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "calling enrichment");
        let response = self.client.post(&self.url).json(&body).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(EnrichError::Status(status.as_u16()));
        }
        let text = response.text()?;
        extract_text(&text)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
