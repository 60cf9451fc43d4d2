//! Generator backed by an OpenAI-compatible chat-completions endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::generator::NarrativeGenerator;
use crate::narrative::{AdvisoryError, AdvisoryNarrative};
use crate::stats::AdvisoryStats;

const SYSTEM_PROMPT: &str = "You are a household finance advisor. You receive aggregate \
statistics of a family's projected fixed commitments as JSON. Reply with ONLY a JSON object \
of the form {\"tips\": [string, string, string], \"alert\": string or null, \
\"recommendation\": string}. Tips are short and practical. Set alert only when fixed \
commitments are above 60% of income. No markdown, no text outside the object.";

#[derive(Debug, Clone)]
pub struct HttpGeneratorConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct HttpNarrativeGenerator {
    client: reqwest::Client,
    config: HttpGeneratorConfig,
}

impl HttpNarrativeGenerator {
    pub fn new(config: HttpGeneratorConfig) -> Result<Self, AdvisoryError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl NarrativeGenerator for HttpNarrativeGenerator {
    #[tracing::instrument(name = "advisory.http_generate", skip_all, fields(model = %self.config.model))]
    async fn generate(&self, stats: &AdvisoryStats) -> Result<AdvisoryNarrative, AdvisoryError> {
        let payload = serde_json::to_string(stats)
            .map_err(|e| AdvisoryError::Malformed(e.to_string()))?;
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": payload },
            ],
            "temperature": 0.7,
        });

        let mut req = self.client.post(&self.config.endpoint).json(&body);
        if let Some(key) = &self.config.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(AdvisoryError::Status(resp.status().as_u16()));
        }

        let completion: ChatCompletion = resp
            .json()
            .await
            .map_err(|e| AdvisoryError::Malformed(e.to_string()))?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AdvisoryError::Malformed("completion has no content".into()))?;

        parse_narrative(&content)
    }
}

/// Pull the outermost `{...}` out of free text (models like to wrap JSON in
/// prose or code fences) and parse it as a narrative.
pub fn parse_narrative(content: &str) -> Result<AdvisoryNarrative, AdvisoryError> {
    let start = content.find('{').ok_or(AdvisoryError::MissingJson)?;
    let end = content.rfind('}').ok_or(AdvisoryError::MissingJson)?;
    if end < start {
        return Err(AdvisoryError::MissingJson);
    }
    let narrative: AdvisoryNarrative = serde_json::from_str(&content[start..=end])
        .map_err(|e| AdvisoryError::Malformed(e.to_string()))?;
    narrative.validate()
}
