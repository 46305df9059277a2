//! Vertex AI `generateContent` client
//!
//! Sends the prompt as a text part and the document as a `fileData` part, then
//! concatenates every text part of the first candidate.

use crate::config::ContentServiceConfig;
use crate::service::{ContentRequest, ContentService, ServiceError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PROJECT_ENV: &str = "GOOGLE_CLOUD_PROJECT";
const LOCATION_ENV: &str = "GOOGLE_CLOUD_LOCATION";

const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_HARASSMENT",
];

/// Sampling settings sent with every request
#[derive(Debug, Clone, Copy)]
struct GenerationSettings {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
}

/// Generative content client for Vertex AI publisher models
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    endpoint: String,
    project: String,
    location: String,
    model: String,
    access_token: Option<String>,
    settings: GenerationSettings,
    timeout_secs: u64,
}

impl GeminiClient {
    /// Builds a client from configuration, falling back to the process environment
    ///
    /// Project and location come from the config, then `GOOGLE_CLOUD_PROJECT` and
    /// `GOOGLE_CLOUD_LOCATION`. The bearer token is read from the variable named by
    /// `access-token-env`.
    pub fn from_config(config: &ContentServiceConfig) -> Result<Self, ServiceError> {
        Self::from_config_with(config, |key| std::env::var(key).ok())
    }

    /// Like [`GeminiClient::from_config`] with an explicit variable lookup
    pub fn from_config_with<F>(
        config: &ContentServiceConfig,
        lookup: F,
    ) -> Result<Self, ServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project = config
            .project
            .clone()
            .or_else(|| lookup(PROJECT_ENV))
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                ServiceError::Config(format!(
                    "project must be set in config or via {}",
                    PROJECT_ENV
                ))
            })?;

        let location = config
            .location
            .clone()
            .or_else(|| lookup(LOCATION_ENV))
            .filter(|l| !l.is_empty())
            .ok_or_else(|| {
                ServiceError::Config(format!(
                    "location must be set in config or via {}",
                    LOCATION_ENV
                ))
            })?;

        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| default_endpoint(&location));

        let access_token = lookup(&config.access_token_env).filter(|t| !t.is_empty());
        if access_token.is_none() {
            tracing::warn!(
                "{} is not set; content service requests will be unauthenticated",
                config.access_token_env
            );
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ServiceError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project,
            location,
            model: config.model.clone(),
            access_token,
            settings: GenerationSettings {
                temperature: config.temperature,
                top_p: config.top_p,
                max_output_tokens: config.max_output_tokens,
            },
            timeout_secs: config.request_timeout_secs,
        })
    }

    /// Full `generateContent` URL for the configured model
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            self.endpoint, self.project, self.location, self.model
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_body(&self, request: &ContentRequest) -> GenerateContentRequest {
        let mut parts = vec![Part::Text {
            text: request.prompt.clone(),
        }];

        if !request.document_uri.is_empty() {
            parts.push(Part::FileData {
                file_data: FileData {
                    mime_type: request.mime_type.clone(),
                    file_uri: request.document_uri.clone(),
                },
            });
        }

        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                top_p: self.settings.top_p,
                max_output_tokens: self.settings.max_output_tokens,
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
            safety_settings: HARM_CATEGORIES
                .iter()
                .map(|category| SafetySetting {
                    category: category.to_string(),
                    threshold: "OFF".to_string(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl ContentService for GeminiClient {
    async fn generate(&self, request: ContentRequest) -> Result<String, ServiceError> {
        tracing::debug!(
            "Calling {} with prompt '{}' for {}",
            self.model,
            request.prompt,
            request.document_uri
        );
        let start = std::time::Instant::now();

        let body = self.build_body(&request);
        let mut builder = self.http_client.post(self.generate_url()).json(&body);
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ServiceError::Timeout(self.timeout_secs)
            } else {
                ServiceError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("Content service returned {} for {}", status, request.document_uri);
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))?;

        let text = parsed.into_text();
        tracing::debug!(
            "Content service answered in {}ms (len={})",
            start.elapsed().as_millis(),
            text.len()
        );

        Ok(text)
    }
}

/// Regional endpoint for a location; `global` has no region prefix
fn default_endpoint(location: &str) -> String {
    if location == "global" {
        "https://aiplatform.googleapis.com".to_string()
    } else {
        format!("https://{}-aiplatform.googleapis.com", location)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    FileData {
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
    Other(serde_json::Value),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileData {
    mime_type: String,
    file_uri: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: String,
    threshold: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate; no candidate is an empty answer
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| match part {
                        Part::Text { text } => Some(text),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
