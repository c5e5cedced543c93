// ============================================================================
// Menu Board Infrastructure - OpenAI-compatible AI Client
// File: crates/menuboard-infrastructure/src/ai/openai_compat.rs
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use menuboard_core::error::DomainError;
use menuboard_core::repositories::{ContentGenerator, GeneratedImage};
use menuboard_shared::config::AiSettings;
use menuboard_shared::constants::AI_LOG_PREVIEW_CHARS;
use menuboard_shared::utils::{mask_key, normalize_base_url, openai_base_url, truncate};

/// Keys different providers use for the base64 image payload
const IMAGE_B64_KEYS: [&str; 5] = ["b64_json", "b64", "base64", "image", "image_base64"];

#[derive(Clone)]
pub struct OpenAiCompatClient {
    client: Client,
    base_url: String,
    api_key: String,
    image_model: String,
    text_model: String,
}

#[derive(Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    response_format: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl OpenAiCompatClient {
    /// `None` when no API key is configured.
    pub fn from_settings(settings: &AiSettings) -> Option<Self> {
        if !settings.is_enabled() {
            return None;
        }
        let base_url = settings
            .openai_base_url
            .as_deref()
            .map(normalize_base_url)
            .unwrap_or_else(|| openai_base_url(&settings.base_url));

        info!(
            "AI client configured: baseUrl={} apiKey={}",
            base_url,
            mask_key(&settings.api_key)
        );

        Some(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(settings.timeout_seconds))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
            api_key: settings.api_key.clone(),
            image_model: settings.image_model.clone(),
            text_model: settings.text_model.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B: Serialize>(
        &self,
        request_id: &str,
        path: &str,
        body: &B,
    ) -> Result<Value, DomainError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(request_id, url = %url, "AI network error: {}", e);
                DomainError::AiFailed(e.to_string())
            })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            error!(
                request_id,
                url = %url,
                status = status.as_u16(),
                body = %truncate(&text, AI_LOG_PREVIEW_CHARS),
                "AI request failed"
            );
            return Err(DomainError::AiFailed(format!("{} returned {}", path, status)));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            error!(request_id, "AI response is not JSON: {}", e);
            DomainError::AiFailed(e.to_string())
        })
    }
}

/// First item of `data`: inline base64 under any known key, else its `url`.
fn extract_image(response: &Value) -> Option<GeneratedImage> {
    let first = response.get("data")?.as_array()?.first()?;
    let b64 = IMAGE_B64_KEYS
        .iter()
        .filter_map(|key| first.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty());
    if let Some(b64) = b64 {
        return Some(GeneratedImage::Base64(b64.to_string()));
    }
    first
        .get("url")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(|url| GeneratedImage::Url(url.to_string()))
}

/// `choices[0].message.content`, falling back to `choices[0].text`.
fn extract_text(response: &Value) -> String {
    let Some(choice) = response
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
    else {
        return String::new();
    };
    choice
        .pointer("/message/content")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| choice.get("text").and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl ContentGenerator for OpenAiCompatClient {
    async fn generate_image(
        &self,
        request_id: &str,
        prompt: &str,
    ) -> Result<Option<GeneratedImage>, DomainError> {
        let body = ImageGenerationRequest {
            model: &self.image_model,
            prompt,
            n: 1,
            response_format: "b64_json",
        };
        let response = self.post_json(request_id, "images/generations", &body).await?;
        let image = extract_image(&response);
        let data_count = response
            .get("data")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);

        info!(
            request_id,
            data_count,
            has_b64 = matches!(image, Some(GeneratedImage::Base64(_))),
            has_url = matches!(image, Some(GeneratedImage::Url(_))),
            "[ai:image] response"
        );
        Ok(image)
    }

    async fn generate_text(&self, request_id: &str, prompt: &str) -> Result<String, DomainError> {
        let body = ChatRequest {
            model: &self.text_model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        let response = self.post_json(request_id, "chat/completions", &body).await?;
        Ok(extract_text(&response))
    }
}
