// ============================================================================
// Menu Board Client - Remote
// File: crates/menuboard-client/src/remote.rs
// Description: HTTP access to the menu board server
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use menuboard_core::MenuDocument;
use menuboard_shared::constants::{
    AI_DESCRIPTION_PATH, AI_IMAGE_PATH, LOGIN_PATH, MENU_PATH, UPLOADS_PATH,
};
use menuboard_shared::now_millis;
use menuboard_shared::utils::normalize_base_url;

use crate::error::ClientError;

/// Server operations the admin and display need. `endpoint` is the server
/// base URL, e.g. `http://menu.local:3000`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRemote: Send + Sync {
    /// `None` when the server has no document yet.
    async fn fetch_menu(&self, endpoint: &str) -> Result<Option<MenuDocument>, ClientError>;

    async fn publish_menu(
        &self,
        endpoint: &str,
        token: &str,
        document: &MenuDocument,
    ) -> Result<MenuDocument, ClientError>;

    async fn login(&self, endpoint: &str, password: &str) -> Result<String, ClientError>;

    async fn upload_image(&self, endpoint: &str, token: &str, data_url: &str) -> Result<String, ClientError>;

    async fn generate_image(
        &self,
        endpoint: &str,
        token: &str,
        name: &str,
        description: &str,
    ) -> Result<String, ClientError>;

    async fn improve_description(
        &self,
        endpoint: &str,
        token: &str,
        name: &str,
        description: &str,
    ) -> Result<String, ClientError>;
}

/// Accepts either the server root or the full menu URL.
pub fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = normalize_base_url(endpoint.trim());
    trimmed
        .strip_suffix(MENU_PATH)
        .map(str::to_string)
        .unwrap_or(trimmed)
}

#[derive(Serialize)]
struct LoginBody<'a> {
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenBody {
    token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadBody<'a> {
    data_url: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageUrlBody {
    image_url: String,
}

#[derive(Serialize)]
struct DishBody<'a> {
    name: &'a str,
    description: &'a str,
}

#[derive(Deserialize)]
struct DescriptionBody {
    #[serde(default)]
    description: String,
}

#[derive(Clone)]
pub struct HttpMenuRemote {
    client: Client,
}

impl HttpMenuRemote {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn url(endpoint: &str, path: &str) -> String {
        format!("{}{}", normalize_endpoint(endpoint), path)
    }

    fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {}", token))
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let code = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
        Err(ClientError::Status {
            status: status.as_u16(),
            code,
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl Default for HttpMenuRemote {
    fn default() -> Self {
        Self::new(Duration::from_secs(15))
    }
}

#[async_trait]
impl MenuRemote for HttpMenuRemote {
    async fn fetch_menu(&self, endpoint: &str) -> Result<Option<MenuDocument>, ClientError> {
        // cache-busting parameter, some signage browsers and proxies cache GETs
        let url = format!("{}?t={}", Self::url(endpoint, MENU_PATH), now_millis());
        debug!("Fetching menu from {}", url);

        let response = Self::send(self.client.get(&url)).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        Self::decode(response).await.map(Some)
    }

    async fn publish_menu(
        &self,
        endpoint: &str,
        token: &str,
        document: &MenuDocument,
    ) -> Result<MenuDocument, ClientError> {
        let builder = self.client.post(Self::url(endpoint, MENU_PATH)).json(document);
        let response = Self::send(Self::authorized(builder, token)).await?;
        Self::decode(response).await
    }

    async fn login(&self, endpoint: &str, password: &str) -> Result<String, ClientError> {
        let builder = self
            .client
            .post(Self::url(endpoint, LOGIN_PATH))
            .json(&LoginBody { password });
        let body: TokenBody = Self::decode(Self::send(builder).await?).await?;
        Ok(body.token)
    }

    async fn upload_image(&self, endpoint: &str, token: &str, data_url: &str) -> Result<String, ClientError> {
        let builder = self
            .client
            .post(Self::url(endpoint, UPLOADS_PATH))
            .json(&UploadBody { data_url });
        let body: ImageUrlBody = Self::decode(Self::send(Self::authorized(builder, token)).await?).await?;
        Ok(body.image_url)
    }

    async fn generate_image(
        &self,
        endpoint: &str,
        token: &str,
        name: &str,
        description: &str,
    ) -> Result<String, ClientError> {
        let builder = self
            .client
            .post(Self::url(endpoint, AI_IMAGE_PATH))
            .json(&DishBody { name, description });
        let body: ImageUrlBody = Self::decode(Self::send(Self::authorized(builder, token)).await?).await?;
        Ok(body.image_url)
    }

    async fn improve_description(
        &self,
        endpoint: &str,
        token: &str,
        name: &str,
        description: &str,
    ) -> Result<String, ClientError> {
        let builder = self
            .client
            .post(Self::url(endpoint, AI_DESCRIPTION_PATH))
            .json(&DishBody { name, description });
        let body: DescriptionBody =
            Self::decode(Self::send(Self::authorized(builder, token)).await?).await?;
        Ok(body.description)
    }
}
