//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::constants;

/// Backend configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub storage: StorageSettings,
    pub auth: AuthSettings,
    pub ai: AiSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub cors_origin: String,
    /// Built front-end served for unknown GET routes, when present
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    pub body_limit_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub data_path: PathBuf,
    pub uploads_dir: PathBuf,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    /// Plain password or an argon2 PHC string
    #[serde(default)]
    pub admin_password: String,
    #[serde(default)]
    pub jwt_secret: String,
    pub token_expiry_days: i64,
}

impl AuthSettings {
    pub fn is_configured(&self) -> bool {
        !self.admin_password.is_empty() && !self.jwt_secret.is_empty()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiSettings {
    #[serde(default)]
    pub api_key: String,
    pub base_url: String,
    /// Overrides the `/v1` URL derived from `base_url`
    #[serde(default)]
    pub openai_base_url: Option<String>,
    pub image_model: String,
    pub text_model: String,
    pub description_language: String,
    pub timeout_seconds: u64,
}

impl AiSettings {
    pub fn is_enabled(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 3000)?
            .set_default("app.name", "menuboard-server")?
            .set_default("app.cors_origin", "*")?
            .set_default("app.body_limit_bytes", constants::DEFAULT_BODY_LIMIT_BYTES as i64)?
            .set_default("storage.data_path", "data/menu.json")?
            .set_default("storage.uploads_dir", "uploads")?
            .set_default("storage.max_upload_bytes", constants::DEFAULT_MAX_UPLOAD_BYTES as i64)?
            .set_default("auth.token_expiry_days", constants::DEFAULT_TOKEN_EXPIRY_DAYS)?
            .set_default("ai.base_url", constants::DEFAULT_AI_BASE_URL)?
            .set_default("ai.image_model", constants::DEFAULT_AI_IMAGE_MODEL)?
            .set_default("ai.text_model", constants::DEFAULT_AI_TEXT_MODEL)?
            .set_default("ai.description_language", "Russian")?
            .set_default("ai.timeout_seconds", 60)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("MENUBOARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }
}

/// Display and admin client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Server base URL, e.g. `http://menu.local:3000`
    #[serde(default)]
    pub remote_url: Option<String>,
    pub cache_dir: PathBuf,
    pub poll_interval_seconds: u64,
    pub request_timeout_seconds: u64,
    pub frame_millis: u64,
    pub rotation: RotationSettings,
    pub scroll: ScrollSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RotationSettings {
    pub initial_delay_ms: u64,
    pub cadence_ms: u64,
    pub exit_grace_ms: u64,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            initial_delay_ms: constants::PROMO_INITIAL_DELAY_MS,
            cadence_ms: constants::PROMO_CADENCE_MS,
            exit_grace_ms: constants::PROMO_EXIT_GRACE_MS,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScrollSettings {
    pub start_delay_ms: u64,
    pub down_step: f64,
    pub up_step: f64,
    pub dwell_ms: u64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            start_delay_ms: constants::SCROLL_START_DELAY_MS,
            down_step: constants::SCROLL_DOWN_STEP,
            up_step: constants::SCROLL_UP_STEP,
            dwell_ms: constants::SCROLL_DWELL_MS,
        }
    }
}

impl ClientConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("cache_dir", ".menuboard")?
            .set_default("poll_interval_seconds", constants::SYNC_POLL_INTERVAL_SECS as i64)?
            .set_default("request_timeout_seconds", 15)?
            .set_default("frame_millis", 50)?
            .set_default("rotation.initial_delay_ms", constants::PROMO_INITIAL_DELAY_MS as i64)?
            .set_default("rotation.cadence_ms", constants::PROMO_CADENCE_MS as i64)?
            .set_default("rotation.exit_grace_ms", constants::PROMO_EXIT_GRACE_MS as i64)?
            .set_default("scroll.start_delay_ms", constants::SCROLL_START_DELAY_MS as i64)?
            .set_default("scroll.down_step", constants::SCROLL_DOWN_STEP)?
            .set_default("scroll.up_step", constants::SCROLL_UP_STEP)?
            .set_default("scroll.dwell_ms", constants::SCROLL_DWELL_MS as i64)?
            .add_source(File::with_name("config/client").required(false))
            .add_source(
                Environment::with_prefix("MENUBOARD_CLIENT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }

    pub fn document_cache_path(&self) -> PathBuf {
        self.cache_dir.join("menu.json")
    }

    /// Admin draft, kept apart from the display cache
    pub fn draft_path(&self) -> PathBuf {
        self.cache_dir.join("draft.json")
    }

    pub fn profile_path(&self) -> PathBuf {
        self.cache_dir.join("profile.json")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.cache_dir.join("logs")
    }
}
