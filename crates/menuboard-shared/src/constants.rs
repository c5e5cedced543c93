//! Application-wide constants

pub const DEFAULT_TOKEN_EXPIRY_DAYS: i64 = 30;
pub const TOKEN_SUBJECT_ADMIN: &str = "admin";
pub const ROLE_ADMIN: &str = "admin";

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 20 * 1024 * 1024;
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

pub const DEFAULT_AI_BASE_URL: &str = "https://api.artemox.com";
pub const DEFAULT_AI_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_AI_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const AI_LOG_PREVIEW_CHARS: usize = 200;

pub const MENU_PATH: &str = "/api/menu";
pub const LOGIN_PATH: &str = "/api/login";
pub const UPLOADS_PATH: &str = "/api/uploads";
pub const AI_IMAGE_PATH: &str = "/api/ai/image";
pub const AI_DESCRIPTION_PATH: &str = "/api/ai/description";

/// Upper bound for `lastUpdated`: 9999-12-31T23:59:59.999Z
pub const MAX_LAST_UPDATED: i64 = 253_402_300_799_999;

pub const SYNC_POLL_INTERVAL_SECS: u64 = 120;

pub const PROMO_INITIAL_DELAY_MS: u64 = 8_000;
pub const PROMO_CADENCE_MS: u64 = 50_000;
pub const PROMO_EXIT_GRACE_MS: u64 = 800;

pub const SCROLL_START_DELAY_MS: u64 = 5_000;
pub const SCROLL_DWELL_MS: u64 = 8_000;
pub const SCROLL_DOWN_STEP: f64 = 0.4;
pub const SCROLL_UP_STEP: f64 = 5.0;
