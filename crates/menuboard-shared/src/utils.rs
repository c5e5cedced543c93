//! Utility functions

use chrono::Utc;
use uuid::Uuid;

/// Keep only the edges of a secret for log output.
pub fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = key.chars().collect();
    let visible = if chars.len() <= 8 { 2 } else { 4 };
    let visible = visible.min(chars.len());
    let head: String = chars[..visible].iter().collect();
    let tail: String = chars[chars.len() - visible..].iter().collect();
    format!("{}...{}", head, tail)
}

pub fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let head: String = value.chars().take(max_chars).collect();
    format!("{}...", head)
}

/// Short correlation id, `<base36 millis>-<6 chars>`.
pub fn request_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", to_base36(millis), &suffix[..6])
}

pub fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// OpenAI-compatible API root for a provider base URL.
pub fn openai_base_url(base_url: &str) -> String {
    let normalized = normalize_base_url(base_url);
    if normalized.ends_with("/v1") {
        normalized
    } else {
        format!("{}/v1", normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key(""), "");
        assert_eq!(mask_key("abcdef"), "ab...ef");
        assert_eq!(mask_key("sk-1234567890"), "sk-1...7890");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("борщ", 10), "борщ");
        assert_eq!(truncate("борщ со сметаной", 4), "борщ...");
    }

    #[test]
    fn test_openai_base_url() {
        assert_eq!(openai_base_url("https://api.example.com/"), "https://api.example.com/v1");
        assert_eq!(openai_base_url("https://api.example.com/v1"), "https://api.example.com/v1");
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
