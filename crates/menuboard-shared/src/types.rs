//! Common types

use chrono::Utc;
use uuid::Uuid;

/// Epoch milliseconds
pub type Millis = i64;

pub fn now_millis() -> Millis {
    Utc::now().timestamp_millis()
}

/// Short entity id for categories, dishes and promotions.
pub fn new_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(9);
    id
}

/// Version stamp for a newly published document.
///
/// Never goes backwards or repeats, even when the wall clock does.
pub fn next_stamp(previous: Option<Millis>, now: Millis) -> Millis {
    match previous {
        Some(prev) if now <= prev => prev.saturating_add(1),
        _ => now,
    }
}
