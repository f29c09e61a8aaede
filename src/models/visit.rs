use crate::errors::AppResult;
use crate::utils::time;
use serde::Serialize;

/// Hard cap on stored page URLs and titles.
pub const PAGE_FIELD_MAX: usize = 255;

#[derive(Debug, Clone, Serialize)]
pub struct Visit {
    pub id: i64,             // ⇔ visits.id (INTEGER PRIMARY KEY AUTOINCREMENT)
    pub user_id: i64,        // ⇔ visits.user_id (INT NOT NULL)
    pub visited_at: String,  // ⇔ visits.visited_at (TEXT, UTC "YYYY-MM-DD HH:MM:SS")
    pub page_url: String,    // ⇔ visits.page_url (TEXT NOT NULL, <= 255 chars)
    pub page_title: String,  // ⇔ visits.page_title (TEXT, default '')
    pub session_id: String,  // ⇔ visits.session_id (TEXT, 32-hex token)
}

impl Visit {
    /// Visit timestamp rendered in the local timezone with `fmt`.
    pub fn visited_at_local(&self, fmt: &str) -> AppResult<String> {
        time::to_local_display(&self.visited_at, fmt)
    }
}
