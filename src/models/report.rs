use serde::Serialize;

/// One summary row per user with at least one visit in the window.
#[derive(Debug, Clone, Serialize)]
pub struct UserActivity {
    pub user_id: i64,
    pub display_name: Option<String>, // NULL when the users row is gone
    pub login: Option<String>,
    pub visits: i64,     // COUNT(*)
    pub sessions: i64,   // COUNT(DISTINCT session_id)
    pub last_visit: String, // MAX(visited_at), UTC stored form
}

/// One row per user past the inactivity threshold, or never seen at all.
#[derive(Debug, Clone, Serialize)]
pub struct InactiveUser {
    pub user_id: i64,
    pub login: String,
    pub display_name: String,
    pub email: String,
    pub last_visit: Option<String>, // None = never visited
}
