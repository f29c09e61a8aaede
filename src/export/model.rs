// src/export/model.rs

use serde::Serialize;

/// Flat visit row for export. Timestamps already rendered in local time.
#[derive(Serialize, Clone, Debug)]
pub struct VisitExport {
    pub id: i64,
    pub user: String,
    pub visited_at: String,
    pub page_url: String,
    pub page_title: String,
    pub session: String,
}

/// Flat per-user summary row for export.
#[derive(Serialize, Clone, Debug)]
pub struct ActivityExport {
    pub user: String,
    pub last_visit: String,
    pub sessions: i64,
    pub visits: i64,
}
