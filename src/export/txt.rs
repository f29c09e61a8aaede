// src/export/txt.rs

use crate::errors::AppResult;
use crate::export::model::{ActivityExport, VisitExport};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};
use std::fs;
use std::path::Path;

/// Plain-text download: the same aligned table the terminal shows.
pub(crate) fn export_visits_txt(rows: &[VisitExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to TXT: {}", path.display()));

    let mut table = Table::new(vec![
        Column::new("Id", 6),
        Column::new("User", 16),
        Column::new("Visited at", 17),
        Column::wrapped("Page URL", 40),
        Column::wrapped("Title", 24),
        Column::new("Session", 32),
    ]);

    for v in rows {
        table.add_row(vec![
            v.id.to_string(),
            v.user.clone(),
            v.visited_at.clone(),
            v.page_url.clone(),
            v.page_title.clone(),
            v.session.clone(),
        ]);
    }

    fs::write(path, table.render())?;

    notify_export_success("TXT", path);
    Ok(())
}

pub(crate) fn export_activity_txt(rows: &[ActivityExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to TXT: {}", path.display()));

    let mut table = Table::new(vec![
        Column::new("User", 22),
        Column::new("Last visit", 17),
        Column::new("Sessions", 8),
        Column::new("Pageviews", 9),
    ]);

    for r in rows {
        table.add_row(vec![
            r.user.clone(),
            r.last_visit.clone(),
            r.sessions.to_string(),
            r.visits.to_string(),
        ]);
    }

    fs::write(path, table.render())?;

    notify_export_success("TXT", path);
    Ok(())
}
