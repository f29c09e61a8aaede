// src/export/logic.rs

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{log, queries};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{ActivityExport, VisitExport};
use crate::export::range::parse_range;
use crate::export::txt::{export_activity_txt, export_visits_txt};
use crate::models::user::label_for;
use crate::ui::messages::warning;
use crate::utils::path::{ensure_parent_dir, expand_tilde};
use crate::utils::time;
use std::collections::HashMap;

/// Which dataset goes into the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportSelection {
    /// Raw visit rows, oldest first.
    Visits,
    /// The per-user summary the `report` command shows.
    Activity,
}

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export visits or per-user activity.
    ///
    /// - `file`: absolute path of the output file
    /// - `days`: rolling window ending now
    /// - `range`: calendar expressions: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
    ///   and `start:end` intervals thereof
    ///
    /// `days` and `range` are mutually exclusive; neither exports everything.
    #[allow(clippy::too_many_arguments)]
    pub fn export(
        pool: &mut DbPool,
        cfg: &Config,
        format: ExportFormat,
        file: &str,
        days: Option<u32>,
        range: &Option<String>,
        selection: ExportSelection,
        force: bool,
    ) -> AppResult<()> {
        let expanded = expand_tilde(file);
        let path = expanded.as_path();

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_parent_dir(path)?;
        ensure_writable(path, force)?;

        let (since, until): (Option<String>, Option<String>) = match (days, range) {
            (Some(_), Some(_)) => {
                return Err(AppError::InvalidWindow(
                    "--days and --range are mutually exclusive".into(),
                ));
            }
            (Some(d), None) => {
                if d == 0 {
                    return Err(AppError::InvalidWindow("day window must be at least 1".into()));
                }
                (Some(time::window_start(time::now_utc(), d)), None)
            }
            (None, Some(r)) => {
                let (first, last) = parse_range(r)?;
                let (start, end) = time::local_day_bounds(first, last)?;
                (Some(start), Some(end))
            }
            (None, None) => (None, None),
        };

        let written = match selection {
            ExportSelection::Visits => {
                let rows = load_visits(pool, cfg, since.as_deref(), until.as_deref())?;
                if rows.is_empty() {
                    warning("No visits found for the selected window.");
                    return Ok(());
                }
                let n = rows.len();
                match format {
                    ExportFormat::Txt => export_visits_txt(&rows, path)?,
                    ExportFormat::Csv => export_csv(&rows, path)?,
                    ExportFormat::Json => export_json(&rows, path)?,
                }
                n
            }
            ExportSelection::Activity => {
                let rows = load_activity(pool, cfg, since.as_deref(), until.as_deref())?;
                if rows.is_empty() {
                    warning("No visits found for the selected window.");
                    return Ok(());
                }
                let n = rows.len();
                match format {
                    ExportFormat::Txt => export_activity_txt(&rows, path)?,
                    ExportFormat::Csv => export_csv(&rows, path)?,
                    ExportFormat::Json => export_json(&rows, path)?,
                }
                n
            }
        };

        let _ = log::ttlog(
            &pool.conn,
            "export_written",
            &path.to_string_lossy(),
            &format!(
                "Exported {} {} row(s) as {}",
                written,
                match selection {
                    ExportSelection::Visits => "visit",
                    ExportSelection::Activity => "activity",
                },
                format.as_str()
            ),
        );

        Ok(())
    }
}

fn load_visits(
    pool: &mut DbPool,
    cfg: &Config,
    since: Option<&str>,
    until: Option<&str>,
) -> AppResult<Vec<VisitExport>> {
    let visits = queries::visits_window(&pool.conn, since, until)?;

    // Resolve logins once; visits of deleted users keep a placeholder.
    let logins: HashMap<i64, String> = queries::list_users(&pool.conn)?
        .into_iter()
        .map(|u| (u.id, u.login))
        .collect();

    let mut out = Vec::with_capacity(visits.len());
    for v in visits {
        out.push(VisitExport {
            id: v.id,
            user: label_for(v.user_id, logins.get(&v.user_id).map(String::as_str)),
            visited_at: v.visited_at_local(&cfg.date_format)?,
            page_url: v.page_url,
            page_title: v.page_title,
            session: v.session_id,
        });
    }
    Ok(out)
}

fn load_activity(
    pool: &mut DbPool,
    cfg: &Config,
    since: Option<&str>,
    until: Option<&str>,
) -> AppResult<Vec<ActivityExport>> {
    let rows = queries::activity_summary(&pool.conn, since, until)?;

    let mut out = Vec::with_capacity(rows.len());
    for r in rows {
        out.push(ActivityExport {
            user: label_for(
                r.user_id,
                r.display_name
                    .as_deref()
                    .filter(|n| !n.trim().is_empty())
                    .or(r.login.as_deref()),
            ),
            last_visit: time::to_local_display(&r.last_visit, &cfg.date_format)?,
            sessions: r.sessions,
            visits: r.visits,
        });
    }
    Ok(out)
}
