//! Report rendering: activity summary, per-user detail, inactivity listing.
//!
//! Windows are computed in UTC and rendered in local time, so a visit at
//! 23:30 local lands in the right day regardless of the server timezone.

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{queries, settings};
use crate::errors::{AppError, AppResult};
use crate::models::user::label_for;
use crate::ui::messages::{header, info, success};
use crate::utils::table::{Column, Table};
use crate::utils::{describe_activity, since_readable, time};

pub const DEFAULT_WINDOW_DAYS: u32 = 30;

pub struct ReportLogic;

impl ReportLogic {
    /// Per-user engagement summary over a rolling window ending now.
    pub fn summary(
        pool: &mut DbPool,
        cfg: &Config,
        days: u32,
        user_filter: Option<&str>,
    ) -> AppResult<()> {
        check_window(days)?;

        let now = time::now_utc();
        let since = time::window_start(now, days);

        let mut rows = queries::activity_summary(&pool.conn, Some(&since), None)?;

        if let Some(login) = user_filter {
            let user = queries::user_by_login(&pool.conn, login)?
                .ok_or_else(|| AppError::UnknownUser(login.to_string()))?;
            rows.retain(|r| r.user_id == user.id);
        }

        header(format!("📊 Portal activity — last {} days", days));
        println!();

        if rows.is_empty() {
            info("No visits recorded in this window.");
            return Ok(());
        }

        let threshold = i64::from(settings::load_alert_settings(&pool.conn)?.days_threshold);

        let mut table = Table::new(vec![
            Column::new("User", 22),
            Column::new("Last visit", 17),
            Column::new("Sessions", 8),
            Column::new("Pageviews", 9),
            Column::new("Status", 13),
        ]);

        for r in &rows {
            // Display name, else login, else the deleted-user placeholder.
            let name = label_for(
                r.user_id,
                r.display_name
                    .as_deref()
                    .filter(|n| !n.trim().is_empty())
                    .or(r.login.as_deref()),
            );
            let last_local = time::to_local_display(&r.last_visit, &cfg.date_format)?;
            let quiet_days = time::days_since(&r.last_visit, now)?;
            let status = describe_activity(Some(quiet_days), threshold);

            table.add_row(vec![
                name,
                last_local,
                r.sessions.to_string(),
                r.visits.to_string(),
                status,
            ]);
        }

        print!("{}", table.render());
        Ok(())
    }

    /// Per-visit history for one user, newest first.
    pub fn detail(pool: &mut DbPool, cfg: &Config, login: &str, days: u32) -> AppResult<()> {
        check_window(days)?;

        let user = queries::user_by_login(&pool.conn, login)?
            .ok_or_else(|| AppError::UnknownUser(login.to_string()))?;

        let now = time::now_utc();
        let since = time::window_start(now, days);
        let visits = queries::visits_for_user(&pool.conn, user.id, &since)?;

        if visits.is_empty() {
            return Err(AppError::NoVisitsForUser(login.to_string()));
        }

        header(format!(
            "📋 Visits by {} — last {} days ({} pageviews)",
            user.label(),
            days,
            visits.len()
        ));
        println!();

        let mut table = Table::new(vec![
            Column::new("Visited at", 17),
            Column::wrapped("Page URL", 38),
            Column::wrapped("Title", 24),
            Column::new("Session", 32),
        ]);

        for v in &visits {
            table.add_row(vec![
                v.visited_at_local(&cfg.date_format)?,
                v.page_url.clone(),
                v.page_title.clone(),
                v.session_id.clone(),
            ]);
        }

        print!("{}", table.render());
        Ok(())
    }

    /// Users whose last visit predates the threshold, plus the ones who
    /// never visited at all. Most-inactive first, never-visited on top.
    pub fn inactive(pool: &mut DbPool, cfg: &Config, days: Option<u32>) -> AppResult<()> {
        let threshold = match days {
            Some(d) => d,
            None => settings::load_alert_settings(&pool.conn)?.days_threshold,
        };
        check_window(threshold)?;

        let now = time::now_utc();
        let cutoff = time::window_start(now, threshold);
        let rows = queries::inactive_users(&pool.conn, &cutoff, false)?;

        header(format!("😴 Users inactive for {} days or more", threshold));
        println!();

        if rows.is_empty() {
            success("Everyone has visited recently — nobody is past the threshold.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("User", 22),
            Column::new("Email", 28),
            Column::new("Last visit", 17),
            Column::new("Inactive for", 12),
        ]);

        for u in &rows {
            let name = if u.display_name.trim().is_empty() {
                u.login.clone()
            } else {
                u.display_name.clone()
            };

            let (last_shown, inactive_for) = match &u.last_visit {
                Some(lv) => (
                    time::to_local_display(lv, &cfg.date_format)?,
                    since_readable(time::minutes_since(lv, now)?),
                ),
                None => ("never".to_string(), "-".to_string()),
            };

            table.add_row(vec![name, u.email.clone(), last_shown, inactive_for]);
        }

        print!("{}", table.render());
        Ok(())
    }
}

fn check_window(days: u32) -> AppResult<()> {
    if days == 0 {
        return Err(AppError::InvalidWindow(
            "day window must be at least 1".into(),
        ));
    }
    Ok(())
}
