//! Visit recording: the one write path of the whole tool.
//!
//! The caller (the web layer) asserts the visitor is authenticated and
//! passes the login; unknown logins are an error, not a silent skip. The
//! timestamp is assigned here at insert time, never by the caller.

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{log, queries};
use crate::errors::{AppError, AppResult};
use crate::models::visit::PAGE_FIELD_MAX;
use crate::ui::messages::success;
use crate::utils::{time, token};

pub struct RecordLogic;

pub struct RecordOutcome {
    pub visit_id: i64,
    pub token: String,
    /// True when the presented token was still inside the idle window.
    pub resumed: bool,
}

impl RecordLogic {
    pub fn apply(
        pool: &mut DbPool,
        cfg: &Config,
        login: &str,
        url: &str,
        title: &str,
        presented: Option<&str>,
    ) -> AppResult<RecordOutcome> {
        if url.trim().is_empty() {
            return Err(AppError::InvalidUrl("page URL must not be empty".into()));
        }
        if url.chars().count() > PAGE_FIELD_MAX {
            return Err(AppError::InvalidUrl(format!(
                "page URL exceeds {} characters",
                PAGE_FIELD_MAX
            )));
        }
        if title.chars().count() > PAGE_FIELD_MAX {
            return Err(AppError::InvalidTitle(format!(
                "page title exceeds {} characters",
                PAGE_FIELD_MAX
            )));
        }

        let user = queries::user_by_login(&pool.conn, login)?
            .ok_or_else(|| AppError::UnknownUser(login.to_string()))?;

        let now = time::now_utc();

        // Session continuity is derived from the visit log itself: a token
        // is honored only if we minted it and its newest visit is inside
        // the idle window. Malformed, unknown and expired tokens all rotate.
        let (session, resumed) = match presented {
            Some(t) if token::is_well_formed(t) => {
                match queries::session_last_seen(&pool.conn, user.id, t)? {
                    Some(last)
                        if time::minutes_since(&last, now)? <= cfg.session_idle_minutes =>
                    {
                        (t.to_string(), true)
                    }
                    _ => (token::mint(), false),
                }
            }
            _ => (token::mint(), false),
        };

        let visit_id = queries::insert_visit(
            &pool.conn,
            user.id,
            &time::format_store(now),
            url,
            title,
            &session,
        )?;

        // Audit trail is best-effort; the visit row is already in.
        let _ = log::ttlog(
            &pool.conn,
            "visit_recorded",
            login,
            &format!(
                "{} ({})",
                url,
                if resumed { "session resumed" } else { "new session" }
            ),
        );

        success(format!(
            "Visit #{} recorded for '{}' ({}).",
            visit_id,
            login,
            if resumed { "session resumed" } else { "new session" }
        ));
        println!("🔑 Session token: {}", session);

        Ok(RecordOutcome {
            visit_id,
            token: session,
            resumed,
        })
    }
}
