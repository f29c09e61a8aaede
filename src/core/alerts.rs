//! Inactivity alert engine: settings management and the send loop.
//!
//! Scheduling stays outside: the host cron invokes `alerts --send`. One
//! failing recipient never aborts the run; failures are collected by name
//! and reported at the end.

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{log, queries, settings};
use crate::errors::{AppError, AppResult};
use crate::mail::{self, MailTransport};
use crate::ui::messages::{info, success, warning};
use crate::utils::time;

pub struct AlertLogic;

impl AlertLogic {
    pub fn show(pool: &mut DbPool) -> AppResult<()> {
        let st = settings::load_alert_settings(&pool.conn)?;

        println!("🔔 Inactivity alert settings:\n");
        println!("  enabled:        {}", if st.enabled { "yes" } else { "no" });
        println!(
            "  test mode:      {}",
            if st.test_mode {
                "on (administrators only)"
            } else {
                "off"
            }
        );
        println!("  days threshold: {}", st.days_threshold);

        Ok(())
    }

    pub fn set_enabled(pool: &mut DbPool, enabled: bool) -> AppResult<()> {
        settings::set_enabled(&pool.conn, enabled)?;
        let state = if enabled { "enabled" } else { "disabled" };
        let _ = log::ttlog(
            &pool.conn,
            "settings_changed",
            "alerts_enabled",
            &format!("Inactivity alerts {}", state),
        );
        success(format!("Inactivity alerts {}.", state));
        Ok(())
    }

    pub fn set_test_mode(pool: &mut DbPool, on: bool) -> AppResult<()> {
        settings::set_test_mode(&pool.conn, on)?;
        let state = if on { "on" } else { "off" };
        let _ = log::ttlog(
            &pool.conn,
            "settings_changed",
            "alerts_test_mode",
            &format!("Alert test mode {}", state),
        );
        success(format!("Alert test mode {}.", state));
        Ok(())
    }

    pub fn set_threshold(pool: &mut DbPool, days: u32) -> AppResult<()> {
        settings::set_days_threshold(&pool.conn, days)?;
        let _ = log::ttlog(
            &pool.conn,
            "settings_changed",
            "alerts_days_threshold",
            &format!("Alert threshold set to {} days", days),
        );
        success(format!("Alert threshold set to {} days.", days));
        Ok(())
    }

    /// Process inactivity alerts now.
    pub fn send(pool: &mut DbPool, cfg: &Config, transport: &dyn MailTransport) -> AppResult<()> {
        let st = settings::load_alert_settings(&pool.conn)?;

        if !st.enabled {
            return Err(AppError::AlertsDisabled);
        }

        let now = time::now_utc();
        let cutoff = time::window_start(now, st.days_threshold);

        // In test mode only administrators are candidates.
        let candidates = queries::inactive_users(&pool.conn, &cutoff, st.test_mode)?;

        if candidates.is_empty() {
            info("No inactive users found — nothing to send.");
            return Ok(());
        }

        let mut sent = 0usize;
        let mut failed: Vec<String> = Vec::new();

        for u in &candidates {
            let name = if u.display_name.trim().is_empty() {
                u.login.clone()
            } else {
                u.display_name.clone()
            };

            if u.email.trim().is_empty() {
                failed.push(name);
                continue;
            }

            let days_quiet = match &u.last_visit {
                Some(lv) => Some(time::days_since(lv, now)?),
                None => None,
            };

            let msg = mail::inactivity_mail(&u.email, &name, days_quiet, &cfg.portal_url);

            match transport.send(&cfg.mail_from, &msg) {
                Ok(()) => sent += 1,
                Err(e) => {
                    warning(format!("Could not deliver to {}: {}", u.email, e));
                    failed.push(name);
                }
            }
        }

        success(format!("Inactivity alerts sent: {}.", sent));
        if !failed.is_empty() {
            warning(format!("Failed recipients: {}.", failed.join(", ")));
        }
        if st.test_mode {
            info("Test mode is on: only administrators were considered.");
        }

        let _ = log::ttlog(
            &pool.conn,
            "alerts_sent",
            "",
            &format!(
                "Processed {} candidates: {} sent, {} failed",
                candidates.len(),
                sent,
                failed.len()
            ),
        );

        Ok(())
    }

    /// Send one templated test mail to `addr`.
    pub fn send_test(
        pool: &mut DbPool,
        cfg: &Config,
        transport: &dyn MailTransport,
        addr: &str,
    ) -> AppResult<()> {
        if !mail::is_valid_address(addr) {
            return Err(AppError::InvalidEmail(addr.to_string()));
        }

        let msg = mail::test_mail(addr);
        transport.send(&cfg.mail_from, &msg)?;

        let _ = log::ttlog(
            &pool.conn,
            "alerts_sent",
            addr,
            "Test alert delivered",
        );
        success(format!("Test alert delivered to {}.", addr));
        Ok(())
    }
}
