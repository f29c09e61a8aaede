use crate::cli::parser::{Commands, Toggle};
use crate::config::Config;
use crate::core::alerts::AlertLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::mail::FileOutbox;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Alerts {
        show,
        enable,
        disable,
        test_mode,
        threshold,
        send,
        test_email,
        outbox,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if *enable {
            AlertLogic::set_enabled(&mut pool, true)?;
        }
        if *disable {
            AlertLogic::set_enabled(&mut pool, false)?;
        }
        if let Some(t) = test_mode {
            AlertLogic::set_test_mode(&mut pool, matches!(t, Toggle::On))?;
        }
        if let Some(days) = threshold {
            AlertLogic::set_threshold(&mut pool, *days)?;
        }

        if *show {
            AlertLogic::show(&mut pool)?;
        }

        // Delivery actions come after the setting changes, so
        // `alerts --enable --send` works in one invocation.
        let transport =
            FileOutbox::new(outbox.clone().unwrap_or_else(|| cfg.outbox.clone()));

        if let Some(addr) = test_email {
            AlertLogic::send_test(&mut pool, cfg, &transport, addr)?;
        }

        if *send {
            AlertLogic::send(&mut pool, cfg, &transport)?;
        }
    }

    Ok(())
}
