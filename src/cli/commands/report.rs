use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::{DEFAULT_WINDOW_DAYS, ReportLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        days,
        user,
        detail,
        inactive,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if *inactive {
            // Default window is the configured alert threshold here.
            return ReportLogic::inactive(&mut pool, cfg, *days);
        }

        let window = days.unwrap_or(DEFAULT_WINDOW_DAYS);

        // clap guarantees --detail comes with --user
        if *detail {
            if let Some(login) = user {
                ReportLogic::detail(&mut pool, cfg, login, window)?;
            }
        } else {
            ReportLogic::summary(&mut pool, cfg, window, user.as_deref())?;
        }
    }

    Ok(())
}
