use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::record::RecordLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Record {
        user,
        url,
        title,
        session,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;
        RecordLogic::apply(&mut pool, cfg, user, url, title, session.as_deref())?;
    }

    Ok(())
}
