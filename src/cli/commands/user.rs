use crate::cli::parser::{Commands, UserAction};
use crate::config::Config;
use crate::core::users::UserLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::User { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            UserAction::Add {
                login,
                name,
                email,
                admin,
            } => UserLogic::add(&mut pool, login, name, email, *admin)?,
            UserAction::List => UserLogic::list(&mut pool)?,
        }
    }

    Ok(())
}
