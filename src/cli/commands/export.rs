use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportSelection};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        days,
        range,
        visits: _,
        activity,
        force,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        // --visits is the default; --activity flips the dataset.
        let selection = if *activity {
            ExportSelection::Activity
        } else {
            ExportSelection::Visits
        };

        ExportLogic::export(
            &mut pool,
            cfg,
            format.clone(),
            file,
            *days,
            range,
            selection,
            *force,
        )?;
    }

    Ok(())
}
