//! Local user directory maintenance.
//!
//! In the hosted deployment the directory belongs to the web framework;
//! the CLI keeps its own table so the recorder has something to resolve
//! logins against.

use crate::db::pool::DbPool;
use crate::db::{log, queries};
use crate::errors::{AppError, AppResult};
use crate::mail;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub struct UserLogic;

impl UserLogic {
    pub fn add(
        pool: &mut DbPool,
        login: &str,
        display_name: &str,
        email: &str,
        is_admin: bool,
    ) -> AppResult<()> {
        if login.trim().is_empty() {
            return Err(AppError::Other("login must not be empty".into()));
        }
        // Empty email is allowed (the alert loop counts it as a failure).
        if !email.trim().is_empty() && !mail::is_valid_address(email) {
            return Err(AppError::InvalidEmail(email.to_string()));
        }

        let id = queries::insert_user(&pool.conn, login, display_name, email, is_admin)?;

        let _ = log::ttlog(
            &pool.conn,
            "user_added",
            login,
            &format!(
                "User #{} added{}",
                id,
                if is_admin { " (administrator)" } else { "" }
            ),
        );

        success(format!("User '{}' added (#{}).", login, id));
        Ok(())
    }

    pub fn list(pool: &mut DbPool) -> AppResult<()> {
        let users = queries::list_users(&pool.conn)?;

        if users.is_empty() {
            info("No users in the directory yet.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("Login", 16),
            Column::new("Name", 22),
            Column::new("Email", 28),
            Column::new("Admin", 5),
        ]);

        for u in &users {
            table.add_row(vec![
                u.login.clone(),
                u.display_name.clone(),
                u.email.clone(),
                if u.is_admin { "yes".to_string() } else { String::new() },
            ]);
        }

        print!("{}", table.render());
        println!("\n{} user(s).", users.len());
        Ok(())
    }
}
