use crate::errors::{AppError, AppResult};
use crate::models::report::{InactiveUser, UserActivity};
use crate::models::user::User;
use crate::models::visit::Visit;
use rusqlite::{Connection, Result, Row, params, params_from_iter};

pub fn map_visit_row(row: &Row) -> Result<Visit> {
    Ok(Visit {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        visited_at: row.get("visited_at")?,
        page_url: row.get("page_url")?,
        page_title: row.get("page_title")?,
        session_id: row.get("session_id")?,
    })
}

pub fn map_user_row(row: &Row) -> Result<User> {
    Ok(User {
        id: row.get("id")?,
        login: row.get("login")?,
        display_name: row.get("display_name")?,
        email: row.get("email")?,
        is_admin: row.get::<_, i64>("is_admin")? == 1,
    })
}

// ---------------------------
// Users
// ---------------------------

pub fn user_by_login(conn: &Connection, login: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, login, display_name, email, is_admin
         FROM users
         WHERE login = ?1",
    )?;

    let mut rows = stmt.query_map([login], map_user_row)?;
    match rows.next() {
        Some(u) => Ok(Some(u?)),
        None => Ok(None),
    }
}

pub fn insert_user(
    conn: &Connection,
    login: &str,
    display_name: &str,
    email: &str,
    is_admin: bool,
) -> AppResult<i64> {
    if user_by_login(conn, login)?.is_some() {
        return Err(AppError::DuplicateUser(login.to_string()));
    }

    conn.execute(
        "INSERT INTO users (login, display_name, email, is_admin)
         VALUES (?1, ?2, ?3, ?4)",
        params![login, display_name, email, if is_admin { 1 } else { 0 }],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn list_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, login, display_name, email, is_admin
         FROM users
         ORDER BY login ASC",
    )?;

    let rows = stmt.query_map([], map_user_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Visits
// ---------------------------

/// Append one visit row. The timestamp is assigned by the caller at insert
/// time; nothing in the tool updates or deletes visits afterwards.
pub fn insert_visit(
    conn: &Connection,
    user_id: i64,
    visited_at: &str,
    page_url: &str,
    page_title: &str,
    session_id: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO visits (user_id, visited_at, page_url, page_title, session_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, visited_at, page_url, page_title, session_id],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Timestamp of the newest visit carrying `session_id` for this user,
/// or None when the token never appears in the log.
pub fn session_last_seen(
    conn: &Connection,
    user_id: i64,
    session_id: &str,
) -> AppResult<Option<String>> {
    let last: Option<String> = conn.query_row(
        "SELECT MAX(visited_at) FROM visits
         WHERE user_id = ?1 AND session_id = ?2",
        params![user_id, session_id],
        |row| row.get(0),
    )?;
    Ok(last)
}

/// Visits of one user inside the window, newest first.
pub fn visits_for_user(conn: &Connection, user_id: i64, since: &str) -> AppResult<Vec<Visit>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, visited_at, page_url, page_title, session_id
         FROM visits
         WHERE user_id = ?1 AND visited_at >= ?2
         ORDER BY visited_at DESC, id DESC",
    )?;

    let rows = stmt.query_map(params![user_id, since], map_visit_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// All visits inside optional stored-format bounds `[since, until)`,
/// oldest first (export order). No bounds means everything.
pub fn visits_window(
    conn: &Connection,
    since: Option<&str>,
    until: Option<&str>,
) -> AppResult<Vec<Visit>> {
    let mut sql = String::from(
        "SELECT id, user_id, visited_at, page_url, page_title, session_id
         FROM visits",
    );
    let mut clauses: Vec<&str> = Vec::new();
    let mut binds: Vec<String> = Vec::new();

    if let Some(s) = since {
        clauses.push("visited_at >= ?");
        binds.push(s.to_string());
    }
    if let Some(u) = until {
        clauses.push("visited_at < ?");
        binds.push(u.to_string());
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY visited_at ASC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(binds.iter()), map_visit_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Aggregates
// ---------------------------

/// Per-user visit counts, session counts and last visit inside the optional
/// bounds `[since, until)`, most recently seen first. LEFT JOIN keeps rows
/// whose users entry is gone.
pub fn activity_summary(
    conn: &Connection,
    since: Option<&str>,
    until: Option<&str>,
) -> AppResult<Vec<UserActivity>> {
    let mut sql = String::from(
        "SELECT v.user_id,
                u.display_name AS display_name,
                u.login AS login,
                COUNT(*) AS visits,
                COUNT(DISTINCT v.session_id) AS sessions,
                MAX(v.visited_at) AS last_visit
         FROM visits v
         LEFT JOIN users u ON u.id = v.user_id",
    );
    let mut clauses: Vec<&str> = Vec::new();
    let mut binds: Vec<String> = Vec::new();

    if let Some(s) = since {
        clauses.push("v.visited_at >= ?");
        binds.push(s.to_string());
    }
    if let Some(u) = until {
        clauses.push("v.visited_at < ?");
        binds.push(u.to_string());
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" GROUP BY v.user_id ORDER BY last_visit DESC");

    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt.query_map(params_from_iter(binds.iter()), |row| {
        Ok(UserActivity {
            user_id: row.get("user_id")?,
            display_name: row.get("display_name")?,
            login: row.get("login")?,
            visits: row.get("visits")?,
            sessions: row.get("sessions")?,
            last_visit: row.get("last_visit")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Users whose newest visit predates `cutoff`, plus users with no visits
/// at all. Never-visited rows sort first, then oldest activity.
pub fn inactive_users(
    conn: &Connection,
    cutoff: &str,
    admins_only: bool,
) -> AppResult<Vec<InactiveUser>> {
    let mut sql = String::from(
        "SELECT u.id, u.login, u.display_name, u.email, lv.last_visit AS last_visit
         FROM users u
         LEFT JOIN (
             SELECT user_id, MAX(visited_at) AS last_visit
             FROM visits
             GROUP BY user_id
         ) lv ON lv.user_id = u.id
         WHERE (lv.last_visit IS NULL OR lv.last_visit < ?1)",
    );
    if admins_only {
        sql.push_str(" AND u.is_admin = 1");
    }
    sql.push_str(" ORDER BY lv.last_visit IS NOT NULL, lv.last_visit ASC, u.login ASC");

    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt.query_map([cutoff], |row| {
        Ok(InactiveUser {
            user_id: row.get("id")?,
            login: row.get("login")?,
            display_name: row.get("display_name")?,
            email: row.get("email")?,
            last_visit: row.get("last_visit")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
