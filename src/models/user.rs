use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,            // ⇔ users.id (INTEGER PRIMARY KEY)
    pub login: String,      // ⇔ users.login (TEXT UNIQUE NOT NULL)
    pub display_name: String, // ⇔ users.display_name (TEXT NOT NULL)
    pub email: String,      // ⇔ users.email (TEXT, default '')
    pub is_admin: bool,     // ⇔ users.is_admin (INT 0/1)
}

impl User {
    /// Name shown in reports: display name, falling back to the login.
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.login
        } else {
            &self.display_name
        }
    }
}

/// Report label for a user id whose users row may be gone.
/// Visits outlive their user, so reports must render something.
pub fn label_for(user_id: i64, display_name: Option<&str>) -> String {
    match display_name {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => format!("(user #{})", user_id),
    }
}
