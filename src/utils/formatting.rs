//! Formatting utilities used for CLI and export outputs.

/// Renders an elapsed span as a compact human string.
///
/// es: "today", "1d ago", "12d 05h ago"
pub fn since_readable(minutes: i64) -> String {
    if minutes < 0 {
        return "today".to_string();
    }

    let days = minutes / (60 * 24);
    let hours = (minutes % (60 * 24)) / 60;

    if days == 0 && hours == 0 {
        "today".to_string()
    } else if days == 0 {
        format!("{:02}h ago", hours)
    } else {
        format!("{}d {:02}h ago", days, hours)
    }
}

/// Restituisce una descrizione testuale per lo stato di attività di un
/// utente. Usata nei report e negli output testuali.
pub fn describe_activity(days_inactive: Option<i64>, threshold: i64) -> String {
    match days_inactive {
        None => "Never visited".into(),
        Some(d) if d >= threshold => "Inactive".into(),
        Some(d) if d * 2 >= threshold => "Quiet".into(),
        Some(_) => "Active".into(),
    }
}
