//! Mail templates and the transport seam.
//!
//! Delivery mechanics live behind `MailTransport`; the shipped
//! implementation is a filesystem outbox (one text file per message) so the
//! host can hand the files to whatever relay it runs. SMTP is deliberately
//! not wired here.

use crate::errors::{AppError, AppResult};
use chrono::Local;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

pub trait MailTransport {
    fn send(&self, from: &str, msg: &MailMessage) -> AppResult<()>;
}

/// Loose shape check, not RFC validation: something@something.tld.
pub fn is_valid_address(addr: &str) -> bool {
    let re = regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    re.is_match(addr)
}

// ---------------------------
// Templates
// ---------------------------

/// The nudge mail sent to a user past the inactivity threshold.
/// `days_quiet` is None for users who never visited at all.
pub fn inactivity_mail(
    to: &str,
    display_name: &str,
    days_quiet: Option<i64>,
    portal_url: &str,
) -> MailMessage {
    let absence = match days_quiet {
        Some(d) if d == 1 => "for a day".to_string(),
        Some(d) => format!("for {} days", d),
        None => "in a while".to_string(),
    };

    MailMessage {
        to: to.to_string(),
        subject: "We miss you on the portal".to_string(),
        body: format!(
            "Hi {display_name},\n\n\
             We noticed you have not visited the portal {absence}.\n\
             Come back and see what's new:\n\n\
             {portal_url}\n\n\
             See you soon!"
        ),
    }
}

/// One-off message confirming the alert pipeline can deliver.
pub fn test_mail(to: &str) -> MailMessage {
    MailMessage {
        to: to.to_string(),
        subject: "Inactivity alerts test".to_string(),
        body: "This is a test message for the inactivity alert pipeline.\n\
               If you are reading it, alert delivery works."
            .to_string(),
    }
}

// ---------------------------
// File outbox
// ---------------------------

pub struct FileOutbox {
    dir: PathBuf,
}

impl FileOutbox {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Recipients become part of the file name; keep it shell-safe.
    fn sanitize(addr: &str) -> String {
        addr.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl MailTransport for FileOutbox {
    fn send(&self, from: &str, msg: &MailMessage) -> AppResult<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| AppError::Mail(format!("cannot create outbox {:?}: {}", self.dir, e)))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S%.3f");
        let base = format!("{}_{}", stamp, Self::sanitize(&msg.to));

        // Two mails to the same address in the same millisecond still get
        // distinct files.
        let mut path = self.dir.join(format!("{base}.eml"));
        let mut n = 1;
        while path.exists() {
            path = self.dir.join(format!("{base}_{n}.eml"));
            n += 1;
        }

        let content = format!(
            "From: {}\nTo: {}\nSubject: {}\nDate: {}\n\n{}\n",
            from,
            msg.to,
            msg.subject,
            Local::now().to_rfc2822(),
            msg.body
        );

        fs::write(&path, content)
            .map_err(|e| AppError::Mail(format!("cannot write {:?}: {}", path, e)))?;

        Ok(())
    }
}
