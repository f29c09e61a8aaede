use crate::ui::messages::warning;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Idle minutes after which a presented session token is rotated.
    #[serde(default = "default_idle_minutes")]
    pub session_idle_minutes: i64,
    #[serde(default = "default_portal_url")]
    pub portal_url: String,
    #[serde(default = "default_mail_from")]
    pub mail_from: String,
    /// Directory where the file outbox drops alert mails.
    #[serde(default = "default_outbox")]
    pub outbox: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_idle_minutes() -> i64 {
    60
}
fn default_portal_url() -> String {
    "https://portal.example.org".to_string()
}
fn default_mail_from() -> String {
    "alerts@portal.example.org".to_string()
}
fn default_outbox() -> String {
    Config::config_dir().join("outbox").to_string_lossy().to_string()
}
fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            session_idle_minutes: default_idle_minutes(),
            portal_url: default_portal_url(),
            mail_from: default_mail_from(),
            outbox: default_outbox(),
            date_format: default_date_format(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rvisitlog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rvisitlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rvisitlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rvisitlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// A corrupt file is reported and replaced by defaults for this run,
    /// never overwritten on disk.
    pub fn load() -> Self {
        let path = Self::config_file();

        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    warning(format!(
                        "Could not parse {} ({}); using defaults for this run.",
                        path.display(),
                        e
                    ));
                    Self::default()
                }
            },
            Err(e) => {
                warning(format!(
                    "Could not read {} ({}); using defaults for this run.",
                    path.display(),
                    e
                ));
                Self::default()
            }
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(format!("serialize config: {e}")))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }
}
