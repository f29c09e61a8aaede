use crate::export::ExportFormat;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for rVisitlog
/// CLI engine to log portal page visits and report on member activity
#[derive(Parser)]
#[command(
    name = "rvisitlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple visit logging CLI: record portal page visits, group them into sessions and report on member activity",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check, repair or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record one page visit for an authenticated member
    Record {
        /// Login of the visiting member (the caller asserts authentication)
        #[arg(long = "user", value_name = "LOGIN")]
        user: String,

        /// Visited page URL (path + query), stored verbatim
        #[arg(long = "url", value_name = "URL")]
        url: String,

        /// Page title; empty when the page has none
        #[arg(long = "title", value_name = "TITLE", default_value = "")]
        title: String,

        /// Session token presented by the browser cookie, if any.
        /// Expired, unknown or malformed tokens are silently rotated.
        #[arg(long = "session", value_name = "TOKEN")]
        session: Option<String>,
    },

    /// Manage the local user directory
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show activity reports over a rolling window
    Report {
        /// Rolling window in days (default 30; with --inactive the
        /// configured alert threshold)
        #[arg(long, value_name = "N")]
        days: Option<u32>,

        /// Restrict the summary to one member
        #[arg(long, value_name = "LOGIN")]
        user: Option<String>,

        /// Show the per-visit history instead of the summary (needs --user)
        #[arg(long, requires = "user")]
        detail: bool,

        /// List users past the inactivity threshold (or who never visited)
        #[arg(long, conflicts_with_all = ["user", "detail"])]
        inactive: bool,
    },

    /// Manage and process inactivity alerts
    Alerts {
        #[arg(long, help = "Show the current alert settings")]
        show: bool,

        #[arg(long, conflicts_with = "disable", help = "Enable inactivity alerts")]
        enable: bool,

        #[arg(long, help = "Disable inactivity alerts")]
        disable: bool,

        #[arg(
            long = "test-mode",
            value_enum,
            value_name = "on|off",
            help = "Restrict alert candidates to administrators"
        )]
        test_mode: Option<Toggle>,

        #[arg(
            long,
            value_name = "DAYS",
            help = "Days of silence before a user counts as inactive (1-365)"
        )]
        threshold: Option<u32>,

        #[arg(long, help = "Process inactivity alerts now")]
        send: bool,

        #[arg(
            long = "test-email",
            value_name = "ADDR",
            help = "Send one templated test mail to ADDR"
        )]
        test_email: Option<String>,

        /// Drop alert mails into DIR instead of the configured outbox
        #[arg(long, value_name = "DIR", hide = true)]
        outbox: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export visit data for download
    Export {
        #[arg(long, value_enum, default_value = "txt")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_name = "N", help = "Rolling window in days ending now")]
        days: Option<u32>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, help = "Export raw visit rows (default)")]
        visits: bool,

        #[arg(
            long,
            conflicts_with = "visits",
            help = "Export the per-user activity summary instead"
        )]
        activity: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Add a member to the directory
    Add {
        login: String,

        #[arg(long, value_name = "NAME", help = "Display name shown in reports")]
        name: String,

        #[arg(long, value_name = "EMAIL", default_value = "")]
        email: String,

        #[arg(long, help = "Mark the member as an administrator")]
        admin: bool,
    },

    /// List the directory
    List,
}
