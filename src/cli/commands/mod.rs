pub mod alerts;
pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod record;
pub mod report;
pub mod user;
