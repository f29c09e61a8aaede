pub mod alerts;
pub mod backup;
pub mod log;
pub mod record;
pub mod report;
pub mod users;
