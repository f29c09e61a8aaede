pub mod colors;
pub mod formatting;
pub mod path;
pub mod table;
pub mod time;
pub mod token;

pub use formatting::describe_activity;
pub use formatting::since_readable;
