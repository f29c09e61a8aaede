pub mod report;
pub mod user;
pub mod visit;

pub use report::{InactiveUser, UserActivity};
pub use user::User;
pub use visit::Visit;
