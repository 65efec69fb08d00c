pub mod config;
pub mod current_user;
pub mod notifier;
mod responses;
mod telemetry;
pub mod utils;

pub use self::config::AppConfig;
pub use current_user::CurrentUser;
pub use notifier::Notifier;
pub use responses::*;
pub use telemetry::*;
pub use utils::*;
