pub mod analytics;
pub mod attendance;
pub mod categories;
pub mod health;
pub mod sessions;
pub mod users;
