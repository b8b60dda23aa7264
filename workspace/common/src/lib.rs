//! Common transport-layer types shared between the domain crate and the
//! API layer. These structs mirror what the HTTP handlers serialize so
//! neither side duplicates shapes.

mod analytics;
mod views;

pub use analytics::TrainingAnalyticsSummary;
pub use views::{AttendanceDto, AttendanceWithUser, SessionWithRoster, UserDto};
