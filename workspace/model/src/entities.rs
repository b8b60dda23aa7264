//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the training-session scheduling
//! application here: users, training sessions, attendance records and
//! training categories.

pub mod attendance_record;
pub mod training_category;
pub mod training_session;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::attendance_record::Entity as AttendanceRecord;
    pub use super::training_category::Entity as TrainingCategory;
    pub use super::training_session::Entity as TrainingSession;
    pub use super::user::Entity as User;
}
