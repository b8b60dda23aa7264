use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user as exposed over the API. The password hash never leaves the
/// persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// One of `admin`, `trainer`, `athlete`.
    pub role: String,
}

/// One attendance record on a session's roster, joined with the
/// participating user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AttendanceDto {
    pub id: i32,
    pub user: UserDto,
    /// One of `registered`, `present`, `absent`, `late`.
    pub status: String,
}

/// A training session together with its current roster. This is what
/// register/unregister and the session listing return.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SessionWithRoster {
    pub id: i32,
    pub trainer_id: i32,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub max_participants: i32,
    pub notes: Option<String>,
    pub category_id: Option<i32>,
    /// Attendance records for this session, each joined with its user.
    pub roster: Vec<AttendanceDto>,
}

impl SessionWithRoster {
    /// Number of spots still open on this session. Never negative,
    /// even when handed an oversubscribed roster.
    pub fn remaining_capacity(&self) -> i32 {
        (self.max_participants - self.roster.len() as i32).max(0)
    }
}

/// An attendance record joined with its user, returned by the
/// status-update endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AttendanceWithUser {
    pub id: i32,
    pub training_session_id: i32,
    pub status: String,
    pub user: UserDto,
}
