use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Attendance state of one user on one session. Deliberately an
/// unconstrained flag rather than a workflow: trainers must be able to
/// correct a mistaken mark after the fact, so any value may move to any
/// other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// Initial state, set automatically when a user joins a session.
    #[sea_orm(string_value = "registered")]
    Registered,
    #[sea_orm(string_value = "present")]
    Present,
    #[sea_orm(string_value = "absent")]
    Absent,
    #[sea_orm(string_value = "late")]
    Late,
}

impl AttendanceStatus {
    /// Stable wire representation, matching the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Registered => "registered",
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }
}

/// One user's membership on one session's roster. The pair
/// (training_session_id, user_id) is unique; the schema enforces it
/// with a composite index so concurrent registrations cannot create
/// duplicates.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub training_session_id: i32,
    pub user_id: i32,
    pub status: AttendanceStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::training_session::Entity",
        from = "Column::TrainingSessionId",
        to = "super::training_session::Column::Id"
    )]
    TrainingSession,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::training_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrainingSession.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
