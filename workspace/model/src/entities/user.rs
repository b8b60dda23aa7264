use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The role a user holds within the gym.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "trainer")]
    Trainer,
    #[sea_orm(string_value = "athlete")]
    Athlete,
}

impl UserRole {
    /// Stable wire representation, matching the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Trainer => "trainer",
            UserRole::Athlete => "athlete",
        }
    }
}

/// Represents a user of the system: an administrator, a trainer who
/// owns training sessions, or an athlete who registers for them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Opaque hash produced by the authentication layer; never exposed
    /// over the API.
    pub password_hash: String,
    pub role: UserRole,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Sessions this user owns as trainer.
    #[sea_orm(has_many = "super::training_session::Entity")]
    TrainingSession,
    /// Attendance records this user participates in.
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecord,
}

impl Related<super::training_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrainingSession.def()
    }
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_trainer(&self) -> bool {
        self.role == UserRole::Trainer
    }

    pub fn is_athlete(&self) -> bool {
        self.role == UserRole::Athlete
    }
}
