use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

/// A scheduled training session, owned by its trainer. The roster of
/// participants lives in `attendance_record`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "training_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The trainer who owns this session; the only user allowed to
    /// mutate it or its attendance records.
    pub trainer_id: i32,
    pub start_time: DateTime,
    pub end_time: DateTime,
    /// Capacity of the roster; always >= 1.
    pub max_participants: i32,
    pub notes: Option<String>,
    pub category_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A session belongs to the trainer who created it.
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TrainerId",
        to = "super::user::Column::Id"
    )]
    Trainer,
    /// A session optionally belongs to a category.
    #[sea_orm(
        belongs_to = "super::training_category::Entity",
        from = "Column::CategoryId",
        to = "super::training_category::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecord,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trainer.def()
    }
}

impl Related<super::training_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// All attendance records currently on this session's roster.
    pub async fn roster<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<super::attendance_record::Model>, DbErr> {
        super::attendance_record::Entity::find()
            .filter(super::attendance_record::Column::TrainingSessionId.eq(self.id))
            .all(db)
            .await
    }

    /// True when the acting user is the owning trainer of this session.
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.trainer_id == user_id
    }
}
