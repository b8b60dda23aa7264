use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

/// A category a training session may be filed under, e.g. "Precision
/// Training". Purely descriptive; deleting one nulls the reference on
/// its sessions instead of cascading.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "training_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    /// Hex color tag for the calendar UI.
    pub color: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::training_session::Entity")]
    TrainingSession,
}

impl Related<super::training_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrainingSession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// All sessions filed under this category.
    pub async fn sessions<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<super::training_session::Model>, DbErr> {
        super::training_session::Entity::find()
            .filter(super::training_session::Column::CategoryId.eq(self.id))
            .all(db)
            .await
    }
}
