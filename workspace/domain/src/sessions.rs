//! Training-session lifecycle: validated creation, owner-gated update
//! and delete. Deleting a session takes its attendance records with it
//! via the cascade on the foreign key.

use common::SessionWithRoster;
use model::entities::{training_category, training_session, user};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, ModelTrait, Set};
use tracing::{debug, instrument, warn};

use crate::error::{DomainError, Result};
use crate::{authz, views};

/// Field set for creating or replacing a session. Mirrors the API
/// payload; the trainer/actor id travels separately.
#[derive(Debug, Clone)]
pub struct SessionInput {
    pub start_time: chrono::NaiveDateTime,
    pub end_time: chrono::NaiveDateTime,
    pub max_participants: i32,
    pub notes: Option<String>,
    pub category_id: Option<i32>,
}

fn validate(input: &SessionInput) -> Result<()> {
    if input.end_time <= input.start_time {
        return Err(DomainError::Validation(
            "end_time must be after start_time".to_string(),
        ));
    }
    if input.max_participants < 1 {
        return Err(DomainError::Validation(
            "max_participants must be at least 1".to_string(),
        ));
    }
    Ok(())
}

async fn ensure_category_exists<C: ConnectionTrait>(db: &C, input: &SessionInput) -> Result<()> {
    if let Some(category_id) = input.category_id {
        training_category::Entity::find_by_id(category_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                DomainError::Validation(format!("category {category_id} does not exist"))
            })?;
    }
    Ok(())
}

/// Create a session owned by `trainer_id`. Rejected inputs leave no
/// record behind.
#[instrument(skip(db, input))]
pub async fn create<C: ConnectionTrait>(
    db: &C,
    trainer_id: i32,
    input: SessionInput,
) -> Result<SessionWithRoster> {
    validate(&input)?;

    user::Entity::find_by_id(trainer_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("trainer"))?;
    ensure_category_exists(db, &input).await?;

    let session = training_session::ActiveModel {
        trainer_id: Set(trainer_id),
        start_time: Set(input.start_time),
        end_time: Set(input.end_time),
        max_participants: Set(input.max_participants),
        notes: Set(input.notes),
        category_id: Set(input.category_id),
        ..Default::default()
    }
    .insert(db)
    .await?;
    debug!(session_id = session.id, "training session created");

    views::session_with_roster(db, &session).await
}

/// Replace the mutable fields of a session. Only the owning trainer may
/// do this.
#[instrument(skip(db, input))]
pub async fn update<C: ConnectionTrait>(
    db: &C,
    session_id: i32,
    acting_user_id: i32,
    input: SessionInput,
) -> Result<SessionWithRoster> {
    let session = training_session::Entity::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("training session"))?;
    authz::ensure_session_owner(acting_user_id, &session)?;
    validate(&input)?;
    ensure_category_exists(db, &input).await?;

    let mut active: training_session::ActiveModel = session.into();
    active.start_time = Set(input.start_time);
    active.end_time = Set(input.end_time);
    active.max_participants = Set(input.max_participants);
    active.notes = Set(input.notes);
    active.category_id = Set(input.category_id);
    let updated = active.update(db).await?;
    debug!(session_id, "training session updated");

    views::session_with_roster(db, &updated).await
}

/// Delete a session and, through the schema cascade, its roster. Only
/// the owning trainer may do this.
#[instrument(skip(db))]
pub async fn delete<C: ConnectionTrait>(
    db: &C,
    session_id: i32,
    acting_user_id: i32,
) -> Result<()> {
    let session = training_session::Entity::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("training session"))?;
    if let Err(err) = authz::ensure_session_owner(acting_user_id, &session) {
        warn!(session_id, acting_user_id, "delete rejected by ownership gate");
        return Err(err);
    }

    session.delete(db).await?;
    debug!(session_id, "training session deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use migration::{Migrator, MigratorTrait};
    use model::entities::user::UserRole;
    use sea_orm::{Database, DatabaseConnection};

    fn input(hours: i64, max: i32) -> SessionInput {
        let start = NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        SessionInput {
            start_time: start,
            end_time: start + chrono::Duration::hours(hours),
            max_participants: max,
            notes: None,
            category_id: None,
        }
    }

    async fn setup() -> (DatabaseConnection, user::Model, user::Model) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let trainer = user::ActiveModel {
            name: Set("Coach".to_string()),
            email: Set("coach@example.com".to_string()),
            password_hash: Set("$argon2id$test".to_string()),
            role: Set(UserRole::Trainer),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let other = user::ActiveModel {
            name: Set("Other".to_string()),
            email: Set("other@example.com".to_string()),
            password_hash: Set("$argon2id$test".to_string()),
            role: Set(UserRole::Trainer),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        (db, trainer, other)
    }

    #[tokio::test]
    async fn create_validates_time_order_and_capacity() {
        let (db, trainer, _) = setup().await;

        let err = create(&db, trainer.id, input(0, 10)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = create(&db, trainer.id, input(-1, 10)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = create(&db, trainer.id, input(1, 0)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let created = create(&db, trainer.id, input(1, 1)).await.unwrap();
        assert_eq!(created.max_participants, 1);
        assert!(created.roster.is_empty());
    }

    #[tokio::test]
    async fn create_rejects_unknown_category() {
        let (db, trainer, _) = setup().await;
        let mut bad = input(1, 10);
        bad.category_id = Some(4242);
        let err = create(&db, trainer.id, bad).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn update_and_delete_are_owner_gated() {
        let (db, trainer, other) = setup().await;
        let session = create(&db, trainer.id, input(1, 10)).await.unwrap();

        let err = update(&db, session.id, other.id, input(2, 12))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden));

        let err = delete(&db, session.id, other.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden));

        let updated = update(&db, session.id, trainer.id, input(2, 12))
            .await
            .unwrap();
        assert_eq!(updated.max_participants, 12);

        delete(&db, session.id, trainer.id).await.unwrap();
        let err = delete(&db, session.id, trainer.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
