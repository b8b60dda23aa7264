//! The capacity and registration engine: join/leave operations on a
//! session's roster under a fixed capacity.
//!
//! `register` treats the capacity check and the insert as one atomic
//! step per session: both run inside a single database transaction that
//! takes an exclusive lock on the session row, so concurrent joins by
//! distinct users cannot jointly exceed `max_participants`, and the
//! composite unique index on (training_session_id, user_id) backs the
//! get-or-create so the same user can never hold two records.
//! Operations on different sessions are fully independent.

use common::SessionWithRoster;
use model::entities::{attendance_record, training_session, user};
use model::entities::attendance_record::AttendanceStatus;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, Set, SqlErr, TransactionTrait,
};
use tracing::{debug, instrument, warn};

use crate::error::{DomainError, Result};
use crate::views;

/// Register `user_id` for `session_id`.
///
/// Idempotent get-or-create keyed on the (session, user) pair: an
/// existing record is returned unchanged, a missing one is created with
/// status `registered` after re-checking the roster count against the
/// session capacity inside the same transaction. Never mutates the
/// session's own fields.
#[instrument(skip(db))]
pub async fn register(
    db: &DatabaseConnection,
    session_id: i32,
    user_id: i32,
) -> Result<SessionWithRoster> {
    let view = db
        .transaction::<_, SessionWithRoster, DomainError>(move |txn| {
            Box::pin(async move {
                // Exclusive row lock on the session: concurrent
                // registrations for the same session queue up here, so
                // the count below cannot run against a stale roster.
                // SQLite has no FOR UPDATE and serializes writers
                // instead; the lock clause is dropped there.
                let session = training_session::Entity::find_by_id(session_id)
                    .lock_exclusive()
                    .one(txn)
                    .await?
                    .ok_or(DomainError::NotFound("training session"))?;

                user::Entity::find_by_id(user_id)
                    .one(txn)
                    .await?
                    .ok_or(DomainError::NotFound("user"))?;

                let existing = attendance_record::Entity::find()
                    .filter(attendance_record::Column::TrainingSessionId.eq(session_id))
                    .filter(attendance_record::Column::UserId.eq(user_id))
                    .one(txn)
                    .await?;

                if let Some(record) = existing {
                    debug!(
                        record_id = record.id,
                        "user already registered, returning roster unchanged"
                    );
                } else {
                    let roster_size = attendance_record::Entity::find()
                        .filter(attendance_record::Column::TrainingSessionId.eq(session_id))
                        .count(txn)
                        .await?;
                    if roster_size >= session.max_participants as u64 {
                        warn!(
                            session_id,
                            max_participants = session.max_participants,
                            "registration rejected, session is full"
                        );
                        return Err(DomainError::CapacityExceeded {
                            session_id,
                            max_participants: session.max_participants,
                        });
                    }

                    let insert = attendance_record::ActiveModel {
                        training_session_id: Set(session_id),
                        user_id: Set(user_id),
                        status: Set(AttendanceStatus::Registered),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await;

                    match insert {
                        Ok(record) => {
                            debug!(record_id = record.id, "attendance record created");
                        }
                        // A concurrent registration won the race on the
                        // unique index; the user is on the roster either
                        // way, which is exactly what we promised.
                        Err(err)
                            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
                        {
                            debug!(session_id, user_id, "lost insert race, already registered");
                        }
                        Err(err) => return Err(err.into()),
                    }
                }

                views::session_with_roster(txn, &session).await
            })
        })
        .await
        .map_err(DomainError::from_txn)?;

    Ok(view)
}

/// Remove `user_id` from the roster of `session_id`.
///
/// Unregistering a user who holds no record is a successful no-op, so a
/// double leave (or a client retry) is never an error. Only a missing
/// session fails.
#[instrument(skip(db))]
pub async fn unregister(
    db: &DatabaseConnection,
    session_id: i32,
    user_id: i32,
) -> Result<SessionWithRoster> {
    let session = training_session::Entity::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("training session"))?;

    let deleted = attendance_record::Entity::delete_many()
        .filter(attendance_record::Column::TrainingSessionId.eq(session_id))
        .filter(attendance_record::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    debug!(rows = deleted.rows_affected, "unregister completed");

    views::session_with_roster(db, &session).await
}
