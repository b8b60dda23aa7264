//! Builders for the transport views returned by domain operations: a
//! session joined with its roster, and an attendance record joined with
//! its user.

use common::{AttendanceDto, AttendanceWithUser, SessionWithRoster, UserDto};
use model::entities::{attendance_record, training_session, user};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::error::{DomainError, Result};

pub fn user_dto(model: user::Model) -> UserDto {
    UserDto {
        id: model.id,
        name: model.name,
        email: model.email,
        role: model.role.as_str().to_string(),
    }
}

pub fn attendance_with_user(
    record: attendance_record::Model,
    user: user::Model,
) -> AttendanceWithUser {
    AttendanceWithUser {
        id: record.id,
        training_session_id: record.training_session_id,
        status: record.status.as_str().to_string(),
        user: user_dto(user),
    }
}

/// Load the roster for `session` and assemble the session view the
/// registration endpoints return. Works inside or outside a
/// transaction, whichever connection the caller holds.
pub async fn session_with_roster<C: ConnectionTrait>(
    db: &C,
    session: &training_session::Model,
) -> Result<SessionWithRoster> {
    let rows = attendance_record::Entity::find()
        .filter(attendance_record::Column::TrainingSessionId.eq(session.id))
        .find_also_related(user::Entity)
        .order_by_asc(attendance_record::Column::Id)
        .all(db)
        .await?;

    let mut roster = Vec::with_capacity(rows.len());
    for (record, participant) in rows {
        // The user FK is NOT NULL, so a missing join row means the
        // store is inconsistent rather than the request being wrong.
        let participant = participant.ok_or(DomainError::NotFound("user"))?;
        roster.push(AttendanceDto {
            id: record.id,
            user: user_dto(participant),
            status: record.status.as_str().to_string(),
        });
    }

    Ok(SessionWithRoster {
        id: session.id,
        trainer_id: session.trainer_id,
        start_time: session.start_time,
        end_time: session.end_time,
        max_participants: session.max_participants,
        notes: session.notes.clone(),
        category_id: session.category_id,
        roster,
    })
}
