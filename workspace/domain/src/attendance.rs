//! Attendance status updates on existing records.
//!
//! The four states carry no ordering: trainers must be able to correct
//! a mistaken mark after the fact, so any status may move to any other.
//! Validation is therefore a plain membership check on the enum, not a
//! transition graph.

use common::AttendanceWithUser;
use model::entities::attendance_record::AttendanceStatus;
use model::entities::{attendance_record, training_session, user};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
use tracing::{debug, instrument};

use crate::error::{DomainError, Result};
use crate::{authz, views};

/// Parse an inbound status string into the enum, rejecting anything
/// outside registered/present/absent/late.
pub fn parse_status(raw: &str) -> Result<AttendanceStatus> {
    match raw {
        "registered" => Ok(AttendanceStatus::Registered),
        "present" => Ok(AttendanceStatus::Present),
        "absent" => Ok(AttendanceStatus::Absent),
        "late" => Ok(AttendanceStatus::Late),
        other => Err(DomainError::InvalidStatus(other.to_string())),
    }
}

/// Set the status of an attendance record on behalf of
/// `acting_user_id`, who must be the owning trainer of the record's
/// parent session. Returns the updated record joined with its user.
///
/// A rejected change (bad status, missing record, foreign trainer)
/// leaves the stored status untouched.
#[instrument(skip(db))]
pub async fn set_status<C: ConnectionTrait>(
    db: &C,
    record_id: i32,
    acting_user_id: i32,
    raw_status: &str,
) -> Result<AttendanceWithUser> {
    let status = parse_status(raw_status)?;

    let (record, participant) = attendance_record::Entity::find_by_id(record_id)
        .find_also_related(user::Entity)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("attendance record"))?;
    let participant = participant.ok_or(DomainError::NotFound("user"))?;

    // Ownership lives on the parent session, not the record.
    let parent = training_session::Entity::find_by_id(record.training_session_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound("training session"))?;
    authz::ensure_record_owner(acting_user_id, &parent)?;

    let mut active: attendance_record::ActiveModel = record.into();
    active.status = Set(status);
    let updated = active.update(db).await?;
    debug!(record_id, status = status.as_str(), "attendance status updated");

    Ok(views::attendance_with_user(updated, participant))
}
