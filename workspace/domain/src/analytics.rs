//! Read-only rollups over the store: session totals, distinct
//! participants, present-percentage and upcoming-session count. Every
//! value is recomputed from the current snapshot on each call; any
//! caching happens in the API layer.

use common::TrainingAnalyticsSummary;
use model::entities::attendance_record::AttendanceStatus;
use model::entities::{attendance_record, training_session};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};
use tracing::instrument;

use crate::error::Result;

/// Compute the analytics summary from the current store snapshot.
#[instrument(skip(db))]
pub async fn summary<C: ConnectionTrait>(db: &C) -> Result<TrainingAnalyticsSummary> {
    let total_sessions = training_session::Entity::find().count(db).await?;

    let participant_ids: Vec<i32> = attendance_record::Entity::find()
        .select_only()
        .column(attendance_record::Column::UserId)
        .distinct()
        .into_tuple()
        .all(db)
        .await?;

    let total_attendance = attendance_record::Entity::find().count(db).await?;
    let present_attendance = attendance_record::Entity::find()
        .filter(attendance_record::Column::Status.eq(AttendanceStatus::Present))
        .count(db)
        .await?;

    let upcoming_sessions = training_session::Entity::find()
        .filter(training_session::Column::StartTime.gt(chrono::Utc::now().naive_utc()))
        .count(db)
        .await?;

    Ok(TrainingAnalyticsSummary {
        total_sessions,
        total_participants: participant_ids.len() as u64,
        average_attendance: TrainingAnalyticsSummary::attendance_percentage(
            present_attendance,
            total_attendance,
        ),
        upcoming_sessions,
    })
}
