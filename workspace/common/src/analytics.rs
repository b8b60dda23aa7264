use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Read-only rollup over the current store snapshot. Every field is a
/// pure function of the persisted entities; nothing here is maintained
/// incrementally.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TrainingAnalyticsSummary {
    /// Total number of training sessions ever created.
    pub total_sessions: u64,
    /// Number of distinct users appearing in attendance records.
    pub total_participants: u64,
    /// Percentage (0-100, rounded) of attendance records with status
    /// `present`. Zero when there are no records at all.
    pub average_attendance: u64,
    /// Number of sessions whose start time lies in the future.
    pub upcoming_sessions: u64,
}

impl TrainingAnalyticsSummary {
    /// Derive the present-percentage from raw counts, avoiding a
    /// division by zero for an empty store.
    pub fn attendance_percentage(present: u64, total: u64) -> u64 {
        if total == 0 {
            0
        } else {
            ((present as f64 / total as f64) * 100.0).round() as u64
        }
    }
}
