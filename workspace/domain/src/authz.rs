//! Ownership checks for mutating operations. A trainer may touch only
//! their own sessions, and attendance records inherit ownership from
//! the parent session rather than storing a trainer reference of their
//! own. Both checks are pure functions of (actor, resolved owner) and
//! run before any mutation is attempted.

use model::entities::training_session;

use crate::error::{DomainError, Result};

/// The acting user may update or delete a session only when they are
/// its owning trainer.
pub fn ensure_session_owner(
    acting_user_id: i32,
    session: &training_session::Model,
) -> Result<()> {
    if session.is_owned_by(acting_user_id) {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}

/// The acting user may change an attendance record only when they own
/// the record's parent session. Ownership is derived transitively; the
/// caller resolves the parent and passes it in.
pub fn ensure_record_owner(
    acting_user_id: i32,
    parent_session: &training_session::Model,
) -> Result<()> {
    ensure_session_owner(acting_user_id, parent_session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session_owned_by(trainer_id: i32) -> training_session::Model {
        let start = NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        training_session::Model {
            id: 1,
            trainer_id,
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
            max_participants: 10,
            notes: None,
            category_id: None,
        }
    }

    #[test]
    fn owner_passes_the_gate() {
        let session = session_owned_by(7);
        assert!(ensure_session_owner(7, &session).is_ok());
        assert!(ensure_record_owner(7, &session).is_ok());
    }

    #[test]
    fn everyone_else_is_forbidden() {
        let session = session_owned_by(7);
        assert!(matches!(
            ensure_session_owner(8, &session),
            Err(DomainError::Forbidden)
        ));
        assert!(matches!(
            ensure_record_owner(8, &session),
            Err(DomainError::Forbidden)
        ));
    }
}
