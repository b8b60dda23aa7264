//! User lifecycle rules. Creation and field updates are plain CRUD and
//! live with the handlers; what belongs here is the one global
//! invariant: the system must never lose its last administrator.

use model::entities::user;
use model::entities::user::UserRole;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, TransactionTrait,
};
use tracing::{debug, instrument, warn};

use crate::error::{DomainError, Result};

/// Delete a user. When the target is an admin, the admin count is taken
/// inside the same transaction as the delete so two concurrent deletes
/// cannot remove the final two admins together.
#[instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, user_id: i32) -> Result<()> {
    db.transaction::<_, (), DomainError>(move |txn| {
        Box::pin(async move {
            let target = user::Entity::find_by_id(user_id)
                .one(txn)
                .await?
                .ok_or(DomainError::NotFound("user"))?;

            if target.is_admin() {
                let admins = user::Entity::find()
                    .filter(user::Column::Role.eq(UserRole::Admin))
                    .count(txn)
                    .await?;
                if admins <= 1 {
                    warn!(user_id, "refusing to delete the last admin");
                    return Err(DomainError::LastAdminProtected);
                }
            }

            target.delete(txn).await?;
            debug!(user_id, "user deleted");
            Ok(())
        })
    })
    .await
    .map_err(DomainError::from_txn)
}
