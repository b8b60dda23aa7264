use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use model::entities::user::UserRole;
use model::entities::{training_category, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};
use tracing::{debug, info, trace};

/// Default training categories the gym starts out with.
const DEFAULT_CATEGORIES: [(&str, &str, &str); 4] = [
    (
        "Serve & Attack Training",
        "Focus on serving techniques and attacking skills including spikes, tips, and roll shots.",
        "#EF4444",
    ),
    (
        "Precision Training",
        "Develop accuracy and control in all aspects of the game, including serving, setting, and hitting.",
        "#3B82F6",
    ),
    (
        "Passing & Control Training",
        "Improve ball control, passing techniques, and first contact skills.",
        "#10B981",
    ),
    (
        "Block & Defense Training",
        "Enhance blocking techniques and defensive positioning, including digging and floor defense.",
        "#8B5CF6",
    ),
];

pub async fn seed_database(database_url: &str) -> Result<()> {
    trace!("Entering seed_database function");
    info!("Seeding database");

    let db = Database::connect(database_url).await?;
    Migrator::up(&db, None).await?;

    seed_categories(&db).await?;
    seed_demo_users(&db).await?;

    info!("Database seeding completed successfully!");
    Ok(())
}

async fn seed_categories(db: &DatabaseConnection) -> Result<()> {
    for (name, description, color) in DEFAULT_CATEGORIES {
        let exists = training_category::Entity::find()
            .filter(training_category::Column::Name.eq(name))
            .one(db)
            .await?
            .is_some();
        if exists {
            debug!("Category '{}' already present, skipping", name);
            continue;
        }

        training_category::ActiveModel {
            name: Set(name.to_string()),
            description: Set(Some(description.to_string())),
            color: Set(Some(color.to_string())),
            ..Default::default()
        }
        .insert(db)
        .await?;
        info!("Seeded category '{}'", name);
    }
    Ok(())
}

/// Seed one admin and one trainer so a fresh install has someone who
/// can log in and someone who can schedule sessions. Skipped entirely
/// when any user already exists.
async fn seed_demo_users(db: &DatabaseConnection) -> Result<()> {
    let user_count = user::Entity::find().count(db).await?;
    if user_count > 0 {
        debug!("Users already present ({}), skipping demo users", user_count);
        return Ok(());
    }

    // Placeholder hashes; the real authentication layer replaces these
    // on first login setup.
    user::ActiveModel {
        name: Set("Admin".to_string()),
        email: Set("admin@example.com".to_string()),
        password_hash: Set("$argon2id$demo-admin".to_string()),
        role: Set(UserRole::Admin),
        ..Default::default()
    }
    .insert(db)
    .await?;
    info!("Seeded demo admin (admin@example.com)");

    user::ActiveModel {
        name: Set("Coach".to_string()),
        email: Set("coach@example.com".to_string()),
        password_hash: Set("$argon2id$demo-trainer".to_string()),
        role: Set(UserRole::Trainer),
        ..Default::default()
    }
    .insert(db)
    .await?;
    info!("Seeded demo trainer (coach@example.com)");

    Ok(())
}
