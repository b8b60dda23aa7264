use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Name))
                    .col(string(Users::Email).unique_key())
                    .col(string(Users::PasswordHash))
                    .col(string_len(Users::Role, 20))
                    .to_owned(),
            )
            .await?;

        // Create training_categories table
        manager
            .create_table(
                Table::create()
                    .table(TrainingCategories::Table)
                    .if_not_exists()
                    .col(pk_auto(TrainingCategories::Id))
                    .col(string(TrainingCategories::Name).unique_key())
                    .col(string_null(TrainingCategories::Description))
                    .col(string_null(TrainingCategories::Color))
                    .to_owned(),
            )
            .await?;

        // Create training_sessions table
        manager
            .create_table(
                Table::create()
                    .table(TrainingSessions::Table)
                    .if_not_exists()
                    .col(pk_auto(TrainingSessions::Id))
                    .col(integer(TrainingSessions::TrainerId))
                    .col(date_time(TrainingSessions::StartTime))
                    .col(date_time(TrainingSessions::EndTime))
                    .col(integer(TrainingSessions::MaxParticipants))
                    .col(string_null(TrainingSessions::Notes))
                    .col(integer_null(TrainingSessions::CategoryId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_training_session_trainer")
                            .from(TrainingSessions::Table, TrainingSessions::TrainerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_training_session_category")
                            .from(TrainingSessions::Table, TrainingSessions::CategoryId)
                            .to(TrainingCategories::Table, TrainingCategories::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create attendance_records table
        manager
            .create_table(
                Table::create()
                    .table(AttendanceRecords::Table)
                    .if_not_exists()
                    .col(pk_auto(AttendanceRecords::Id))
                    .col(integer(AttendanceRecords::TrainingSessionId))
                    .col(integer(AttendanceRecords::UserId))
                    .col(string_len(AttendanceRecords::Status, 20))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_record_session")
                            .from(AttendanceRecords::Table, AttendanceRecords::TrainingSessionId)
                            .to(TrainingSessions::Table, TrainingSessions::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_record_user")
                            .from(AttendanceRecords::Table, AttendanceRecords::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One attendance record per (session, user) pair. Registration
        // relies on this index for its get-or-create atomicity.
        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_records_session_user")
                    .table(AttendanceRecords::Table)
                    .col(AttendanceRecords::TrainingSessionId)
                    .col(AttendanceRecords::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AttendanceRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TrainingSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TrainingCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
}

#[derive(DeriveIden)]
enum TrainingCategories {
    Table,
    Id,
    Name,
    Description,
    Color,
}

#[derive(DeriveIden)]
enum TrainingSessions {
    Table,
    Id,
    TrainerId,
    StartTime,
    EndTime,
    MaxParticipants,
    Notes,
    CategoryId,
}

#[derive(DeriveIden)]
enum AttendanceRecords {
    Table,
    Id,
    TrainingSessionId,
    UserId,
    Status,
}
