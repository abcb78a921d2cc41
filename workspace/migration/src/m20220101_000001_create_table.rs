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
                    .col(string(Users::Uid).primary_key())
                    .col(string(Users::Email).unique_key())
                    .col(string(Users::Name))
                    .col(string(Users::PasswordHash))
                    .col(timestamp_with_time_zone(Users::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Create profiles table. Role stays NULL until onboarding confirms
        // one, so both role columns are nullable.
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(string(Profiles::Uid).primary_key())
                    .col(string(Profiles::Email))
                    .col(string(Profiles::Name))
                    .col(string_null(Profiles::Role))
                    .col(timestamp_with_time_zone_null(Profiles::RoleSetAt))
                    .col(timestamp_with_time_zone(Profiles::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profile_user")
                            .from(Profiles::Table, Profiles::Uid)
                            .to(Users::Table, Users::Uid)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create sessions table
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(string(Sessions::Id).primary_key())
                    .col(string(Sessions::UserId))
                    .col(timestamp_with_time_zone(Sessions::IssuedAt))
                    .col(timestamp_with_time_zone(Sessions::ExpiresAt))
                    .col(boolean(Sessions::Revoked).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_user")
                            .from(Sessions::Table, Sessions::UserId)
                            .to(Users::Table, Users::Uid)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create prediction_records table
        manager
            .create_table(
                Table::create()
                    .table(PredictionRecords::Table)
                    .if_not_exists()
                    .col(pk_auto(PredictionRecords::Id))
                    .col(string(PredictionRecords::UserId))
                    .col(integer(PredictionRecords::Year))
                    .col(string(PredictionRecords::Season))
                    .col(string(PredictionRecords::District))
                    .col(double(PredictionRecords::SownHect))
                    .col(double(PredictionRecords::PreviousYield))
                    .col(double(PredictionRecords::PreviousProduction))
                    .col(double(PredictionRecords::PredictedExtent))
                    .col(double(PredictionRecords::PredictedProduction))
                    .col(timestamp_with_time_zone(PredictionRecords::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prediction_record_user")
                            .from(PredictionRecords::Table, PredictionRecords::UserId)
                            .to(Users::Table, Users::Uid)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The activity feed reads the newest records per user.
        manager
            .create_index(
                Index::create()
                    .name("idx_prediction_records_user_created")
                    .table(PredictionRecords::Table)
                    .col(PredictionRecords::UserId)
                    .col(PredictionRecords::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PredictionRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
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
    Uid,
    Email,
    Name,
    PasswordHash,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Uid,
    Email,
    Name,
    Role,
    RoleSetAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    Id,
    UserId,
    IssuedAt,
    ExpiresAt,
    Revoked,
}

#[derive(DeriveIden)]
enum PredictionRecords {
    Table,
    Id,
    UserId,
    Year,
    Season,
    District,
    SownHect,
    PreviousYield,
    PreviousProduction,
    PredictedExtent,
    PredictedProduction,
    CreatedAt,
}
