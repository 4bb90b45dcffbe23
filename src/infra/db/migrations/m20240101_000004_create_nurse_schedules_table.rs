//! Migration: Create nurse_schedules table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;
use super::m20240101_000002_create_rooms_table::Rooms;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NurseSchedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NurseSchedules::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NurseSchedules::NurseId).uuid().not_null())
                    .col(ColumnDef::new(NurseSchedules::RoomId).uuid().not_null())
                    .col(ColumnDef::new(NurseSchedules::Shift).string_len(16).not_null())
                    .col(ColumnDef::new(NurseSchedules::Date).date().not_null())
                    .col(
                        ColumnDef::new(NurseSchedules::Status)
                            .string_len(16)
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(ColumnDef::new(NurseSchedules::Notes).string_len(255).null())
                    .col(
                        ColumnDef::new(NurseSchedules::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NurseSchedules::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_nurse_schedules_nurse_id")
                            .from(NurseSchedules::Table, NurseSchedules::NurseId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_nurse_schedules_room_id")
                            .from(NurseSchedules::Table, NurseSchedules::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Calendar month queries filter by date, optionally per nurse
        manager
            .create_index(
                Index::create()
                    .name("idx_nurse_schedules_date_nurse")
                    .table(NurseSchedules::Table)
                    .col(NurseSchedules::Date)
                    .col(NurseSchedules::NurseId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NurseSchedules::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum NurseSchedules {
    Table,
    Id,
    NurseId,
    RoomId,
    Shift,
    Date,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}
