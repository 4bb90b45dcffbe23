//! Migration: Create rooms table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rooms::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Rooms::RoomNumber)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Rooms::Floor).integer().not_null())
                    .col(ColumnDef::new(Rooms::RoomType).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Rooms::TotalBeds)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Rooms::Notes).string_len(255).null())
                    .col(
                        ColumnDef::new(Rooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rooms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Rooms {
    Table,
    Id,
    RoomNumber,
    Floor,
    RoomType,
    TotalBeds,
    Notes,
    CreatedAt,
    UpdatedAt,
}
