//! Migration: Create beds table.
//!
//! `patient_id` carries a unique index so a patient can hold at most one
//! bed; NULLs never collide.

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
                    .table(Beds::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Beds::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Beds::RoomId).uuid().not_null())
                    .col(ColumnDef::new(Beds::BedNumber).integer().not_null())
                    .col(
                        ColumnDef::new(Beds::Status)
                            .string_len(16)
                            .not_null()
                            .default("available"),
                    )
                    .col(ColumnDef::new(Beds::PatientId).uuid().null())
                    .col(
                        ColumnDef::new(Beds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Beds::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_beds_room_id")
                            .from(Beds::Table, Beds::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_beds_patient_id")
                            .from(Beds::Table, Beds::PatientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_beds_room_bed_number")
                    .table(Beds::Table)
                    .col(Beds::RoomId)
                    .col(Beds::BedNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_beds_patient_id")
                    .table(Beds::Table)
                    .col(Beds::PatientId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Beds::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Beds {
    Table,
    Id,
    RoomId,
    BedNumber,
    Status,
    PatientId,
    CreatedAt,
    UpdatedAt,
}
