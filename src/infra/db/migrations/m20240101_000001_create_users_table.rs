//! Migration: Create users table (admins, nurses and patients).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Role).string_len(16).not_null())
                    .col(ColumnDef::new(Users::StaffId).string_len(32).null())
                    .col(ColumnDef::new(Users::Gender).string_len(16).null())
                    .col(ColumnDef::new(Users::IcNumber).string_len(32).null())
                    .col(ColumnDef::new(Users::ContactNumber).string_len(32).null())
                    .col(ColumnDef::new(Users::Address).text().null())
                    .col(ColumnDef::new(Users::BloodType).string_len(8).null())
                    .col(ColumnDef::new(Users::EmergencyContact).string_len(64).null())
                    .col(ColumnDef::new(Users::Relation).string_len(32).null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Role filters back every patient and nurse listing
        manager
            .create_index(
                Index::create()
                    .name("idx_users_role_name")
                    .table(Users::Table)
                    .col(Users::Role)
                    .col(Users::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Users {
    Table,
    Id,
    Name,
    Email,
    Role,
    StaffId,
    Gender,
    IcNumber,
    ContactNumber,
    Address,
    BloodType,
    EmergencyContact,
    Relation,
    CreatedAt,
    UpdatedAt,
}
