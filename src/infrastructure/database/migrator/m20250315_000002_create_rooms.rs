//! Create rooms table
//!
//! Rooms belong to a hotel and are removed together with it.

use sea_orm_migration::prelude::*;

use super::m20250315_000001_create_hotels::Hotels;

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
                    .col(ColumnDef::new(Rooms::Number).integer().not_null())
                    .col(
                        ColumnDef::new(Rooms::RoomType)
                            .string_len(20)
                            .not_null()
                            .default("Standard"),
                    )
                    .col(
                        ColumnDef::new(Rooms::Capacity)
                            .string_len(20)
                            .not_null()
                            .default("Single"),
                    )
                    .col(ColumnDef::new(Rooms::HotelId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_hotel")
                            .from(Rooms::Table, Rooms::HotelId)
                            .to(Hotels::Table, Hotels::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rooms_hotel")
                    .table(Rooms::Table)
                    .col(Rooms::HotelId)
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
pub enum Rooms {
    Table,
    Id,
    Number,
    RoomType,
    Capacity,
    HotelId,
}
