//! Migration to create the attributes table.
//!
//! Attribute IDs are unique within a model, so the group is a plain column
//! (with a cascading foreign key) rather than part of the primary key.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attributes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attributes::SupplierAccount)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Attributes::ModelId).text().not_null())
                    .col(ColumnDef::new(Attributes::Id).text().not_null())
                    .col(ColumnDef::new(Attributes::GroupId).text().not_null())
                    .col(ColumnDef::new(Attributes::Name).text().not_null())
                    .col(
                        ColumnDef::new(Attributes::Unit)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Attributes::Placeholder)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Attributes::Editable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Attributes::Required)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Attributes::IsKey)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Attributes::OptionRule)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Attributes::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Attributes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Attributes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(Attributes::SupplierAccount)
                            .col(Attributes::ModelId)
                            .col(Attributes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attributes_group")
                            .from(
                                Attributes::Table,
                                (
                                    Attributes::SupplierAccount,
                                    Attributes::ModelId,
                                    Attributes::GroupId,
                                ),
                            )
                            .to(
                                AttributeGroups::Table,
                                (
                                    AttributeGroups::SupplierAccount,
                                    AttributeGroups::ModelId,
                                    AttributeGroups::Id,
                                ),
                            )
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attributes_group")
                    .table(Attributes::Table)
                    .col(Attributes::SupplierAccount)
                    .col(Attributes::ModelId)
                    .col(Attributes::GroupId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_attributes_group").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Attributes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Attributes {
    Table,
    SupplierAccount,
    ModelId,
    Id,
    GroupId,
    Name,
    Unit,
    Placeholder,
    Editable,
    Required,
    IsKey,
    OptionRule,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AttributeGroups {
    Table,
    SupplierAccount,
    ModelId,
    Id,
}
