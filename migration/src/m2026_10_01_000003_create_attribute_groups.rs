//! Migration to create the attribute_groups table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AttributeGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttributeGroups::SupplierAccount)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttributeGroups::ModelId).text().not_null())
                    .col(ColumnDef::new(AttributeGroups::Id).text().not_null())
                    .col(ColumnDef::new(AttributeGroups::Name).text().not_null())
                    .col(
                        ColumnDef::new(AttributeGroups::GroupIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AttributeGroups::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AttributeGroups::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AttributeGroups::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(AttributeGroups::SupplierAccount)
                            .col(AttributeGroups::ModelId)
                            .col(AttributeGroups::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attribute_groups_model")
                            .from(
                                AttributeGroups::Table,
                                (AttributeGroups::SupplierAccount, AttributeGroups::ModelId),
                            )
                            .to(
                                ObjectModels::Table,
                                (ObjectModels::SupplierAccount, ObjectModels::Id),
                            )
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AttributeGroups::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AttributeGroups {
    Table,
    SupplierAccount,
    ModelId,
    Id,
    Name,
    GroupIndex,
    IsDefault,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ObjectModels {
    Table,
    SupplierAccount,
    Id,
}
