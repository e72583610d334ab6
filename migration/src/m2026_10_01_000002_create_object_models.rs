//! Migration to create the object_models table.
//!
//! Object models are tenant-scoped: the primary key is the pair
//! `(supplier_account, id)`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ObjectModels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ObjectModels::SupplierAccount)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ObjectModels::Id).text().not_null())
                    .col(
                        ColumnDef::new(ObjectModels::ClassificationId)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ObjectModels::Name).text().not_null())
                    .col(
                        ColumnDef::new(ObjectModels::Icon)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ObjectModels::Position)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ObjectModels::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ObjectModels::Creator)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ObjectModels::Modifier)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ObjectModels::Paused)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ObjectModels::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ObjectModels::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(ObjectModels::SupplierAccount)
                            .col(ObjectModels::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_object_models_classification_id")
                            .from(ObjectModels::Table, ObjectModels::ClassificationId)
                            .to(Classifications::Table, Classifications::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_object_models_classification")
                    .table(ObjectModels::Table)
                    .col(ObjectModels::SupplierAccount)
                    .col(ObjectModels::ClassificationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_object_models_classification")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ObjectModels::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ObjectModels {
    Table,
    SupplierAccount,
    Id,
    ClassificationId,
    Name,
    Icon,
    Position,
    Description,
    Creator,
    Modifier,
    Paused,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Classifications {
    Table,
    Id,
}
