use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EventTypes::ParentTypeId).integer())
                    .col(
                        ColumnDef::new(EventTypes::Name)
                            .string_len(80)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventTypes::Slug)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_types_parent_type_id")
                            .from(EventTypes::Table, EventTypes::ParentTypeId)
                            .to(EventTypes::Table, EventTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_types_name")
                    .table(EventTypes::Table)
                    .col(EventTypes::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventTypes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EventTypes {
    Table,
    Id,
    ParentTypeId,
    Name,
    Slug,
}
