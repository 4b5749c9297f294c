use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TicketCategories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TicketCategories::Name)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TicketCategories::Quota)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TicketCategories::EventId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_categories_event_id")
                            .from(TicketCategories::Table, TicketCategories::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_categories_event_id")
                    .table(TicketCategories::Table)
                    .col(TicketCategories::EventId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TicketCategories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TicketCategories {
    Table,
    Id,
    Name,
    Quota,
    EventId,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
}
