use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Speakers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Speakers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Speakers::Name).string_len(40).not_null())
                    .col(
                        ColumnDef::new(Speakers::Slug)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Speakers::Description).text())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Speakers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Speakers {
    Table,
    Id,
    Name,
    Slug,
    Description,
}
