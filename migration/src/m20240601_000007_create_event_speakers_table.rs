use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventSpeakers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EventSpeakers::EventId).integer().not_null())
                    .col(
                        ColumnDef::new(EventSpeakers::SpeakerId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(EventSpeakers::EventId)
                            .col(EventSpeakers::SpeakerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_speakers_event_id")
                            .from(EventSpeakers::Table, EventSpeakers::EventId)
                            .to(Events::Table, Events::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_speakers_speaker_id")
                            .from(EventSpeakers::Table, EventSpeakers::SpeakerId)
                            .to(Speakers::Table, Speakers::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventSpeakers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EventSpeakers {
    Table,
    EventId,
    SpeakerId,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Speakers {
    Table,
    Id,
}
