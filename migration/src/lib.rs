pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_users_table;
mod m20240601_000002_create_organizers_table;
mod m20240601_000003_create_event_types_table;
mod m20240601_000004_create_locations_table;
mod m20240601_000005_create_speakers_table;
mod m20240601_000006_create_events_table;
mod m20240601_000007_create_event_speakers_table;
mod m20240601_000008_create_ticket_categories_table;
mod m20240601_000009_create_tickets_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_users_table::Migration),
            Box::new(m20240601_000002_create_organizers_table::Migration),
            Box::new(m20240601_000003_create_event_types_table::Migration),
            Box::new(m20240601_000004_create_locations_table::Migration),
            Box::new(m20240601_000005_create_speakers_table::Migration),
            Box::new(m20240601_000006_create_events_table::Migration),
            Box::new(m20240601_000007_create_event_speakers_table::Migration),
            Box::new(m20240601_000008_create_ticket_categories_table::Migration),
            Box::new(m20240601_000009_create_tickets_table::Migration),
        ]
    }
}
