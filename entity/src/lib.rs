//! Sea-ORM entity definitions for the ticketing data model.

pub mod event_speakers;
pub mod event_types;
pub mod events;
pub mod locations;
pub mod organizers;
pub mod speakers;
pub mod ticket_categories;
pub mod tickets;
pub mod users;

pub use event_speakers::Entity as EventSpeakers;
pub use event_types::Entity as EventTypes;
pub use events::Entity as Events;
pub use locations::Entity as Locations;
pub use organizers::Entity as Organizers;
pub use speakers::Entity as Speakers;
pub use ticket_categories::Entity as TicketCategories;
pub use tickets::Entity as Tickets;
pub use users::Entity as Users;
