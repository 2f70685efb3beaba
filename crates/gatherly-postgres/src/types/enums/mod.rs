//! Postgres enum types shared across models and queries.

mod event_category;
mod event_status;
mod rsvp_response;

pub use event_category::EventCategory;
pub use event_status::EventStatus;
pub use rsvp_response::RsvpResponse;
