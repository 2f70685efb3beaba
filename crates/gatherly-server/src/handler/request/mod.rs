//! Request types for HTTP handlers.

mod authentication;
mod event;
mod pagination;
mod paths;
mod rsvp;

pub use authentication::{Login, Register, UpdateProfile};
pub use event::{CreateEvent, ListEvents, UpdateEventRequest};
pub use pagination::Pagination;
pub use paths::{EventPathParams, InviteTokenPathParams};
pub use rsvp::SubmitRsvp;
