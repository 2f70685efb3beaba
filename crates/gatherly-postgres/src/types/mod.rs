//! Contains constraints, enumerations and other custom types.

mod constraint;
mod enums;
mod filtering;
mod tally;

pub use constraint::{
    AccountConstraints, ConstraintCategory, ConstraintViolation, EventConstraints,
    RsvpConstraints,
};
pub use enums::{EventCategory, EventStatus, RsvpResponse};
pub use filtering::EventFilter;
pub use tally::RsvpTally;
