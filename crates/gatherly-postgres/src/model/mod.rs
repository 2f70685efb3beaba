//! Diesel models mapping directly to database tables.
//!
//! Each table has a read model plus `New*` and `Update*` companions for
//! inserts and partial updates.

mod account;
mod event;
mod rsvp;

pub use self::account::{Account, AccountDisplay, NewAccount, UpdateAccount};
pub use self::event::{Event, EventSummary, NewEvent, UpdateEvent};
pub use self::rsvp::{NewRsvp, Rsvp};
