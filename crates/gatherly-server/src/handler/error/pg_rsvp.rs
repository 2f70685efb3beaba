//! RSVP-related constraint violation error handlers.

use gatherly_postgres::types::RsvpConstraints;

use crate::handler::{Error, ErrorKind};

impl From<RsvpConstraints> for Error<'static> {
    fn from(c: RsvpConstraints) -> Self {
        let error = match c {
            RsvpConstraints::PrimaryKey => ErrorKind::InternalServerError.into_error(),
            RsvpConstraints::EventIdAccountIdUnique => {
                // Responses are upserted, a raw duplicate insert is a bug
                ErrorKind::InternalServerError.into_error()
            }
            RsvpConstraints::EventIdFkey => {
                ErrorKind::NotFound.with_message("Event no longer exists")
            }
            RsvpConstraints::AccountIdFkey => {
                ErrorKind::NotFound.with_message("Account no longer exists")
            }
            RsvpConstraints::MessageLength => {
                ErrorKind::BadRequest.with_message("Message cannot exceed 200 characters")
            }
            RsvpConstraints::PlusOnesRange => {
                ErrorKind::BadRequest.with_message("Plus-ones must be between 0 and 10")
            }
        };

        error.with_resource("rsvp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_event_becomes_not_found() {
        let error: Error = RsvpConstraints::EventIdFkey.into();
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.resource(), Some("rsvp"));
    }
}
