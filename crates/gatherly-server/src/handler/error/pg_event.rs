//! Event-related constraint violation error handlers.

use gatherly_postgres::types::EventConstraints;

use crate::handler::{Error, ErrorKind};

impl From<EventConstraints> for Error<'static> {
    fn from(c: EventConstraints) -> Self {
        let error = match c {
            EventConstraints::PrimaryKey => ErrorKind::InternalServerError.into_error(),
            EventConstraints::InviteTokenUnique => {
                // Token collisions are regenerated internally, reaching here is a bug
                ErrorKind::InternalServerError.into_error()
            }
            EventConstraints::CreatedByFkey => {
                ErrorKind::NotFound.with_message("Event owner account no longer exists")
            }
            EventConstraints::TitleLength => {
                ErrorKind::BadRequest.with_message("Title must be 3 to 100 characters long")
            }
            EventConstraints::DescriptionLength => {
                ErrorKind::BadRequest.with_message("Description must be 10 to 500 characters long")
            }
            EventConstraints::LocationLength => {
                ErrorKind::BadRequest.with_message("Location must be 3 to 100 characters long")
            }
            EventConstraints::MaxAttendeesMin => {
                ErrorKind::BadRequest.with_message("Attendee capacity must be at least 1")
            }
        };

        error.with_resource("event")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_check_becomes_bad_request() {
        let error: Error = EventConstraints::MaxAttendeesMin.into();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.resource(), Some("event"));
    }
}
