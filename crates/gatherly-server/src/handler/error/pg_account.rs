//! Account-related constraint violation error handlers.

use gatherly_postgres::types::AccountConstraints;

use crate::handler::{Error, ErrorKind};

impl From<AccountConstraints> for Error<'static> {
    fn from(c: AccountConstraints) -> Self {
        let error = match c {
            AccountConstraints::PrimaryKey => ErrorKind::InternalServerError.into_error(),
            AccountConstraints::EmailAddressUnique => {
                ErrorKind::Conflict.with_message("An account with this email address already exists")
            }
            AccountConstraints::EmailAddressFormat => {
                ErrorKind::BadRequest.with_message("Invalid email format")
            }
            AccountConstraints::DisplayNameLength => {
                ErrorKind::BadRequest.with_message("Display name must be 2 to 100 characters long")
            }
        };

        error.with_resource("account")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_email_becomes_conflict() {
        let error: Error = AccountConstraints::EmailAddressUnique.into();
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.resource(), Some("account"));
    }
}
