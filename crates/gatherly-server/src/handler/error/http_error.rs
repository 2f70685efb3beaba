//! Handler error type and the catalogue of failure kinds.
//!
//! Handlers return [`Error`], which pairs an [`ErrorKind`] with optional
//! message, resource and context strings. Rendering goes through
//! [`ErrorResponse`], so every failure in the API shares one JSON shape.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// The error type returned by every handler.
///
/// Built from an [`ErrorKind`] and refined with the builder methods:
///
/// ```ignore
/// ErrorKind::NotFound
///     .with_message("Event not found.")
///     .with_resource("event")
/// ```
///
/// The lifetime tracks borrowed message strings; [`Error::into_static`]
/// detaches them when the error must outlive its source.
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    context: Option<Cow<'a, str>>,
    message: Option<Cow<'a, str>>,
    resource: Option<Cow<'a, str>>,
}

impl Error<'static> {
    /// Creates an error of the given kind with no extra detail.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            message: None,
            resource: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Attaches diagnostic context, included in the response body.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Attaches a client-facing message.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Names the resource the failure relates to ("event", "rsvp", ...).
    #[inline]
    pub fn with_resource(self, resource: impl Into<Cow<'a, str>>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the attached context, if any.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Returns the attached message, if any.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the attached resource name, if any.
    #[inline]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Takes ownership of any borrowed strings.
    pub fn into_static(self) -> Error<'static> {
        Error {
            kind: self.kind,
            context: self.context.map(|c| Cow::Owned(c.into_owned())),
            message: self.message.map(|m| Cow::Owned(m.into_owned())),
            resource: self.resource.map(|r| Cow::Owned(r.into_owned())),
        }
    }
}

impl Default for Error<'static> {
    #[inline]
    fn default() -> Self {
        Self::new(ErrorKind::default())
    }
}

impl fmt::Debug for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut error = f.debug_struct("Error");
        error
            .field("kind", &self.kind)
            .field("status", &self.kind.status_code());

        if let Some(ref message) = self.message {
            error.field("message", message);
        }
        if let Some(ref resource) = self.resource {
            error.field("resource", resource);
        }
        if let Some(ref context) = self.context {
            error.field("context", context);
        }

        error.finish()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();
        let message = self.message.as_deref().unwrap_or("Unknown error");

        write!(f, "{} ({}): {}", response.name, response.status, message)?;

        if let Some(ref context) = self.context {
            write!(f, " - {context}")?;
        }
        if let Some(ref resource) = self.resource {
            write!(f, " [resource: {resource}]")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        let mut response = self.kind.response();

        if let Some(message) = self.message {
            response = response.with_message(message);
        }
        if let Some(resource) = self.resource {
            response = response.with_resource(resource);
        }
        if let Some(context) = self.context {
            response = response.with_context(context);
        }

        response.into_response()
    }
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Handler result defaulting to the owned error form.
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Every failure class the API reports, each mapped to one status code.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400, a required path parameter was absent
    MissingPathParam,
    /// 400, the request body or query string was invalid
    BadRequest,
    /// 400, the resource's current state forbids the operation (for
    /// example an RSVP against a cancelled event)
    InvalidState,
    /// 401, no bearer token on a protected route
    MissingAuthToken,
    /// 401, the bearer token could not be decoded
    MalformedAuthToken,
    /// 401, credentials or token rejected
    Unauthorized,
    /// 403, authenticated but not the owner
    Forbidden,
    /// 404, no such event, account or RSVP
    NotFound,
    /// 409, a uniqueness constraint was hit
    Conflict,
    /// 500, anything unexpected
    #[default]
    InternalServerError,
}

impl ErrorKind {
    /// Wraps this kind in an [`Error`] with no extra detail.
    #[inline]
    pub fn into_error(self) -> Error<'static> {
        Error::new(self)
    }

    /// Shorthand for `Error::new(self).with_context(...)`.
    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    /// Shorthand for `Error::new(self).with_message(...)`.
    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    /// Shorthand for `Error::new(self).with_resource(...)`.
    #[inline]
    pub fn with_resource<'a>(self, resource: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_resource(resource)
    }

    /// The status code this kind renders with.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// The canned response body for this kind.
    #[inline]
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::MissingPathParam => ErrorResponse::MISSING_PATH_PARAM,
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::InvalidState => ErrorResponse::INVALID_STATE,
            Self::MissingAuthToken => ErrorResponse::MISSING_AUTH_TOKEN,
            Self::MalformedAuthToken => ErrorResponse::MALFORMED_AUTH_TOKEN,
            Self::Unauthorized => ErrorResponse::UNAUTHORIZED,
            Self::Forbidden => ErrorResponse::FORBIDDEN,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::Conflict => ErrorResponse::CONFLICT,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.response().name.as_ref())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ErrorKind; 10] = [
        ErrorKind::MissingPathParam,
        ErrorKind::BadRequest,
        ErrorKind::InvalidState,
        ErrorKind::MissingAuthToken,
        ErrorKind::MalformedAuthToken,
        ErrorKind::Unauthorized,
        ErrorKind::Forbidden,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
        ErrorKind::InternalServerError,
    ];

    #[test]
    fn default_error_is_an_internal_error() {
        let error = Error::default();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.kind().status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn builder_detail_is_readable_back() {
        let error = ErrorKind::Forbidden
            .with_message("Only the event organizer can update this event.")
            .with_resource("event")
            .with_context("caller is not the owner");

        assert_eq!(error.kind(), ErrorKind::Forbidden);
        assert_eq!(
            error.message(),
            Some("Only the event organizer can update this event.")
        );
        assert_eq!(error.resource(), Some("event"));
        assert_eq!(error.context(), Some("caller is not the owner"));
    }

    #[test]
    fn display_includes_name_status_and_detail() {
        let error = ErrorKind::NotFound
            .with_message("Event not found.")
            .with_resource("event");

        let rendered = error.to_string();
        assert!(rendered.contains("not_found"));
        assert!(rendered.contains("404"));
        assert!(rendered.contains("Event not found."));
        assert!(rendered.contains("[resource: event]"));
    }

    #[test]
    fn into_static_keeps_borrowed_detail() {
        let message = String::from("This invite link is no longer valid.");
        let error = ErrorKind::NotFound
            .with_message(message.as_str())
            .into_static();

        assert_eq!(error.message(), Some(message.as_str()));
    }

    #[test]
    fn every_kind_renders_a_4xx_or_5xx() {
        for kind in ALL_KINDS {
            let response = kind.response();
            assert!(!response.name.is_empty());
            assert!(response.status.is_client_error() || response.status.is_server_error());
            let _ = kind.into_response();
        }
    }

    #[test]
    fn errors_satisfy_the_std_error_trait() {
        let error = Error::new(ErrorKind::BadRequest);
        let _: &dyn std::error::Error = &error;
    }
}
