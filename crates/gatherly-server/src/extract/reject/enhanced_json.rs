//! JSON extractor that rejects with the API error envelope.
//!
//! [`Json`] wraps [`axum::Json`] so that body failures surface as the same
//! `{success: false, error: ...}` shape every other handler error uses,
//! instead of axum's plain-text rejections.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// JSON body extractor and response wrapper.
///
/// On extraction failure the rejection is mapped to a [`BadRequest`] (or
/// internal) [`Error`] carrying a short hint about what went wrong, so
/// clients never see axum's raw rejection text.
///
/// [`BadRequest`]: ErrorKind::BadRequest
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = <AxumJson<T> as FromRequest<S>>::from_request(req, state).await;
        json.map(|AxumJson(body)| Self(body)).map_err(Into::into)
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error<'static> {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(source) => ErrorKind::BadRequest
                .with_message("Request body does not match the expected shape")
                .with_context(clip_parser_detail(&source.to_string())),
            JsonRejection::JsonSyntaxError(source) => ErrorKind::BadRequest
                .with_message("Request body is not well-formed JSON")
                .with_context(clip_parser_detail(&source.to_string())),
            JsonRejection::MissingJsonContentType(_) => ErrorKind::BadRequest
                .with_message("Request must be sent with Content-Type: application/json"),
            JsonRejection::BytesRejection(source) => ErrorKind::BadRequest
                .with_message("Request body could not be read")
                .with_context(clip_parser_detail(&source.to_string())),
            other => ErrorKind::InternalServerError
                .with_message("Request body processing failed")
                .with_context(format!("Unhandled JSON rejection: {other:?}")),
        }
    }
}

/// Clips serde's error output to a single short line.
///
/// Deserialization errors can embed fragments of the request body; keeping
/// only the first line bounds what gets echoed back to the client.
fn clip_parser_detail(detail: &str) -> String {
    detail
        .lines()
        .next()
        .unwrap_or_default()
        .chars()
        .take(200)
        .collect()
}

impl<T> aide::OperationInput for Json<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumJson::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumJson::<T>::inferred_early_responses(ctx, operation)
    }
}

impl<T> aide::OperationOutput for Json<T>
where
    T: schemars::JsonSchema + Serialize,
{
    type Inner = T;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        AxumJson::<T>::operation_response(ctx, operation)
    }

    fn inferred_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumJson::<T>::inferred_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_detail_keeps_first_line_only() {
        let detail = "missing field `title` at line 3\ncolumn 7\ntrailing";
        assert_eq!(
            clip_parser_detail(detail),
            "missing field `title` at line 3"
        );
    }

    #[test]
    fn parser_detail_is_bounded() {
        let detail = "x".repeat(500);
        assert_eq!(clip_parser_detail(&detail).len(), 200);
    }
}
