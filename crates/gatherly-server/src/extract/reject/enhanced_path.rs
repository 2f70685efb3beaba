//! Path parameter extractor that rejects with the API error envelope.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Path parameter extractor.
///
/// Wraps [`axum::extract::Path`] so that a bad `{eventId}` or
/// `{inviteToken}` segment produces the API's uniform error response with a
/// usable hint instead of axum's default rejection.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = <AxumPath<T> as FromRequestParts<S>>::from_request_parts(parts, state).await;
        path.map(|AxumPath(params)| Self(params)).map_err(Into::into)
    }
}

impl From<PathRejection> for Error<'static> {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(source) => {
                let detail = source.to_string();
                ErrorKind::BadRequest
                    .with_message("Invalid path parameter")
                    .with_context(format!("{}. {}", clip(&detail), hint_for(&detail)))
            }
            PathRejection::MissingPathParams(source) => ErrorKind::MissingPathParam
                .with_message("Required path parameter missing")
                .with_context(clip(&source.to_string())),
            _ => ErrorKind::InternalServerError.with_message("Path parameter processing failed"),
        }
    }
}

/// Picks a format hint matching the parameter type that failed to parse.
///
/// Event and account identifiers are UUIDs while invite tokens are opaque
/// strings, so UUID parse failures dominate in practice.
fn hint_for(detail: &str) -> &'static str {
    let detail = detail.to_lowercase();

    if detail.contains("uuid") || detail.contains("invalid character") {
        "Identifiers use the canonical UUID form, e.g. 0195b3e2-9c40-7d33-a1f4-d70b2c3f6a21"
    } else if detail.contains("invalid digit") || detail.contains("cannot parse") {
        "Numeric parameters accept digits only"
    } else {
        "Check the parameter against the route's expected format"
    }
}

/// Bounds the parser detail echoed back to the client.
fn clip(detail: &str) -> String {
    detail
        .lines()
        .next()
        .unwrap_or_default()
        .chars()
        .take(150)
        .collect()
}

impl<T> aide::OperationInput for Path<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumPath::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumPath::<T>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_failures_get_a_uuid_hint() {
        let hint = hint_for("Invalid UUID: expected 32 hex digits");
        assert!(hint.contains("UUID"));
    }

    #[test]
    fn unknown_failures_get_the_generic_hint() {
        let hint = hint_for("something unexpected");
        assert!(hint.contains("expected format"));
    }
}
