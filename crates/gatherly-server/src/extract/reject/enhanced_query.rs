//! Query string extractor that rejects with the API error envelope.

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query as AxumQuery};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Query string extractor.
///
/// Wraps [`axum::extract::Query`] for the discovery filters (`category`,
/// `search`, `page`, `limit`) so that an unparsable query string yields the
/// uniform error response, naming the offending parameter when serde's
/// message allows it.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Query<T>(pub T);

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let query = AxumQuery::<T>::from_request_parts(parts, state).await;
        query
            .map(|AxumQuery(params)| Self(params))
            .map_err(Into::into)
    }
}

impl From<QueryRejection> for Error<'static> {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(
            target: "gatherly_server::extract::query",
            error = %rejection,
            "Query string parsing failed"
        );

        match rejection {
            QueryRejection::FailedToDeserializeQueryString(source) => {
                let detail = source.to_string();
                let parameter = backticked_name(&detail).unwrap_or("unknown");

                if detail.contains("missing field") {
                    ErrorKind::BadRequest
                        .with_message("Missing required query parameter")
                        .with_context(format!("The query parameter '{parameter}' is required"))
                } else if detail.contains("duplicate field") {
                    ErrorKind::BadRequest
                        .with_message("Duplicate query parameter")
                        .with_context(format!(
                            "The query parameter '{parameter}' may appear only once"
                        ))
                } else {
                    ErrorKind::BadRequest
                        .with_message("Invalid query parameters")
                        .with_context(detail)
                }
            }
            _ => ErrorKind::BadRequest.with_message("The query string could not be parsed"),
        }
    }
}

/// Pulls the first backtick-quoted name out of a serde error message.
fn backticked_name(detail: &str) -> Option<&str> {
    let start = detail.find('`')? + 1;
    let end = detail[start..].find('`')?;
    Some(&detail[start..start + end])
}

impl<T> aide::OperationInput for Query<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumQuery::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumQuery::<T>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backticked_names_are_extracted() {
        assert_eq!(
            backticked_name("missing field `category`"),
            Some("category")
        );
        assert_eq!(backticked_name("no quoting here"), None);
    }
}
