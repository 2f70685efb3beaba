//! JSON extractor that validates the body after deserializing it.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// JSON body extractor that runs `validator` rules before the handler sees
/// the value.
///
/// Used for every mutating request body (registration, event creation and
/// updates, RSVP submission). Rule failures become a single [`BadRequest`]
/// whose message lists each offending field.
///
/// [`BadRequest`]: ErrorKind::BadRequest
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        body.validate()?;
        Ok(Self(body))
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| describe(field, error))
            })
            .collect();
        messages.sort();

        let message = if messages.is_empty() {
            "Validation failed".to_owned()
        } else {
            messages.join(". ")
        };

        tracing::warn!(errors = ?errors.field_errors(), "Request validation failed");

        ErrorKind::BadRequest
            .with_message(message)
            .with_resource("request")
    }
}

/// Turns one rule failure into a client-facing sentence.
///
/// Handles the rules the request types actually declare: `length` on titles,
/// descriptions, names, passwords and RSVP messages, `range` on `plusOnes`
/// and capacities, `email`, and custom rules carrying their own message
/// (such as the date-not-in-past check).
fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return format!("Field '{field}': {message}");
    }

    match error.code.as_ref() {
        "length" => bounds_sentence(field, &error.params, "characters"),
        "range" => bounds_sentence(field, &error.params, ""),
        "email" => format!("Field '{field}' must be a valid email address"),
        code => format!("Field '{field}' failed the '{code}' rule"),
    }
}

/// Renders a min/max pair as a sentence, with an optional unit suffix.
fn bounds_sentence(
    field: &str,
    params: &HashMap<Cow<'static, str>, serde_json::Value>,
    unit: &str,
) -> String {
    let bound = |key: &str| params.get(key).and_then(serde_json::Value::as_f64);
    let suffix = if unit.is_empty() {
        String::new()
    } else {
        format!(" {unit}")
    };

    match (bound("min"), bound("max")) {
        (Some(min), Some(max)) => {
            format!("Field '{field}' must be between {min} and {max}{suffix}")
        }
        (Some(min), None) => format!("Field '{field}' must be at least {min}{suffix}"),
        (None, Some(max)) => format!("Field '{field}' must be at most {max}{suffix}"),
        (None, None) => format!("Field '{field}' is out of bounds"),
    }
}

impl<T> aide::OperationInput for ValidateJson<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        Json::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        Json::<T>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Debug, Validate, serde::Deserialize)]
    struct SampleBody {
        #[validate(length(min = 3, max = 100))]
        title: String,
        #[validate(range(min = 0, max = 10))]
        plus_ones: i32,
    }

    #[test]
    fn length_failure_names_the_field_and_bounds() {
        let body = SampleBody {
            title: "ab".to_owned(),
            plus_ones: 0,
        };
        let error: Error<'static> = body.validate().unwrap_err().into();

        let message = error.message().unwrap_or_default();
        assert!(message.contains("'title'"));
        assert!(message.contains("between 3 and 100 characters"));
    }

    #[test]
    fn multiple_failures_are_joined() {
        let body = SampleBody {
            title: String::new(),
            plus_ones: 99,
        };
        let error: Error<'static> = body.validate().unwrap_err().into();

        let message = error.message().unwrap_or_default();
        assert!(message.contains("'title'"));
        assert!(message.contains("'plus_ones'"));
    }
}
