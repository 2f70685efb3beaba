//! RSVP handlers for submitting and managing event responses.
//!
//! Submissions are upserts keyed on (event, account). After every committed
//! change the event's tally is recomputed and a notice is published to the
//! event's broadcast room on a best-effort basis.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use gatherly_postgres::PgClient;
use gatherly_postgres::model::{Event, Rsvp};
use gatherly_postgres::query::{AccountRepository, EventRepository, RsvpRepository};
use gatherly_postgres::types::RsvpResponse;
use uuid::Uuid;

use crate::extract::{AuthState, Json, Path, ValidateJson};
use crate::handler::request::{EventPathParams, SubmitRsvp};
use crate::handler::response::{Envelope, ErrorResponse, RsvpDetails};
use crate::handler::{ErrorKind, Result};
use crate::service::{EventRooms, RsvpNotice, ServiceState};

/// Tracing target for RSVP operations.
const TRACING_TARGET: &str = "gatherly_server::handler::rsvps";

/// Submits or changes the caller's RSVP for an event.
#[tracing::instrument(skip_all, fields(
    account_id = %auth_claims.account_id,
    event_id = %path_params.event_id,
))]
async fn submit_rsvp(
    State(pg_client): State<PgClient>,
    State(rooms): State<EventRooms>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<EventPathParams>,
    ValidateJson(request): ValidateJson<SubmitRsvp>,
) -> Result<(StatusCode, Json<Envelope<RsvpDetails>>)> {
    tracing::debug!(target: TRACING_TARGET, "Submitting RSVP");

    let event = find_event(&pg_client, path_params.event_id).await?;

    if !event.accepts_rsvps() {
        return Err(ErrorKind::InvalidState
            .with_message("Event is no longer accepting RSVPs.")
            .with_resource("event"));
    }

    let prior = pg_client
        .find_rsvp(event.id, auth_claims.account_id)
        .await?;
    let is_new = prior.is_none();

    let rsvp = pg_client
        .upsert_rsvp(request.into_model(event.id, auth_claims.account_id, prior.as_ref()))
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        rsvp_id = %rsvp.id,
        response = %rsvp.response,
        is_new = is_new,
        "RSVP recorded"
    );

    let response = Some(rsvp.response);
    let details = rsvp_details(&pg_client, event, rsvp).await?;
    let envelope = publish_notice(&pg_client, &rooms, &details, response).await?;

    let status = if is_new {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(envelope)))
}

fn submit_rsvp_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Submit RSVP")
        .description(
            "Submits or changes the caller's RSVP. Omitted fields keep their previous values. \
             The stored RSVP is returned with the responder's display fields and the event's \
             title, date and location.",
        )
        .response::<200, Json<Envelope<RsvpDetails>>>()
        .response::<201, Json<Envelope<RsvpDetails>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns all RSVPs for an event with the aggregated tally.
#[tracing::instrument(skip_all, fields(event_id = %path_params.event_id))]
async fn list_event_rsvps(
    State(pg_client): State<PgClient>,
    Path(path_params): Path<EventPathParams>,
) -> Result<(StatusCode, Json<Envelope<Vec<RsvpDetails>>>)> {
    let event = find_event(&pg_client, path_params.event_id).await?;

    let rsvps = pg_client.list_event_rsvps(event.id).await?;
    let tally = pg_client.tally_event_rsvps(event.id).await?;

    let rsvps: Vec<_> = rsvps.into_iter().map(RsvpDetails::from_responder).collect();

    tracing::debug!(
        target: TRACING_TARGET,
        rsvp_count = rsvps.len(),
        "Event RSVPs listed"
    );

    let count = rsvps.len() as i64;
    let response = Envelope::new(rsvps).with_count(count).with_stats(tally);
    Ok((StatusCode::OK, Json(response)))
}

fn list_event_rsvps_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List event RSVPs")
        .description("Returns all RSVPs for an event, newest first, with the tally.")
        .response::<200, Json<Envelope<Vec<RsvpDetails>>>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns the caller's RSVP for an event.
#[tracing::instrument(skip_all, fields(
    account_id = %auth_claims.account_id,
    event_id = %path_params.event_id,
))]
async fn get_my_rsvp(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<EventPathParams>,
) -> Result<(StatusCode, Json<Envelope<RsvpDetails>>)> {
    let rsvp = pg_client
        .find_rsvp(path_params.event_id, auth_claims.account_id)
        .await?
        .ok_or_else(|| {
            ErrorKind::NotFound
                .with_message("You have not responded to this event.")
                .with_resource("rsvp")
        })?;

    let response = Envelope::new(RsvpDetails::from_model(rsvp));
    Ok((StatusCode::OK, Json(response)))
}

fn get_my_rsvp_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get own RSVP")
        .description("Returns the caller's RSVP for an event.")
        .response::<200, Json<Envelope<RsvpDetails>>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns all of the caller's RSVPs across events.
#[tracing::instrument(skip_all, fields(account_id = %auth_claims.account_id))]
async fn list_my_rsvps(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
) -> Result<(StatusCode, Json<Envelope<Vec<RsvpDetails>>>)> {
    let rsvps = pg_client
        .list_account_rsvps(auth_claims.account_id)
        .await?;

    let rsvps: Vec<_> = rsvps
        .into_iter()
        .map(RsvpDetails::from_account_listing)
        .collect();

    tracing::debug!(
        target: TRACING_TARGET,
        rsvp_count = rsvps.len(),
        "Own RSVPs listed"
    );

    let count = rsvps.len() as i64;
    let response = Envelope::new(rsvps).with_count(count);
    Ok((StatusCode::OK, Json(response)))
}

fn list_my_rsvps_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List own RSVPs")
        .description(
            "Returns all of the caller's RSVPs, newest first, each joined with the \
             event's title, date and location and the organizer's name.",
        )
        .response::<200, Json<Envelope<Vec<RsvpDetails>>>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Withdraws the caller's RSVP for an event.
#[tracing::instrument(skip_all, fields(
    account_id = %auth_claims.account_id,
    event_id = %path_params.event_id,
))]
async fn delete_rsvp(
    State(pg_client): State<PgClient>,
    State(rooms): State<EventRooms>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<EventPathParams>,
) -> Result<StatusCode> {
    tracing::debug!(target: TRACING_TARGET, "Withdrawing RSVP");

    let event = find_event(&pg_client, path_params.event_id).await?;
    let rsvp = pg_client
        .find_rsvp(path_params.event_id, auth_claims.account_id)
        .await?
        .ok_or_else(|| {
            ErrorKind::NotFound
                .with_message("You have not responded to this event.")
                .with_resource("rsvp")
        })?;

    pg_client
        .delete_rsvp(rsvp.event_id, rsvp.account_id)
        .await?;

    tracing::info!(target: TRACING_TARGET, "RSVP withdrawn");

    // Best-effort withdrawal notice to the event's room
    let details = rsvp_details(&pg_client, event, rsvp).await?;
    publish_notice(&pg_client, &rooms, &details, None).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn delete_rsvp_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Withdraw RSVP")
        .description("Deletes the caller's RSVP for an event.")
        .response_with::<204, (), _>(|res| res.description("RSVP withdrawn."))
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Finds an event by ID or returns a NotFound error.
async fn find_event(pg_client: &PgClient, event_id: Uuid) -> Result<Event> {
    pg_client.find_event_by_id(event_id).await?.ok_or_else(|| {
        ErrorKind::NotFound
            .with_message("Event not found.")
            .with_resource("event")
    })
}

/// Joins the responder's display fields and the event's summary columns onto
/// an RSVP payload.
async fn rsvp_details(pg_client: &PgClient, event: Event, rsvp: Rsvp) -> Result<RsvpDetails> {
    let responder = pg_client.find_account_by_id(rsvp.account_id).await?;

    let mut details = RsvpDetails::from_model(rsvp).with_event(event);
    if let Some(responder) = responder {
        details = details.with_responder(responder.display_name, responder.email_address);
    }

    Ok(details)
}

/// Recomputes the tally and publishes a notice to the event's room.
///
/// Publishing never fails the request, a room without subscribers simply
/// drops the notice.
async fn publish_notice(
    pg_client: &PgClient,
    rooms: &EventRooms,
    details: &RsvpDetails,
    response: Option<RsvpResponse>,
) -> Result<Envelope<RsvpDetails>> {
    let tally = pg_client.tally_event_rsvps(details.event_id).await?;

    let delivered = rooms.publish(RsvpNotice {
        event_id: details.event_id,
        account_id: details.account_id,
        display_name: details.responder_name.clone().unwrap_or_default(),
        response,
        tally,
        timestamp: jiff::Timestamp::now(),
    });

    tracing::trace!(
        target: TRACING_TARGET,
        event_id = %details.event_id,
        delivered = delivered,
        "RSVP notice published"
    );

    Ok(Envelope::new(details.clone()).with_stats(tally))
}

/// Returns a [`Router`] with all RSVP-related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/rsvp/my-rsvps", get_with(list_my_rsvps, list_my_rsvps_docs))
        .api_route(
            "/rsvp/{eventId}",
            post_with(submit_rsvp, submit_rsvp_docs)
                .get_with(list_event_rsvps, list_event_rsvps_docs)
                .delete_with(delete_rsvp, delete_rsvp_docs),
        )
        .api_route(
            "/rsvp/{eventId}/my-response",
            get_with(get_my_rsvp, get_my_rsvp_docs),
        )
        .with_path_items(|item| item.tag("RSVPs"))
}
