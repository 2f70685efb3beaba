//! Event management handlers for CRUD operations.
//!
//! Public listings only surface active, public events. Mutations are
//! restricted to the event owner.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use gatherly_postgres::PgClient;
use gatherly_postgres::model::Event;
use gatherly_postgres::query::{AccountRepository, EventRepository, RsvpRepository};
use uuid::Uuid;

use crate::extract::{AuthState, Json, Path, Query, ValidateJson};
use crate::handler::request::{
    CreateEvent, EventPathParams, InviteTokenPathParams, ListEvents, UpdateEventRequest,
};
use crate::handler::response::{Envelope, ErrorResponse, EventDetails};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for event operations.
const TRACING_TARGET: &str = "gatherly_server::handler::events";

/// Creates a new event owned by the caller.
#[tracing::instrument(skip_all, fields(account_id = %auth_claims.account_id))]
async fn post_event(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    ValidateJson(request): ValidateJson<CreateEvent>,
) -> Result<(StatusCode, Json<Envelope<EventDetails>>)> {
    tracing::debug!(target: TRACING_TARGET, "Creating event");

    let invite_token = Uuid::new_v4().to_string();
    let event = pg_client
        .create_event(request.into_model(auth_claims.account_id, invite_token))
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        event_id = %event.id,
        "Event created"
    );

    let response = Envelope::new(EventDetails::from_model(event))
        .with_message("Event created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

fn post_event_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create event")
        .description("Creates a new event owned by the authenticated account.")
        .response::<201, Json<Envelope<EventDetails>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns a single event with its organizer and RSVP tally.
#[tracing::instrument(skip_all, fields(event_id = %path_params.event_id))]
async fn get_event(
    State(pg_client): State<PgClient>,
    Path(path_params): Path<EventPathParams>,
) -> Result<(StatusCode, Json<Envelope<EventDetails>>)> {
    let event = find_event(&pg_client, path_params.event_id).await?;
    let response = event_with_details(&pg_client, event).await?;

    Ok((StatusCode::OK, Json(response)))
}

fn get_event_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get event")
        .description("Returns an event with its organizer and RSVP tally.")
        .response::<200, Json<Envelope<EventDetails>>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns a single event resolved through its invite token.
#[tracing::instrument(skip_all)]
async fn get_event_by_invite_token(
    State(pg_client): State<PgClient>,
    Path(path_params): Path<InviteTokenPathParams>,
) -> Result<(StatusCode, Json<Envelope<EventDetails>>)> {
    let event = pg_client
        .find_event_by_invite_token(&path_params.invite_token)
        .await?
        .ok_or_else(|| {
            ErrorKind::NotFound
                .with_message("Event not found.")
                .with_resource("event")
        })?;

    let response = event_with_details(&pg_client, event).await?;
    Ok((StatusCode::OK, Json(response)))
}

fn get_event_by_invite_token_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get event by invite token")
        .description("Returns an event resolved through its shareable invite token.")
        .response::<200, Json<Envelope<EventDetails>>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Partially updates an event.
#[tracing::instrument(skip_all, fields(
    account_id = %auth_claims.account_id,
    event_id = %path_params.event_id,
))]
async fn update_event(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<EventPathParams>,
    ValidateJson(request): ValidateJson<UpdateEventRequest>,
) -> Result<(StatusCode, Json<Envelope<EventDetails>>)> {
    tracing::debug!(target: TRACING_TARGET, "Updating event");

    let event = find_event(&pg_client, path_params.event_id).await?;

    if !event.is_owned_by(auth_claims.account_id) {
        return Err(ErrorKind::Forbidden
            .with_message("Only the event organizer can update this event.")
            .with_resource("event"));
    }

    let changes = request.into_changes();
    if changes.is_empty() {
        return Err(ErrorKind::BadRequest
            .with_message("At least one field must be provided.")
            .with_resource("event"));
    }

    let event = pg_client.update_event(path_params.event_id, changes).await?;

    tracing::info!(target: TRACING_TARGET, "Event updated");

    let response = Envelope::new(EventDetails::from_model(event))
        .with_message("Event updated successfully");
    Ok((StatusCode::OK, Json(response)))
}

fn update_event_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update event")
        .description("Partially updates an event. Restricted to the organizer.")
        .response::<200, Json<Envelope<EventDetails>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Deletes an event and all of its RSVPs.
#[tracing::instrument(skip_all, fields(
    account_id = %auth_claims.account_id,
    event_id = %path_params.event_id,
))]
async fn delete_event(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<EventPathParams>,
) -> Result<StatusCode> {
    tracing::debug!(target: TRACING_TARGET, "Deleting event");

    let event = find_event(&pg_client, path_params.event_id).await?;

    if !event.is_owned_by(auth_claims.account_id) {
        return Err(ErrorKind::Forbidden
            .with_message("Only the event organizer can delete this event.")
            .with_resource("event"));
    }

    pg_client.delete_event(path_params.event_id).await?;

    tracing::info!(target: TRACING_TARGET, "Event deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn delete_event_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete event")
        .description("Deletes an event and its RSVPs. Restricted to the organizer.")
        .response_with::<204, (), _>(|res| res.description("Event deleted."))
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns public, active events with optional filtering.
#[tracing::instrument(skip_all)]
async fn list_events(
    State(pg_client): State<PgClient>,
    Query(request): Query<ListEvents>,
) -> Result<(StatusCode, Json<Envelope<Vec<EventDetails>>>)> {
    let filter = request.filter();
    let pagination = request.pagination().into();

    let events = pg_client
        .list_public_events(filter.clone(), pagination)
        .await?;
    let total = pg_client.count_public_events(filter).await?;

    let events: Vec<_> = events.into_iter().map(EventDetails::from_joined).collect();

    tracing::debug!(
        target: TRACING_TARGET,
        event_count = events.len(),
        total = total,
        "Events listed"
    );

    let count = events.len() as i64;
    let response = Envelope::new(events).with_count(count).with_total(total);
    Ok((StatusCode::OK, Json(response)))
}

fn list_events_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List events")
        .description(
            "Returns active public events with optional category filter and text search.",
        )
        .response::<200, Json<Envelope<Vec<EventDetails>>>>()
        .response::<400, Json<ErrorResponse>>()
}

/// Returns all events owned by the caller.
#[tracing::instrument(skip_all, fields(account_id = %auth_claims.account_id))]
async fn list_my_events(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
) -> Result<(StatusCode, Json<Envelope<Vec<EventDetails>>>)> {
    let events = pg_client
        .list_events_by_owner(auth_claims.account_id)
        .await?;

    let events: Vec<_> = events.into_iter().map(EventDetails::from_model).collect();

    tracing::debug!(
        target: TRACING_TARGET,
        event_count = events.len(),
        "Own events listed"
    );

    let count = events.len() as i64;
    let response = Envelope::new(events).with_count(count);
    Ok((StatusCode::OK, Json(response)))
}

fn list_my_events_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List own events")
        .description("Returns all events owned by the authenticated account, any status.")
        .response::<200, Json<Envelope<Vec<EventDetails>>>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Finds an event by ID or returns a NotFound error.
async fn find_event(pg_client: &PgClient, event_id: Uuid) -> Result<Event> {
    pg_client.find_event_by_id(event_id).await?.ok_or_else(|| {
        ErrorKind::NotFound
            .with_message("Event not found.")
            .with_resource("event")
    })
}

/// Joins the organizer's name and the RSVP tally onto an event payload.
async fn event_with_details(
    pg_client: &PgClient,
    event: Event,
) -> Result<Envelope<EventDetails>> {
    let tally = pg_client.tally_event_rsvps(event.id).await?;

    let organizer = pg_client.find_account_by_id(event.created_by).await?;
    let mut details = EventDetails::from_model(event);
    if let Some(organizer) = organizer {
        details = details.with_organizer(organizer.display_name);
    }

    Ok(Envelope::new(details).with_stats(tally))
}

/// Returns a [`Router`] with all event-related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/events",
            post_with(post_event, post_event_docs).get_with(list_events, list_events_docs),
        )
        .api_route(
            "/events/my-events",
            get_with(list_my_events, list_my_events_docs),
        )
        .api_route(
            "/events/invite/{inviteToken}",
            get_with(get_event_by_invite_token, get_event_by_invite_token_docs),
        )
        .api_route(
            "/events/{eventId}",
            get_with(get_event, get_event_docs)
                .put_with(update_event, update_event_docs)
                .delete_with(delete_event, delete_event_docs),
        )
        .with_path_items(|item| item.tag("Events"))
}
