//! Event repository for managing event lifecycle operations.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::Pagination;
use crate::model::{Event, NewEvent, UpdateEvent};
use crate::types::{EventFilter, EventStatus};
use crate::{PgClient, PgError, PgResult, schema};

/// Repository for event database operations.
///
/// Handles event creation, invite-token lookups, public discovery with
/// filtering, and owner-scoped listings.
pub trait EventRepository {
    /// Creates a new event.
    fn create_event(&self, event: NewEvent) -> impl Future<Output = PgResult<Event>> + Send;

    /// Finds an event by its unique identifier.
    fn find_event_by_id(
        &self,
        event_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Event>>> + Send;

    /// Finds an event by its invite token.
    fn find_event_by_invite_token(
        &self,
        token: &str,
    ) -> impl Future<Output = PgResult<Option<Event>>> + Send;

    /// Updates an event with new values and refreshes its `updated_at`.
    fn update_event(
        &self,
        event_id: Uuid,
        changes: UpdateEvent,
    ) -> impl Future<Output = PgResult<Event>> + Send;

    /// Deletes an event along with its RSVPs.
    fn delete_event(&self, event_id: Uuid) -> impl Future<Output = PgResult<usize>> + Send;

    /// Lists active public events with their organizer's display name.
    ///
    /// Results are newest-first and honor the category and search filters.
    fn list_public_events(
        &self,
        filter: EventFilter,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<(Event, String)>>> + Send;

    /// Counts active public events matching the filters.
    fn count_public_events(
        &self,
        filter: EventFilter,
    ) -> impl Future<Output = PgResult<i64>> + Send;

    /// Lists all events created by the given account, newest-first.
    fn list_events_by_owner(
        &self,
        owner_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<Event>>> + Send;
}

impl EventRepository for PgClient {
    async fn create_event(&self, event: NewEvent) -> PgResult<Event> {
        use schema::events;

        let mut conn = self.get_connection().await?;

        let event = diesel::insert_into(events::table)
            .values(&event)
            .returning(Event::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(event)
    }

    async fn find_event_by_id(&self, event_id: Uuid) -> PgResult<Option<Event>> {
        use schema::events::dsl::*;

        let mut conn = self.get_connection().await?;

        let event = events
            .filter(id.eq(event_id))
            .select(Event::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(event)
    }

    async fn find_event_by_invite_token(&self, token: &str) -> PgResult<Option<Event>> {
        use schema::events::dsl::*;

        let mut conn = self.get_connection().await?;

        let event = events
            .filter(invite_token.eq(token))
            .select(Event::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(event)
    }

    async fn update_event(&self, event_id: Uuid, changes: UpdateEvent) -> PgResult<Event> {
        use schema::events::dsl::*;

        let mut conn = self.get_connection().await?;

        let event = diesel::update(events)
            .filter(id.eq(event_id))
            .set((&changes, updated_at.eq(diesel::dsl::now)))
            .returning(Event::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(event)
    }

    async fn delete_event(&self, event_id: Uuid) -> PgResult<usize> {
        use schema::events::dsl::*;

        let mut conn = self.get_connection().await?;

        let deleted_count = diesel::delete(events)
            .filter(id.eq(event_id))
            .execute(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(deleted_count)
    }

    async fn list_public_events(
        &self,
        filter: EventFilter,
        pagination: Pagination,
    ) -> PgResult<Vec<(Event, String)>> {
        use schema::{accounts, events};

        let mut conn = self.get_connection().await?;

        let mut query = events::table
            .inner_join(accounts::table)
            .filter(events::is_public.eq(true))
            .filter(events::status.eq(EventStatus::Active))
            .into_boxed();

        if let Some(category) = filter.category {
            query = query.filter(events::category.eq(category));
        }

        if let Some(term) = filter.search_term() {
            let pattern = format!("%{term}%");
            query = query.filter(
                events::title
                    .ilike(pattern.clone())
                    .or(events::description.ilike(pattern.clone()))
                    .or(events::location.ilike(pattern)),
            );
        }

        let results = query
            .select((Event::as_select(), accounts::display_name))
            .order(events::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .load(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(results)
    }

    async fn count_public_events(&self, filter: EventFilter) -> PgResult<i64> {
        use schema::events;

        let mut conn = self.get_connection().await?;

        let mut query = events::table
            .filter(events::is_public.eq(true))
            .filter(events::status.eq(EventStatus::Active))
            .into_boxed();

        if let Some(category) = filter.category {
            query = query.filter(events::category.eq(category));
        }

        if let Some(term) = filter.search_term() {
            let pattern = format!("%{term}%");
            query = query.filter(
                events::title
                    .ilike(pattern.clone())
                    .or(events::description.ilike(pattern.clone()))
                    .or(events::location.ilike(pattern)),
            );
        }

        let total = query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(total)
    }

    async fn list_events_by_owner(&self, owner_id: Uuid) -> PgResult<Vec<Event>> {
        use schema::events::dsl::*;

        let mut conn = self.get_connection().await?;

        let results = events
            .filter(created_by.eq(owner_id))
            .select(Event::as_select())
            .order(created_at.desc())
            .load(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use diesel::debug_query;
    use diesel::pg::Pg;

    use super::*;

    #[test]
    fn update_statement_refreshes_updated_at() {
        use schema::events::dsl::*;

        let changes = UpdateEvent {
            title: Some("Rooftop film night".to_owned()),
            ..UpdateEvent::default()
        };
        let statement = diesel::update(events)
            .filter(id.eq(Uuid::nil()))
            .set((&changes, updated_at.eq(diesel::dsl::now)));

        let sql = debug_query::<Pg, _>(&statement).to_string();
        assert!(sql.contains("updated_at"));
        assert!(sql.contains("CURRENT_TIMESTAMP"));
    }

    #[test]
    fn owner_listing_returns_every_row() {
        use schema::events::dsl::*;

        let statement = events
            .filter(created_by.eq(Uuid::nil()))
            .select(Event::as_select())
            .order(created_at.desc());

        let sql = debug_query::<Pg, _>(&statement).to_string();
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("OFFSET"));
    }
}
