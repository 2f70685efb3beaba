//! RSVP repository for attendance responses and tallies.

use std::future::Future;

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{AccountDisplay, EventSummary, NewRsvp, Rsvp};
use crate::types::{RsvpResponse, RsvpTally};
use crate::{PgClient, PgError, PgResult, schema};

/// Repository for RSVP database operations.
///
/// Submissions go through an upsert keyed on `(event_id, account_id)`, so a
/// repeat submission from the same account replaces the earlier response
/// rather than adding a second row.
pub trait RsvpRepository {
    /// Creates or replaces an account's RSVP for an event.
    ///
    /// Concurrent submissions for the same pair serialize on the unique
    /// index; the last write wins.
    fn upsert_rsvp(&self, rsvp: NewRsvp) -> impl Future<Output = PgResult<Rsvp>> + Send;

    /// Finds a specific account's RSVP for an event.
    fn find_rsvp(
        &self,
        event_id: Uuid,
        account_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Rsvp>>> + Send;

    /// Lists all RSVPs for an event with responder display fields, newest
    /// update first.
    fn list_event_rsvps(
        &self,
        event_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<(Rsvp, AccountDisplay)>>> + Send;

    /// Lists all of an account's RSVPs, each joined with the event's
    /// title, date and location plus the organizer's display name.
    fn list_account_rsvps(
        &self,
        account_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<(Rsvp, EventSummary, String)>>> + Send;

    /// Deletes an account's RSVP for an event.
    fn delete_rsvp(
        &self,
        event_id: Uuid,
        account_id: Uuid,
    ) -> impl Future<Output = PgResult<usize>> + Send;

    /// Computes the per-response tally for an event.
    fn tally_event_rsvps(
        &self,
        event_id: Uuid,
    ) -> impl Future<Output = PgResult<RsvpTally>> + Send;
}

impl RsvpRepository for PgClient {
    async fn upsert_rsvp(&self, rsvp: NewRsvp) -> PgResult<Rsvp> {
        use schema::rsvps;

        let mut conn = self.get_connection().await?;

        let rsvp = diesel::insert_into(rsvps::table)
            .values(&rsvp)
            .on_conflict((rsvps::event_id, rsvps::account_id))
            .do_update()
            .set((
                rsvps::response.eq(diesel::upsert::excluded(rsvps::response)),
                rsvps::message.eq(diesel::upsert::excluded(rsvps::message)),
                rsvps::plus_ones.eq(diesel::upsert::excluded(rsvps::plus_ones)),
                rsvps::updated_at.eq(diesel::dsl::now),
            ))
            .returning(Rsvp::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(rsvp)
    }

    async fn find_rsvp(&self, event: Uuid, account: Uuid) -> PgResult<Option<Rsvp>> {
        use schema::rsvps::dsl::*;

        let mut conn = self.get_connection().await?;

        let rsvp = rsvps
            .filter(event_id.eq(event))
            .filter(account_id.eq(account))
            .select(Rsvp::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(rsvp)
    }

    async fn list_event_rsvps(&self, event: Uuid) -> PgResult<Vec<(Rsvp, AccountDisplay)>> {
        use schema::{accounts, rsvps};

        let mut conn = self.get_connection().await?;

        let results = rsvps::table
            .inner_join(accounts::table)
            .filter(rsvps::event_id.eq(event))
            .select((Rsvp::as_select(), AccountDisplay::as_select()))
            .order(rsvps::updated_at.desc())
            .load(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(results)
    }

    async fn list_account_rsvps(
        &self,
        account: Uuid,
    ) -> PgResult<Vec<(Rsvp, EventSummary, String)>> {
        use schema::{accounts, events, rsvps};

        let mut conn = self.get_connection().await?;

        let results = rsvps::table
            .inner_join(events::table.inner_join(accounts::table))
            .filter(rsvps::account_id.eq(account))
            .select((
                Rsvp::as_select(),
                EventSummary::as_select(),
                accounts::display_name,
            ))
            .order(rsvps::updated_at.desc())
            .load(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(results)
    }

    async fn delete_rsvp(&self, event: Uuid, account: Uuid) -> PgResult<usize> {
        use schema::rsvps::dsl::*;

        let mut conn = self.get_connection().await?;

        let deleted_count = diesel::delete(rsvps)
            .filter(event_id.eq(event))
            .filter(account_id.eq(account))
            .execute(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(deleted_count)
    }

    async fn tally_event_rsvps(&self, event: Uuid) -> PgResult<RsvpTally> {
        use schema::rsvps::dsl::*;

        let mut conn = self.get_connection().await?;

        let counts: Vec<(RsvpResponse, i64)> = rsvps
            .filter(event_id.eq(event))
            .group_by(response)
            .select((response, count_star()))
            .load(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(RsvpTally::from_counts(&counts))
    }
}

#[cfg(test)]
mod tests {
    use diesel::debug_query;
    use diesel::pg::Pg;

    use super::*;

    #[test]
    fn event_listing_selects_responder_display_fields() {
        use schema::{accounts, rsvps};

        let statement = rsvps::table
            .inner_join(accounts::table)
            .filter(rsvps::event_id.eq(Uuid::nil()))
            .select((Rsvp::as_select(), AccountDisplay::as_select()))
            .order(rsvps::updated_at.desc());

        let sql = debug_query::<Pg, _>(&statement).to_string();
        assert!(sql.contains("display_name"));
        assert!(sql.contains("email_address"));
    }

    #[test]
    fn account_listing_joins_event_and_organizer_without_limit() {
        use schema::{accounts, events, rsvps};

        let statement = rsvps::table
            .inner_join(events::table.inner_join(accounts::table))
            .filter(rsvps::account_id.eq(Uuid::nil()))
            .select((
                Rsvp::as_select(),
                EventSummary::as_select(),
                accounts::display_name,
            ))
            .order(rsvps::updated_at.desc());

        let sql = debug_query::<Pg, _>(&statement).to_string();
        assert!(sql.contains("title"));
        assert!(sql.contains("event_date"));
        assert!(sql.contains("location"));
        assert!(!sql.contains("LIMIT"));
    }
}
