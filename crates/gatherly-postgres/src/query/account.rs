//! Account repository for authentication and profile operations.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{Account, NewAccount, UpdateAccount};
use crate::{PgClient, PgError, PgResult, schema};

/// Repository for account database operations.
///
/// Covers registration, credential lookup and profile updates.
pub trait AccountRepository {
    /// Creates a new account.
    fn create_account(&self, account: NewAccount) -> impl Future<Output = PgResult<Account>> + Send;

    /// Finds an account by its unique identifier.
    fn find_account_by_id(
        &self,
        account_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Finds an account by its email address.
    ///
    /// The lookup is case-insensitive, matching the uniqueness the database
    /// enforces on the column.
    fn find_account_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Updates an account with new profile values.
    fn update_account(
        &self,
        account_id: Uuid,
        changes: UpdateAccount,
    ) -> impl Future<Output = PgResult<Account>> + Send;

    /// Returns whether an account with the given identifier exists.
    fn account_exists(&self, account_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;
}

impl AccountRepository for PgClient {
    async fn create_account(&self, account: NewAccount) -> PgResult<Account> {
        use schema::accounts;

        let mut conn = self.get_connection().await?;

        let account = diesel::insert_into(accounts::table)
            .values(&account)
            .returning(Account::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(account)
    }

    async fn find_account_by_id(&self, account_id: Uuid) -> PgResult<Option<Account>> {
        use schema::accounts::dsl::*;

        let mut conn = self.get_connection().await?;

        let account = accounts
            .filter(id.eq(account_id))
            .select(Account::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(account)
    }

    async fn find_account_by_email(&self, email: &str) -> PgResult<Option<Account>> {
        use schema::accounts::dsl::*;

        let mut conn = self.get_connection().await?;

        let account = accounts
            .filter(email_address.ilike(email))
            .select(Account::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(account)
    }

    async fn update_account(&self, account_id: Uuid, changes: UpdateAccount) -> PgResult<Account> {
        use schema::accounts::dsl::*;

        let mut conn = self.get_connection().await?;

        let account = diesel::update(accounts)
            .filter(id.eq(account_id))
            .set(&changes)
            .returning(Account::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(account)
    }

    async fn account_exists(&self, account_id: Uuid) -> PgResult<bool> {
        use schema::accounts::dsl::*;

        let mut conn = self.get_connection().await?;

        let found = accounts
            .filter(id.eq(account_id))
            .select(id)
            .first::<Uuid>(&mut conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(found.is_some())
    }
}
