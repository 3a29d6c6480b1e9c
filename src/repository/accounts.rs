//! Accounts repository: patron and worker credential storage

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::account::{Account, AccountKind, NewAccount},
};

/// Data-access handle the accounts service works through. A trait so
/// registration and login logic can be exercised without a database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_login(&self, kind: AccountKind, login: &str) -> AppResult<Option<Account>>;

    async fn login_exists(&self, kind: AccountKind, login: &str) -> AppResult<bool>;

    /// Insert a new account; `password_hash` is already computed.
    async fn create(
        &self,
        kind: AccountKind,
        account: &NewAccount,
        password_hash: &str,
    ) -> AppResult<i32>;
}

#[derive(Clone)]
pub struct AccountsRepository {
    pool: Pool<Postgres>,
}

impl AccountsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Table backing each account namespace.
fn table(kind: AccountKind) -> &'static str {
    match kind {
        AccountKind::Patron => "patrons",
        AccountKind::Worker => "workers",
    }
}

#[async_trait]
impl AccountStore for AccountsRepository {
    async fn find_by_login(&self, kind: AccountKind, login: &str) -> AppResult<Option<Account>> {
        let account =
            sqlx::query_as::<_, Account>(&format!("SELECT * FROM {} WHERE login = $1", table(kind)))
                .bind(login)
                .fetch_optional(&self.pool)
                .await?;
        Ok(account)
    }

    async fn login_exists(&self, kind: AccountKind, login: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE login = $1)",
            table(kind)
        ))
        .bind(login)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn create(
        &self,
        kind: AccountKind,
        account: &NewAccount,
        password_hash: &str,
    ) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(&format!(
            r#"
            INSERT INTO {} (login, password, name, birth_date, address, postal_code)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
            table(kind)
        ))
        .bind(&account.login)
        .bind(password_hash)
        .bind(&account.profile.name)
        .bind(&account.profile.birth_date)
        .bind(&account.profile.address)
        .bind(&account.profile.postal_code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // the UNIQUE constraint settles the check-then-insert race
            let duplicate = e
                .as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false);
            if duplicate {
                AppError::Conflict("Login already in use.".to_string())
            } else {
                AppError::Database(e)
            }
        })?;
        Ok(id)
    }
}
