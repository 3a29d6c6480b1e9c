//! Registration and login for patron and worker accounts

use crate::{
    error::{AppError, AppResult},
    models::account::{Account, AccountKind, NewAccount},
    repository::AccountStore,
    security,
};

/// Failure text shared by every login rejection. An unknown login and a
/// wrong password must be indistinguishable to the operator.
pub const LOGIN_FAILED: &str = "Invalid login or password.";

#[derive(Clone)]
pub struct AccountsService<S> {
    store: S,
}

impl<S: AccountStore> AccountsService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Duplicate check feeding the registration prompt loop.
    pub async fn login_taken(&self, kind: AccountKind, login: &str) -> AppResult<bool> {
        self.store.login_exists(kind, login).await
    }

    /// Look up an account without authenticating (loan bookkeeping).
    pub async fn find_account(&self, kind: AccountKind, login: &str) -> AppResult<Option<Account>> {
        self.store.find_by_login(kind, login).await
    }

    /// Register a new account. Fields arrive validated; the duplicate check
    /// runs again here so no hash is computed for a login that cannot be
    /// stored, and the table's UNIQUE constraint settles any remaining race.
    pub async fn register(&self, kind: AccountKind, account: NewAccount) -> AppResult<i32> {
        if self.store.login_exists(kind, &account.login).await? {
            return Err(AppError::Conflict("Login already in use.".to_string()));
        }
        let password_hash = security::hash_password(&account.password)?;
        let id = self.store.create(kind, &account, &password_hash).await?;
        tracing::info!(kind = kind.as_str(), id, "account created");
        Ok(id)
    }

    /// Authenticate by login and password.
    pub async fn authenticate(
        &self,
        kind: AccountKind,
        login: &str,
        password: &str,
    ) -> AppResult<Account> {
        let Some(account) = self.store.find_by_login(kind, login).await? else {
            // keep the miss as expensive as a real verification
            security::equalize_verification_cost(password);
            return Err(AppError::Authentication(LOGIN_FAILED.to_string()));
        };
        if !security::verify_password(password, &account.password_hash) {
            return Err(AppError::Authentication(LOGIN_FAILED.to_string()));
        }
        tracing::info!(kind = kind.as_str(), id = account.id, "login ok");
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::Profile;
    use crate::repository::accounts::MockAccountStore;

    fn new_account(login: &str, password: &str) -> NewAccount {
        NewAccount {
            login: login.to_string(),
            password: password.to_string(),
            profile: Profile {
                name: "Jan Kowalski".to_string(),
                birth_date: "15/06/1990".to_string(),
                address: "Lipowa".to_string(),
                postal_code: "01-234".to_string(),
            },
        }
    }

    fn stored_account(login: &str, password_hash: String) -> Account {
        Account {
            id: 1,
            login: login.to_string(),
            password_hash,
            name: "Jan Kowalski".to_string(),
            birth_date: "15/06/1990".to_string(),
            address: "Lipowa".to_string(),
            postal_code: "01-234".to_string(),
        }
    }

    #[tokio::test]
    async fn register_hashes_before_storing() {
        let mut store = MockAccountStore::new();
        store.expect_login_exists().returning(|_, _| Ok(false));
        store
            .expect_create()
            .withf(|kind, account, hash| {
                *kind == AccountKind::Patron
                    && hash != account.password
                    && security::verify_password(&account.password, hash)
            })
            .returning(|_, _, _| Ok(7));

        let service = AccountsService::new(store);
        let id = service
            .register(AccountKind::Patron, new_account("valid_login1", "Abcdef1!"))
            .await
            .unwrap();
        assert_eq!(id, 7);
    }

    #[tokio::test]
    async fn duplicate_login_rejected_before_any_hash() {
        let mut store = MockAccountStore::new();
        store.expect_login_exists().returning(|_, _| Ok(true));
        store.expect_create().never();

        let service = AccountsService::new(store);
        let err = service
            .register(AccountKind::Worker, new_account("dupeuser1", "Abcdef1!"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn authenticate_accepts_correct_password() {
        let hash = security::hash_password("Abcdef1!").unwrap();
        let mut store = MockAccountStore::new();
        store
            .expect_find_by_login()
            .returning(move |_, login| Ok(Some(stored_account(login, hash.clone()))));

        let service = AccountsService::new(store);
        let account = service
            .authenticate(AccountKind::Patron, "valid_login1", "Abcdef1!")
            .await
            .unwrap();
        assert_eq!(account.login, "valid_login1");
    }

    #[tokio::test]
    async fn unknown_login_and_wrong_password_read_the_same() {
        let hash = security::hash_password("Abcdef1!").unwrap();
        let mut known = MockAccountStore::new();
        known
            .expect_find_by_login()
            .returning(move |_, login| Ok(Some(stored_account(login, hash.clone()))));
        let mut unknown = MockAccountStore::new();
        unknown.expect_find_by_login().returning(|_, _| Ok(None));

        let wrong_password = AccountsService::new(known)
            .authenticate(AccountKind::Worker, "valid_login1", "Wrongpw1!")
            .await
            .unwrap_err();
        let no_account = AccountsService::new(unknown)
            .authenticate(AccountKind::Worker, "ghost_login", "Wrongpw1!")
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), LOGIN_FAILED);
        assert_eq!(no_account.to_string(), LOGIN_FAILED);
    }
}
