//! Account model and related types

use sqlx::FromRow;

/// Storage namespace an account lives in. Patron and worker logins are
/// independent of each other; the same operations serve both kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Patron,
    Worker,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Patron => "patron",
            AccountKind::Worker => "worker",
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account row as stored. `password_hash` is a PHC string, never the
/// plaintext, and is never printed or logged.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: i32,
    pub login: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub name: String,
    pub birth_date: String,
    pub address: String,
    pub postal_code: String,
}

/// Personal details collected at registration, each field already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub birth_date: String,
    pub address: String,
    pub postal_code: String,
}

/// Registration request. The password is plaintext here and is hashed by
/// the accounts service before it reaches the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub login: String,
    pub password: String,
    pub profile: Profile,
}
