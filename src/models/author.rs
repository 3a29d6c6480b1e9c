//! Author model and related types

use sqlx::FromRow;

/// Author row from the catalog.
#[derive(Debug, Clone, FromRow)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub birth_date: String,
}

/// Create author request
#[derive(Debug, Clone)]
pub struct CreateAuthor {
    pub name: String,
    pub birth_date: String,
}
