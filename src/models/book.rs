//! Book model and related types

use sqlx::FromRow;

/// Book row from the catalog.
#[derive(Debug, Clone, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub pages: i32,
    pub author_id: i32,
}

/// Create book request
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub title: String,
    pub pages: i32,
    pub author_id: i32,
}
