//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::author::{Author, CreateAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        let created = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (name, birth_date)
            VALUES ($1, $2)
            RETURNING id, name, birth_date
            "#,
        )
        .bind(&author.name)
        .bind(&author.birth_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(author)
    }
}
