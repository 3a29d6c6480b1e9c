//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, CreateAuthor, CreateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add an author to the catalog.
    pub async fn add_author(&self, author: CreateAuthor) -> AppResult<Author> {
        let created = self.repository.authors.create(&author).await?;
        tracing::info!(id = created.id, "author added");
        Ok(created)
    }

    /// Add a book; the referenced author must exist.
    pub async fn add_book(&self, book: CreateBook) -> AppResult<Book> {
        self.repository
            .authors
            .get_by_id(book.author_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("author with id {}", book.author_id)))?;
        let created = self.repository.books.create(&book).await?;
        tracing::info!(id = created.id, "book added");
        Ok(created)
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("book with id {}", id)))
    }
}
