//! Loan management service

use crate::{
    error::{AppError, AppResult},
    models::{CreateLoan, Loan, LoanRecord},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record a loan handed out by a worker. The book must exist; the loan
    /// date arrives validated by the prompt loop.
    pub async fn create_loan(&self, loan: CreateLoan) -> AppResult<Loan> {
        self.repository
            .books
            .get_by_id(loan.book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("book with id {}", loan.book_id)))?;
        let created = self.repository.loans.create(&loan).await?;
        tracing::info!(id = created.id, book_id = created.book_id, "loan recorded");
        Ok(created)
    }

    /// Close a loan by stamping its return date.
    pub async fn return_loan(&self, loan_id: i32, return_date: &str) -> AppResult<Loan> {
        self.repository
            .loans
            .return_loan(loan_id, return_date)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("open loan with id {}", loan_id)))
    }

    /// Loans of one patron, joined with book titles.
    pub async fn loans_for_patron(&self, patron_id: i32) -> AppResult<Vec<LoanRecord>> {
        self.repository.loans.list_for_patron(patron_id).await
    }
}
