//! Loans repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::loan::{CreateLoan, Loan, LoanRecord},
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, loan: &CreateLoan) -> AppResult<Loan> {
        let created = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (book_id, patron_id, worker_id, loan_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, book_id, patron_id, worker_id, loan_date, return_date
            "#,
        )
        .bind(loan.book_id)
        .bind(loan.patron_id)
        .bind(loan.worker_id)
        .bind(&loan.loan_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Stamp the return date on an open loan. `None` when the loan does not
    /// exist or was already returned.
    pub async fn return_loan(&self, id: i32, return_date: &str) -> AppResult<Option<Loan>> {
        let returned = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans SET return_date = $2
            WHERE id = $1 AND return_date IS NULL
            RETURNING id, book_id, patron_id, worker_id, loan_date, return_date
            "#,
        )
        .bind(id)
        .bind(return_date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(returned)
    }

    pub async fn list_for_patron(&self, patron_id: i32) -> AppResult<Vec<LoanRecord>> {
        let records = sqlx::query_as::<_, LoanRecord>(
            r#"
            SELECT l.id, b.title, l.loan_date, l.return_date
            FROM loans l
            JOIN books b ON b.id = l.book_id
            WHERE l.patron_id = $1
            ORDER BY l.id
            "#,
        )
        .bind(patron_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }
}
