//! Loan model and related types

use sqlx::FromRow;

/// Loan row from the store. `return_date` stays empty while the book is out.
#[derive(Debug, Clone, FromRow)]
pub struct Loan {
    pub id: i32,
    pub book_id: i32,
    pub patron_id: i32,
    pub worker_id: i32,
    pub loan_date: String,
    pub return_date: Option<String>,
}

/// Create loan request
#[derive(Debug, Clone)]
pub struct CreateLoan {
    pub book_id: i32,
    pub patron_id: i32,
    pub worker_id: i32,
    pub loan_date: String,
}

/// Loan joined with its book title for display.
#[derive(Debug, Clone, FromRow)]
pub struct LoanRecord {
    pub id: i32,
    pub title: String,
    pub loan_date: String,
    pub return_date: Option<String>,
}
