//! Data models

pub mod account;
pub mod author;
pub mod book;
pub mod loan;

pub use account::{Account, AccountKind, NewAccount, Profile};
pub use author::{Author, CreateAuthor};
pub use book::{Book, CreateBook};
pub use loan::{CreateLoan, Loan, LoanRecord};
