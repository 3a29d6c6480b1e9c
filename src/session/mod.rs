//! Interactive session loop.
//!
//! The loop owns no business rules: it collects raw input, runs the field
//! validators until a value is accepted, and hands the result to the
//! services. Every handled error prints one line at the terminal and falls
//! back to a menu; nothing here is fatal to the process.

use std::io::{self, BufRead, Write};

use chrono::{NaiveDate, Utc};

use crate::{
    error::AppError,
    models::{
        Account, AccountKind, CreateAuthor, CreateBook, CreateLoan, LoanRecord, NewAccount, Profile,
    },
    services::Services,
    validation::{self, FieldResult},
};

/// Terminal the session talks through. A trait so flows can be driven by
/// scripted input in tests.
pub trait Console {
    /// Print `prompt`, read one line, return it without the line ending.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    fn say(&mut self, text: &str);
}

/// Console over stdin/stdout.
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        let mut out = io::stdout();
        out.write_all(prompt.as_bytes())?;
        out.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    fn say(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Prompt until `validate` accepts, showing the rejection message before
/// every retry. Every field an operator types goes through this cycle.
pub fn prompt_field<C, F>(console: &mut C, prompt: &str, validate: F) -> io::Result<String>
where
    C: Console,
    F: Fn(&str) -> FieldResult,
{
    loop {
        let value = console.read_line(prompt)?;
        match validate(&value) {
            Ok(()) => return Ok(value),
            Err(reason) => console.say(&reason.to_string()),
        }
    }
}

/// Prompt for a whole number with the same retry behavior as fields.
pub fn prompt_number<C: Console>(console: &mut C, prompt: &str) -> io::Result<i32> {
    loop {
        let value = console.read_line(prompt)?;
        match value.trim().parse() {
            Ok(n) => return Ok(n),
            Err(_) => console.say("Enter a number."),
        }
    }
}

/// Why a flow stopped early.
enum FlowEnd {
    /// Terminal went away; ends the session.
    Io(io::Error),
    /// Handled application error; one line, back to the menu.
    App(AppError),
}

impl From<io::Error> for FlowEnd {
    fn from(e: io::Error) -> Self {
        FlowEnd::Io(e)
    }
}

impl From<AppError> for FlowEnd {
    fn from(e: AppError) -> Self {
        FlowEnd::App(e)
    }
}

type FlowResult<T> = Result<T, FlowEnd>;

pub struct Session<C: Console> {
    console: C,
    services: Services,
}

impl<C: Console> Session<C> {
    pub fn new(console: C, services: Services) -> Self {
        Self { console, services }
    }

    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Run until the operator quits or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        self.console.say("Bibliotek library desk");
        loop {
            match self.main_menu().await {
                Ok(true) => {}
                Ok(false) => break,
                Err(FlowEnd::App(e)) => self.console.say(&e.operator_line()),
                Err(FlowEnd::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(FlowEnd::Io(e)) => return Err(e),
            }
        }
        Ok(())
    }

    /// One pass over the top menu. `false` when the operator quits.
    async fn main_menu(&mut self) -> FlowResult<bool> {
        let choice = self
            .console
            .read_line("\n1. Log in  2. Register  q. Quit: ")?;
        match choice.trim() {
            "1" => {
                if let Some(kind) = self.pick_kind()? {
                    self.login_flow(kind).await?;
                }
            }
            "2" => {
                if let Some(kind) = self.pick_kind()? {
                    self.register_flow(kind).await?;
                }
            }
            "q" | "\\q" => return Ok(false),
            _ => self.console.say("Unknown choice."),
        }
        Ok(true)
    }

    fn pick_kind(&mut self) -> io::Result<Option<AccountKind>> {
        let choice = self.console.read_line("1. Patron  2. Worker: ")?;
        Ok(match choice.trim() {
            "1" => Some(AccountKind::Patron),
            "2" => Some(AccountKind::Worker),
            _ => {
                self.console.say("Unknown account kind.");
                None
            }
        })
    }

    async fn register_flow(&mut self, kind: AccountKind) -> FlowResult<()> {
        let login = self.prompt_new_login(kind).await?;
        let password = prompt_field(&mut self.console, "Password: ", validation::validate_password)?;
        let profile = self.prompt_profile()?;

        let account = NewAccount {
            login,
            password,
            profile,
        };
        let id = self.services.accounts.register(kind, account).await?;
        self.console
            .say(&format!("Registered {} account with id {}.", kind, id));
        Ok(())
    }

    /// Login prompt for registration: the duplicate flag comes from the
    /// store on every attempt, then feeds the login validator.
    async fn prompt_new_login(&mut self, kind: AccountKind) -> FlowResult<String> {
        loop {
            let value = self.console.read_line("Login: ")?;
            let taken = self.services.accounts.login_taken(kind, &value).await?;
            match validation::validate_login(&value, taken) {
                Ok(()) => return Ok(value),
                Err(reason) => self.console.say(&reason.to_string()),
            }
        }
    }

    fn prompt_profile(&mut self) -> FlowResult<Profile> {
        let today = self.today();
        let name = prompt_field(&mut self.console, "Full name: ", validation::validate_name)?;
        let birth_date = prompt_field(&mut self.console, "Birth date (DD/MM/YYYY): ", |v| {
            validation::validate_birth_date(v, today)
        })?;
        let address = prompt_field(&mut self.console, "Address: ", validation::validate_address)?;
        let postal_code = prompt_field(
            &mut self.console,
            "Postal code (01-234 or 01234): ",
            validation::validate_postal_code,
        )?;
        Ok(Profile {
            name,
            birth_date,
            address,
            postal_code,
        })
    }

    async fn login_flow(&mut self, kind: AccountKind) -> FlowResult<()> {
        let login = self.console.read_line("Login: ")?;
        let password = self.console.read_line("Password: ")?;
        let account = self
            .services
            .accounts
            .authenticate(kind, &login, &password)
            .await?;
        self.console.say(&format!("Welcome, {}.", account.name));
        match kind {
            AccountKind::Worker => self.worker_menu(&account).await,
            AccountKind::Patron => self.patron_menu(&account).await,
        }
    }

    /// Catalog desk for a logged-in worker. Errors inside one operation
    /// fall back here, not to the top menu.
    async fn worker_menu(&mut self, worker: &Account) -> FlowResult<()> {
        loop {
            let choice = self.console.read_line(
                "\n1. Add author  2. Add book  3. Record loan  4. Return loan  5. Log out: ",
            )?;
            let outcome = match choice.trim() {
                "1" => self.add_author_flow().await,
                "2" => self.add_book_flow().await,
                "3" => self.record_loan_flow(worker).await,
                "4" => self.return_loan_flow().await,
                "5" => return Ok(()),
                _ => {
                    self.console.say("Unknown choice.");
                    Ok(())
                }
            };
            match outcome {
                Ok(()) => {}
                Err(FlowEnd::App(e)) => self.console.say(&e.operator_line()),
                Err(io_end) => return Err(io_end),
            }
        }
    }

    async fn patron_menu(&mut self, patron: &Account) -> FlowResult<()> {
        loop {
            let choice = self.console.read_line("\n1. My loans  2. Log out: ")?;
            match choice.trim() {
                "1" => match self.services.loans.loans_for_patron(patron.id).await {
                    Ok(loans) => self.show_loans(&loans),
                    Err(e) => self.console.say(&e.operator_line()),
                },
                "2" => return Ok(()),
                _ => self.console.say("Unknown choice."),
            }
        }
    }

    fn show_loans(&mut self, loans: &[LoanRecord]) {
        if loans.is_empty() {
            self.console.say("No loans on record.");
            return;
        }
        for loan in loans {
            let status = loan.return_date.as_deref().unwrap_or("out");
            self.console.say(&format!(
                "#{}  {}  ({} -> {})",
                loan.id, loan.title, loan.loan_date, status
            ));
        }
    }

    async fn add_author_flow(&mut self) -> FlowResult<()> {
        let today = self.today();
        let name = prompt_field(&mut self.console, "Author name: ", validation::validate_name)?;
        let birth_date = prompt_field(
            &mut self.console,
            "Author birth date (DD/MM/YYYY): ",
            |v| validation::validate_birth_date(v, today),
        )?;
        let author = self
            .services
            .catalog
            .add_author(CreateAuthor { name, birth_date })
            .await?;
        self.console
            .say(&format!("Author added with id {}.", author.id));
        Ok(())
    }

    async fn add_book_flow(&mut self) -> FlowResult<()> {
        let title = prompt_field(&mut self.console, "Title: ", validation::validate_title)?;
        let pages = prompt_field(&mut self.console, "Pages: ", validation::validate_page_count)?;
        let pages: i32 = pages
            .parse()
            .map_err(|_| AppError::Validation("Page count out of range.".to_string()))?;
        let author_id = prompt_number(&mut self.console, "Author id: ")?;
        let book = self
            .services
            .catalog
            .add_book(CreateBook {
                title,
                pages,
                author_id,
            })
            .await?;
        self.console.say(&format!("Book added with id {}.", book.id));
        Ok(())
    }

    async fn record_loan_flow(&mut self, worker: &Account) -> FlowResult<()> {
        let book_id = prompt_number(&mut self.console, "Book id: ")?;
        // surface a bad book id before asking for the rest
        let book = self.services.catalog.get_book(book_id).await?;

        let patron_login = self.console.read_line("Patron login: ")?;
        let patron = self
            .services
            .accounts
            .find_account(AccountKind::Patron, patron_login.trim())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("patron '{}'", patron_login.trim())))?;

        let today = self.today();
        let loan_date = prompt_field(&mut self.console, "Loan date (DD/MM/YYYY): ", |v| {
            validation::validate_loan_date(v, today)
        })?;

        let loan = self
            .services
            .loans
            .create_loan(CreateLoan {
                book_id: book.id,
                patron_id: patron.id,
                worker_id: worker.id,
                loan_date,
            })
            .await?;
        self.console.say(&format!("Loan recorded with id {}.", loan.id));
        Ok(())
    }

    async fn return_loan_flow(&mut self) -> FlowResult<()> {
        let loan_id = prompt_number(&mut self.console, "Loan id: ")?;
        let stamp = self.today().format("%d-%m-%Y").to_string();
        let returned = self.services.loans.return_loan(loan_id, &stamp).await?;
        self.console.say(&format!("Loan {} returned.", returned.id));
        Ok(())
    }
}
