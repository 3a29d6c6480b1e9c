//! Field validators gating every write to the store.
//!
//! Each validator is a pure function from raw operator input to accepted or
//! rejected-with-reason. Checks run in a fixed order and stop at the first
//! failure; the returned message is shown verbatim before re-prompting.
//! Lengths count characters, not bytes.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Characters a password must include one of, and names/titles none of.
pub const SPECIAL_CHARS: &[char] = &['@', '$', '!', '%', '*', '#', '?', '&'];

/// Date formats accepted for birth and loan dates, tried in this order.
/// The first successful parse wins, so ambiguous input stays deterministic.
const DATE_FORMATS: [&str; 4] = ["%d-%m-%Y", "%d%m%Y", "%d/%m/%Y", "%d %m %Y"];

static LOGIN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());
static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-zÀ-ÿ\s-]+$").unwrap());
static POSTAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}-?\d{3}$").unwrap());

/// Why a field was rejected. The duplicate-login case is its own variant so
/// callers can tell it apart from a format rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Login already in use.")]
    DuplicateLogin,
    #[error("{0}")]
    Invalid(String),
}

/// Outcome of validating a single field.
pub type FieldResult = Result<(), FieldError>;

fn reject(message: impl Into<String>) -> FieldResult {
    Err(FieldError::Invalid(message.into()))
}

/// Login: 6-20 characters from `[A-Za-z0-9_-]`, unique within its account
/// namespace. `already_taken` comes from a store lookup done by the caller;
/// the validator itself never touches storage.
pub fn validate_login(login: &str, already_taken: bool) -> FieldResult {
    if login.is_empty() {
        return reject("Login cannot be empty.");
    }
    if already_taken {
        return Err(FieldError::DuplicateLogin);
    }
    let len = login.chars().count();
    if !(6..=20).contains(&len) {
        return reject("Login must be between 6 and 20 characters.");
    }
    if !LOGIN_RE.is_match(login) {
        return reject("Login can only contain letters, digits, - or _.");
    }
    Ok(())
}

/// Password: 8-18 characters with a lowercase letter, an uppercase letter,
/// a digit and one of [`SPECIAL_CHARS`].
pub fn validate_password(password: &str) -> FieldResult {
    if password.is_empty() {
        return reject("Password cannot be empty.");
    }
    let len = password.chars().count();
    if !(8..=18).contains(&len) {
        return reject("Password must be between 8 and 18 characters.");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return reject("Password must contain a lowercase letter.");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return reject("Password must contain an uppercase letter.");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return reject("Password must contain a digit.");
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(&c)) {
        return reject("Password must contain a special character (@$!%*#?&).");
    }
    Ok(())
}

/// Person name: 2-150 characters, no digits, no special characters.
pub fn validate_name(name: &str) -> FieldResult {
    if name.trim().is_empty() {
        return reject("Name cannot be empty, type the full name.");
    }
    let len = name.chars().count();
    if !(2..=150).contains(&len) {
        return reject("Name must be between 2 and 150 characters.");
    }
    if name.chars().any(|c| c.is_ascii_digit()) {
        return reject("Name cannot contain digits.");
    }
    if name.chars().any(|c| SPECIAL_CHARS.contains(&c)) {
        return reject("Name cannot contain special characters.");
    }
    Ok(())
}

/// Parse a date under the accepted formats; first matching format wins.
pub fn parse_flexible_date(input: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}

/// Birth date: one of the four accepted formats, not after `today`.
pub fn validate_birth_date(input: &str, today: NaiveDate) -> FieldResult {
    if input.trim().is_empty() {
        return reject("Birth date cannot be empty, use DD-MM-YYYY.");
    }
    let Some(date) = parse_flexible_date(input) else {
        return reject("Invalid date. Use DD-MM-YYYY or DD/MM/YYYY.");
    };
    if date > today {
        return reject("Birth date cannot be in the future.");
    }
    Ok(())
}

/// Loan date: same shape as [`validate_birth_date`], own message text.
pub fn validate_loan_date(input: &str, today: NaiveDate) -> FieldResult {
    if input.trim().is_empty() {
        return reject("Loan date cannot be empty, use DD/MM/YYYY.");
    }
    let Some(date) = parse_flexible_date(input) else {
        return reject("Invalid date. Use DD-MM-YYYY or DD/MM/YYYY.");
    };
    if date > today {
        return reject("Loan date cannot be in the future.");
    }
    Ok(())
}

/// Address: 2-150 characters of letters (including Latin-1 accents),
/// spaces and hyphens.
pub fn validate_address(address: &str) -> FieldResult {
    if address.trim().is_empty() {
        return reject("Address cannot be empty.");
    }
    let len = address.chars().count();
    if !(2..=150).contains(&len) {
        return reject("Address must be between 2 and 150 characters.");
    }
    if !ADDRESS_RE.is_match(address) {
        return reject("Address can only contain letters, spaces and hyphens.");
    }
    Ok(())
}

/// Postal code: 4-10 characters shaped `01-234` or `01234`.
pub fn validate_postal_code(code: &str) -> FieldResult {
    if code.trim().is_empty() {
        return reject("Postal code cannot be empty.");
    }
    let len = code.chars().count();
    if !(4..=10).contains(&len) {
        return reject("Postal code must be between 4 and 10 characters.");
    }
    if !POSTAL_RE.is_match(code) {
        return reject("Invalid postal code. Use 01-234 or 01234.");
    }
    Ok(())
}

/// Book title: 2-150 characters, no special characters.
pub fn validate_title(title: &str) -> FieldResult {
    if title.trim().is_empty() {
        return reject("Title cannot be empty.");
    }
    let len = title.chars().count();
    if !(2..=150).contains(&len) {
        return reject("Title must be between 2 and 150 characters.");
    }
    if title.chars().any(|c| SPECIAL_CHARS.contains(&c)) {
        return reject("Title cannot contain special characters.");
    }
    Ok(())
}

/// Page count: digits only, at most 4 of them.
pub fn validate_page_count(pages: &str) -> FieldResult {
    if pages.trim().is_empty() {
        return reject("Page count cannot be empty.");
    }
    if !pages.chars().all(|c| c.is_ascii_digit()) {
        return reject("Page count can contain digits only.");
    }
    if pages.chars().count() > 4 {
        return reject("Page count cannot be longer than 4 digits.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn message(result: FieldResult) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn login_accepts_valid() {
        assert_eq!(validate_login("valid_login1", false), Ok(()));
        assert_eq!(validate_login("abc-def", false), Ok(()));
    }

    #[test]
    fn login_rejects_empty() {
        assert!(message(validate_login("", false)).contains("empty"));
    }

    #[test]
    fn login_rejects_duplicate_before_length() {
        // an already-taken short login reports the duplicate, not the length
        assert_eq!(
            validate_login("ab", true),
            Err(FieldError::DuplicateLogin)
        );
    }

    #[test]
    fn login_rejects_length() {
        assert!(message(validate_login("ab", false)).contains("between 6 and 20"));
        assert!(message(validate_login(&"a".repeat(21), false)).contains("between 6 and 20"));
        assert_eq!(validate_login(&"a".repeat(20), false), Ok(()));
        assert_eq!(validate_login("abcdef", false), Ok(()));
    }

    #[test]
    fn login_rejects_charset() {
        assert!(message(validate_login("bad login!", false)).contains("letters"));
        assert!(validate_login("zażółć", false).is_err());
    }

    #[test]
    fn password_accepts_all_classes() {
        assert_eq!(validate_password("Abcdef1!"), Ok(()));
    }

    #[test]
    fn password_reports_first_missing_class() {
        assert!(message(validate_password("abcdefgh")).contains("uppercase"));
        assert!(message(validate_password("ABCDEFGH")).contains("lowercase"));
        assert!(message(validate_password("Abcdefgh")).contains("digit"));
        assert!(message(validate_password("Abcdefg1")).contains("special"));
    }

    #[test]
    fn password_rejects_length() {
        assert!(message(validate_password("Ab1!xyz")).contains("between 8 and 18"));
        assert!(message(validate_password(&format!("Ab1!{}", "x".repeat(15)))).contains("between 8 and 18"));
        assert!(message(validate_password("")).contains("empty"));
    }

    #[test]
    fn name_rules() {
        assert_eq!(validate_name("Maria Skłodowska"), Ok(()));
        assert!(message(validate_name("  ")).contains("empty"));
        assert!(message(validate_name("X")).contains("between 2 and 150"));
        assert!(message(validate_name("John 3rd")).contains("digits"));
        assert!(message(validate_name("John!")).contains("special"));
    }

    #[test]
    fn dates_accept_all_four_formats() {
        for input in ["15-06-1990", "15061990", "15/06/1990", "15 06 1990"] {
            assert_eq!(validate_birth_date(input, today()), Ok(()), "input {input:?}");
            assert_eq!(validate_loan_date(input, today()), Ok(()), "input {input:?}");
        }
    }

    #[test]
    fn date_format_priority_is_fixed() {
        assert_eq!(
            parse_flexible_date("01022020"),
            NaiveDate::from_ymd_opt(2020, 2, 1)
        );
        assert_eq!(
            parse_flexible_date("01-02-2020"),
            NaiveDate::from_ymd_opt(2020, 2, 1)
        );
    }

    #[test]
    fn dates_reject_future_in_every_format() {
        for input in ["31-12-2999", "31122999", "31/12/2999", "31 12 2999"] {
            assert!(
                message(validate_birth_date(input, today())).contains("future"),
                "input {input:?}"
            );
        }
        assert!(message(validate_loan_date("16-01-2025", today())).contains("future"));
        // today itself is fine
        assert_eq!(validate_birth_date("15/01/2025", today()), Ok(()));
    }

    #[test]
    fn dates_reject_unparsable() {
        assert!(message(validate_birth_date("31-02-2020", today())).contains("Invalid date"));
        assert!(message(validate_birth_date("1990/06/15", today())).contains("Invalid date"));
        assert!(message(validate_loan_date("soon", today())).contains("Invalid date"));
        assert!(message(validate_birth_date(" ", today())).contains("empty"));
    }

    #[test]
    fn birth_and_loan_messages_differ() {
        assert_ne!(
            message(validate_birth_date("31/12/2999", today())),
            message(validate_loan_date("31/12/2999", today()))
        );
    }

    #[test]
    fn address_rules() {
        assert_eq!(validate_address("Rue de la Paix"), Ok(()));
        assert_eq!(validate_address("Kraków-Podgórze"), Ok(()));
        assert!(message(validate_address(" ")).contains("empty"));
        assert!(message(validate_address("a")).contains("between 2 and 150"));
        assert!(message(validate_address("Main St. 5")).contains("letters"));
    }

    #[test]
    fn postal_code_rules() {
        assert_eq!(validate_postal_code("01234"), Ok(()));
        assert_eq!(validate_postal_code("01-234"), Ok(()));
        assert!(message(validate_postal_code("123")).contains("between 4 and 10"));
        // right length, wrong shape: needs three digits after the hyphen
        assert!(message(validate_postal_code("12-34")).contains("01-234"));
        assert!(message(validate_postal_code("")).contains("empty"));
    }

    #[test]
    fn title_rules() {
        assert_eq!(validate_title("Pan Tadeusz"), Ok(()));
        assert_eq!(validate_title("Catch 22"), Ok(()));
        assert!(message(validate_title("  ")).contains("empty"));
        assert!(message(validate_title("Q")).contains("between 2 and 150"));
        assert!(message(validate_title("Why? Because.")).contains("special"));
    }

    #[test]
    fn page_count_rules() {
        assert_eq!(validate_page_count("342"), Ok(()));
        assert_eq!(validate_page_count("9999"), Ok(()));
        assert!(message(validate_page_count(" ")).contains("empty"));
        assert!(message(validate_page_count("12a")).contains("digits"));
        assert!(message(validate_page_count("12345")).contains("4 digits"));
    }

    #[test]
    fn validators_are_idempotent() {
        for input in ["valid_login1", "ab", ""] {
            assert_eq!(validate_login(input, false), validate_login(input, false));
        }
        assert_eq!(
            validate_birth_date("15/06/1990", today()),
            validate_birth_date("15/06/1990", today())
        );
    }
}
