//! Constraints the input widgets enforce before a form can be submitted.
//!
//! These mirror the attributes of the entry widgets (required, pattern,
//! date upper bound, select options). The form itself does not repeat them.

use chrono::{Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::employee::{Department, Position};
use crate::form::{self, FieldMap};

/// Pattern of the phone widget.
pub const PHONE_PATTERN: &str = "[+][0-9]{2,3} [0-9]{3} [0-9]{3} [0-9]{2} [0-9]{2}";
pub const PHONE_PLACEHOLDER: &str = "+90 530 123 45 67";
pub const MINIMUM_AGE_YEARS: u32 = 18;

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^(?:{PHONE_PATTERN})$")).expect("phone pattern compiles")
});

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+$").expect("email pattern compiles"));

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("`{0}` is required")]
    Required(&'static str),
    #[error("phone `{0}` does not match the +CC XXX XXX XX XX pattern")]
    Phone(String),
    #[error("`{0}` is not an email address")]
    Email(String),
    #[error("`{field}` must be a date (YYYY-MM-DD), got `{value}`")]
    Date { field: &'static str, value: String },
    #[error("date of birth must be on or before {latest}")]
    TooYoung { latest: NaiveDate },
    #[error("`{value}` is not a valid {field}")]
    UnknownOption { field: &'static str, value: String },
}

/// Latest birth date the date-of-birth widget accepts on `today`.
///
/// On 29 February the result is 28 February eighteen years back (chrono
/// clamps to the end of the month), one day earlier than a browser date
/// input would roll over to (1 March).
pub fn latest_birth_date(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(12 * MINIMUM_AGE_YEARS))
        .unwrap_or(NaiveDate::MIN)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.is_match(phone)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Checks `values` the way the widgets would on `today`. An empty result
/// means the form may be submitted.
pub fn check(values: &FieldMap, today: NaiveDate) -> Vec<Violation> {
    let mut violations = Vec::new();
    let value = |name: &str| values.get(name).map(String::as_str).unwrap_or_default();

    for name in form::FIELD_NAMES {
        if value(name).is_empty() {
            violations.push(Violation::Required(name));
        }
    }

    let phone = value(form::PHONE);
    if !phone.is_empty() && !is_valid_phone(phone) {
        violations.push(Violation::Phone(phone.to_string()));
    }

    let email = value(form::EMAIL);
    if !email.is_empty() && !is_valid_email(email) {
        violations.push(Violation::Email(email.to_string()));
    }

    for field in [form::DATE_OF_EMPLOYMENT, form::DATE_OF_BIRTH] {
        let raw = value(field);
        if raw.is_empty() {
            continue;
        }
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) if field == form::DATE_OF_BIRTH => {
                let latest = latest_birth_date(today);
                if date > latest {
                    violations.push(Violation::TooYoung { latest });
                }
            }
            Ok(_) => {}
            Err(_) => violations.push(Violation::Date {
                field,
                value: raw.to_string(),
            }),
        }
    }

    let department = value(form::DEPARTMENT);
    if !department.is_empty() && department.parse::<Department>().is_err() {
        violations.push(Violation::UnknownOption {
            field: form::DEPARTMENT,
            value: department.to_string(),
        });
    }
    let position = value(form::POSITION);
    if !position.is_empty() && position.parse::<Position>().is_err() {
        violations.push(Violation::UnknownOption {
            field: form::POSITION,
            value: position.to_string(),
        });
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn complete() -> FieldMap {
        [
            ("firstName", "Ada"),
            ("lastName", "Lovelace"),
            ("email", "ada@example.com"),
            ("phone", "+44 207 123 45 67"),
            ("department", "Tech"),
            ("position", "Senior"),
            ("dateOfBirth", "1990-12-10"),
            ("dateOfEmployment", "2024-01-01"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn phone_pattern() {
        assert!(is_valid_phone("+90 530 123 45 67"));
        assert!(is_valid_phone("+353 530 123 45 67"));
        assert!(!is_valid_phone("+9 530 123 45 67"));
        assert!(!is_valid_phone("90 530 123 45 67"));
        assert!(!is_valid_phone("+90 5301234567"));
        assert!(!is_valid_phone("+90 530 123 45 67 "));
    }

    #[test]
    fn birth_date_bound_is_eighteen_years_back() {
        assert_eq!(latest_birth_date(date(2025, 4, 21)), date(2007, 4, 21));
        assert_eq!(latest_birth_date(date(2024, 2, 29)), date(2006, 2, 28));
    }

    #[test]
    fn complete_values_pass() {
        assert!(check(&complete(), date(2025, 4, 21)).is_empty());
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let violations = check(&FieldMap::new(), date(2025, 4, 21));
        assert_eq!(violations.len(), form::FIELD_NAMES.len());
        assert!(violations.iter().all(|v| matches!(v, Violation::Required(_))));
    }

    #[test]
    fn minors_are_rejected() {
        let mut values = complete();
        values.insert("dateOfBirth".into(), "2007-04-22".into());
        assert_eq!(
            check(&values, date(2025, 4, 21)),
            vec![Violation::TooYoung {
                latest: date(2007, 4, 21)
            }]
        );
        values.insert("dateOfBirth".into(), "2007-04-21".into());
        assert!(check(&values, date(2025, 4, 21)).is_empty());
    }

    #[test]
    fn bad_phone_email_and_option_are_reported() {
        let mut values = complete();
        values.insert("phone".into(), "555-1234".into());
        values.insert("email".into(), "not an email".into());
        values.insert("department".into(), "Sales".into());
        let violations = check(&values, date(2025, 4, 21));
        assert_eq!(violations.len(), 3);
        assert!(violations.contains(&Violation::Phone("555-1234".into())));
        assert!(violations.contains(&Violation::Email("not an email".into())));
    }
}
