//! Employee form capture.
//!
//! The form gathers named text fields into a [`FieldMap`] and turns a submit
//! into a create or an update request. Business rules (age, phone pattern)
//! belong to the input widgets, see [`crate::constraints`]; here only the
//! record shape is checked.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::employee::{Employee, EmployeeFields};
use crate::error::FormError;

/// Submitted form values keyed by field name.
pub type FieldMap = BTreeMap<String, String>;

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const DATE_OF_EMPLOYMENT: &str = "dateOfEmployment";
pub const DATE_OF_BIRTH: &str = "dateOfBirth";
pub const PHONE: &str = "phone";
pub const EMAIL: &str = "email";
pub const DEPARTMENT: &str = "department";
pub const POSITION: &str = "position";

/// Field names in form order.
pub const FIELD_NAMES: [&str; 8] = [
    FIRST_NAME,
    LAST_NAME,
    DATE_OF_EMPLOYMENT,
    DATE_OF_BIRTH,
    PHONE,
    EMAIL,
    DEPARTMENT,
    POSITION,
];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Hidden,
    Create,
    /// Editing a detached copy of an existing record.
    Edit(Employee),
}

/// What a successful submit asks the list to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Create(EmployeeFields),
    /// Carries the original `id` and `email`.
    Update(Employee),
}

#[derive(Clone, Debug, Default)]
pub struct EmployeeForm {
    mode: FormMode,
}

impl EmployeeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.mode, FormMode::Hidden)
    }

    pub fn open_for_create(&mut self) {
        self.mode = FormMode::Create;
    }

    pub fn open_for_edit(&mut self, employee: &Employee) {
        self.mode = FormMode::Edit(employee.clone());
    }

    /// Hides the form. Returns whether it was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.mode = FormMode::Hidden;
        was_open
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Edit(_) => "Edit Employee",
            _ => "Add New Employee",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Edit(_) => "Update",
            _ => "Submit",
        }
    }

    /// The email widget is read-only while editing.
    pub fn is_email_locked(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Values the widgets start with: blank for a new record, the record's
    /// own values when editing.
    pub fn prefill(&self) -> FieldMap {
        match &self.mode {
            FormMode::Edit(original) => field_map(&original.fields()),
            _ => FieldMap::new(),
        }
    }

    /// Turns submitted values into a request and closes the form. A value map
    /// that does not describe a record leaves the form open.
    pub fn submit(&mut self, values: &FieldMap) -> Result<Submission, FormError> {
        let submission = match &self.mode {
            FormMode::Hidden => return Err(FormError::NotOpen),
            FormMode::Create => Submission::Create(parse_fields(values)?),
            FormMode::Edit(original) => {
                let mut values = values.clone();
                values.insert(EMAIL.to_string(), original.email.clone());
                let fields = parse_fields(&values)?;
                Submission::Update(fields.into_employee(original.id.clone()))
            }
        };
        self.mode = FormMode::Hidden;
        Ok(submission)
    }
}

/// Reads a complete set of employee fields out of a value map.
pub fn parse_fields(values: &FieldMap) -> Result<EmployeeFields, FormError> {
    Ok(EmployeeFields {
        first_name: required(values, FIRST_NAME)?.to_string(),
        last_name: required(values, LAST_NAME)?.to_string(),
        date_of_employment: date(values, DATE_OF_EMPLOYMENT)?,
        date_of_birth: date(values, DATE_OF_BIRTH)?,
        phone: required(values, PHONE)?.to_string(),
        email: required(values, EMAIL)?.to_string(),
        department: required(values, DEPARTMENT)?.parse()?,
        position: required(values, POSITION)?.parse()?,
    })
}

pub fn field_map(fields: &EmployeeFields) -> FieldMap {
    [
        (FIRST_NAME, fields.first_name.clone()),
        (LAST_NAME, fields.last_name.clone()),
        (DATE_OF_EMPLOYMENT, fields.date_of_employment.format(DATE_FORMAT).to_string()),
        (DATE_OF_BIRTH, fields.date_of_birth.format(DATE_FORMAT).to_string()),
        (PHONE, fields.phone.clone()),
        (EMAIL, fields.email.clone()),
        (DEPARTMENT, fields.department.to_string()),
        (POSITION, fields.position.to_string()),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect()
}

fn required<'a>(values: &'a FieldMap, name: &'static str) -> Result<&'a str, FormError> {
    values
        .get(name)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or(FormError::MissingField(name))
}

fn date(values: &FieldMap, name: &'static str) -> Result<NaiveDate, FormError> {
    let raw = required(values, name)?;
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| FormError::InvalidDate {
        field: name,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::{Department, EmployeeId, Position};

    fn john_doe() -> FieldMap {
        [
            ("firstName", "John"),
            ("lastName", "Doe"),
            ("email", "john.doe@example.com"),
            ("phone", "+90 530 123 45 67"),
            ("department", "Tech"),
            ("position", "Senior"),
            ("dateOfBirth", "1990-01-01"),
            ("dateOfEmployment", "2024-01-01"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn create_submission_carries_the_entered_values() {
        let mut form = EmployeeForm::new();
        form.open_for_create();
        assert_eq!(form.title(), "Add New Employee");
        assert_eq!(form.submit_label(), "Submit");

        let Submission::Create(fields) = form.submit(&john_doe()).unwrap() else {
            panic!("expected a create submission");
        };
        assert_eq!(fields.first_name, "John");
        assert_eq!(fields.department, Department::Tech);
        assert_eq!(fields.position, Position::Senior);
        assert_eq!(field_map(&fields), john_doe());
        assert!(!form.is_open());
    }

    #[test]
    fn edit_submission_reattaches_id_and_email() {
        let existing = parse_fields(&john_doe())
            .unwrap()
            .into_employee(EmployeeId::new("123"));
        let mut form = EmployeeForm::new();
        form.open_for_edit(&existing);
        assert_eq!(form.title(), "Edit Employee");
        assert_eq!(form.submit_label(), "Update");
        assert!(form.is_email_locked());
        assert_eq!(form.prefill(), john_doe());

        let mut values = form.prefill();
        values.insert("firstName".into(), "Johnny".into());
        values.insert("lastName".into(), "Doeson".into());
        values.insert("position".into(), "Medior".into());
        values.insert("email".into(), "someone.else@example.com".into());

        let Submission::Update(updated) = form.submit(&values).unwrap() else {
            panic!("expected an update submission");
        };
        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.email, "john.doe@example.com");
        assert_eq!(updated.full_name(), "Johnny Doeson");
        assert_eq!(updated.position, Position::Medior);
    }

    #[test]
    fn missing_fields_keep_the_form_open() {
        let mut form = EmployeeForm::new();
        form.open_for_create();
        let mut values = john_doe();
        values.remove("lastName");
        assert_eq!(form.submit(&values), Err(FormError::MissingField("lastName")));
        values.insert("lastName".into(), String::new());
        assert_eq!(form.submit(&values), Err(FormError::MissingField("lastName")));
        assert!(form.is_open());
    }

    #[test]
    fn malformed_dates_and_options_are_rejected() {
        let mut values = john_doe();
        values.insert("dateOfBirth".into(), "01/01/1990".into());
        assert!(matches!(
            parse_fields(&values),
            Err(FormError::InvalidDate { field: "dateOfBirth", .. })
        ));

        let mut values = john_doe();
        values.insert("position".into(), "Lead".into());
        assert!(matches!(
            parse_fields(&values),
            Err(FormError::UnknownOption { kind: "position", .. })
        ));
    }

    #[test]
    fn submitting_a_hidden_form_fails() {
        let mut form = EmployeeForm::new();
        assert_eq!(form.submit(&john_doe()), Err(FormError::NotOpen));
    }

    #[test]
    fn close_reports_whether_it_was_open() {
        let mut form = EmployeeForm::new();
        assert!(!form.close());
        form.open_for_create();
        assert!(form.close());
        assert_eq!(form.mode(), &FormMode::Hidden);
        assert!(form.prefill().is_empty());
    }
}
