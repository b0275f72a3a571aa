//! Text renderers for a page of employees.
//!
//! Every function here is a pure function of its input; none of them keep
//! state between calls.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::employee::Employee;
use crate::pagination::PageControl;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Table,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::List => "list",
            ViewMode::Table => "table",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(ViewMode::List),
            "table" => Ok(ViewMode::Table),
            other => Err(format!("unknown view mode `{other}`")),
        }
    }
}

const EDIT_MARKER: &str = "[edit]";
const DELETE_MARKER: &str = "[delete]";

fn labelled(employee: &Employee) -> [(&'static str, String); 8] {
    [
        ("First Name", employee.first_name.clone()),
        ("Last Name", employee.last_name.clone()),
        ("Department", employee.department.to_string()),
        ("Position", employee.position.to_string()),
        ("Email", employee.email.clone()),
        ("Phone", employee.phone.clone()),
        ("Date of Employment", employee.date_of_employment.to_string()),
        ("Date of Birth", employee.date_of_birth.to_string()),
    ]
}

fn table_row(employee: &Employee) -> Vec<String> {
    vec![
        employee.first_name.clone(),
        employee.last_name.clone(),
        employee.date_of_employment.to_string(),
        employee.date_of_birth.to_string(),
        employee.phone.clone(),
        employee.email.clone(),
        employee.department.to_string(),
        employee.position.to_string(),
    ]
}

const TABLE_HEADERS: [&str; 8] = [
    "First Name",
    "Last Name",
    "Date of Employment",
    "Date of Birth",
    "Phone",
    "Email",
    "Department",
    "Position",
];

pub fn render(employees: &[Employee], mode: ViewMode, with_actions: bool) -> String {
    match mode {
        ViewMode::List => render_list(employees, with_actions),
        ViewMode::Table => render_table(employees, with_actions),
    }
}

/// One block of labelled fields per employee.
pub fn render_list(employees: &[Employee], with_actions: bool) -> String {
    let mut out = String::new();
    for employee in employees {
        for (label, value) in labelled(employee) {
            out.push_str(&format!("{label:<20}{value}\n"));
        }
        if with_actions {
            out.push_str(&format!("{EDIT_MARKER} {DELETE_MARKER} id={}\n", employee.id));
        }
        out.push('\n');
    }
    out
}

/// Header row plus one aligned row per employee.
pub fn render_table(employees: &[Employee], with_actions: bool) -> String {
    let mut header: Vec<String> = TABLE_HEADERS.iter().map(|h| h.to_string()).collect();
    let mut rows: Vec<Vec<String>> = employees.iter().map(table_row).collect();
    if with_actions {
        header.push("Actions".to_string());
        for (row, employee) in rows.iter_mut().zip(employees) {
            row.push(format!("{EDIT_MARKER} {DELETE_MARKER} id={}", employee.id));
        }
    }

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        format!("{}\n", padded.join(" | ").trim_end())
    };

    let mut out = line(&header);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("{}\n", rule.join("-+-")));
    for row in &rows {
        out.push_str(&line(row));
    }
    out
}

/// Compact card per employee, headed by the full name.
pub fn render_cards(employees: &[Employee], with_actions: bool) -> String {
    let mut out = String::new();
    for employee in employees {
        let name = employee.full_name();
        if with_actions {
            out.push_str(&format!("{name}  {EDIT_MARKER} {DELETE_MARKER}\n"));
        } else {
            out.push_str(&format!("{name}\n"));
        }
        out.push_str(&format!("{}\n", "=".repeat(name.chars().count())));
        for (label, value) in labelled(employee).into_iter().skip(2) {
            out.push_str(&format!("  {label:<20}{value}\n"));
        }
        out.push('\n');
    }
    out
}

/// `< 1 ... 4 5 [6] 7 8 ... 20 >`; disabled arrows are shown in parentheses.
pub fn render_pagination(controls: &[PageControl]) -> String {
    controls
        .iter()
        .map(|control| match control {
            PageControl::Previous { disabled: true, .. } => "(<)".to_string(),
            PageControl::Previous { .. } => "<".to_string(),
            PageControl::Next { disabled: true, .. } => "(>)".to_string(),
            PageControl::Next { .. } => ">".to_string(),
            PageControl::Page { number, active: true } => format!("[{number}]"),
            PageControl::Page { number, .. } => number.to_string(),
            PageControl::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::EmployeeId;
    use crate::employee::tests::fields;

    fn sample() -> Vec<Employee> {
        vec![
            fields("Ada", "Lovelace").into_employee(EmployeeId::new("1")),
            fields("Alan", "Turing").into_employee(EmployeeId::new("2")),
        ]
    }

    #[test]
    fn list_view_labels_every_field() {
        let out = render_list(&sample(), false);
        assert!(out.contains("First Name          Ada\n"));
        assert!(out.contains("Date of Birth       1990-01-01\n"));
        assert!(!out.contains(EDIT_MARKER));
    }

    #[test]
    fn actions_only_when_requested() {
        let out = render(&sample(), ViewMode::List, true);
        assert!(out.contains("[edit] [delete] id=2"));
        let out = render(&sample(), ViewMode::Table, true);
        assert!(out.lines().next().unwrap().ends_with("Actions"));
    }

    #[test]
    fn table_has_header_rule_and_rows() {
        let out = render_table(&sample(), false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("First Name | Last Name"));
        assert!(lines[1].starts_with("----------"));
        assert!(lines[2].starts_with("Ada        | Lovelace "));
        assert!(lines[3].starts_with("Alan       | Turing   "));
    }

    #[test]
    fn empty_table_is_just_the_header() {
        assert_eq!(render_table(&[], false).lines().count(), 2);
    }

    #[test]
    fn cards_are_headed_by_the_full_name() {
        let out = render_cards(&sample(), false);
        assert!(out.starts_with("Ada Lovelace\n============\n"));
        assert!(out.contains("  Department          Tech\n"));
    }

    #[test]
    fn pagination_bar() {
        let controls = [
            PageControl::Previous { target: 0, disabled: true },
            PageControl::Page { number: 1, active: true },
            PageControl::Page { number: 2, active: false },
            PageControl::Ellipsis,
            PageControl::Page { number: 9, active: false },
            PageControl::Next { target: 2, disabled: false },
        ];
        assert_eq!(render_pagination(&controls), "(<) [1] 2 ... 9 >");
    }

    #[test]
    fn view_mode_parses_lowercase_names() {
        assert_eq!("table".parse::<ViewMode>(), Ok(ViewMode::Table));
        assert!("cards".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::default(), ViewMode::List);
    }
}
