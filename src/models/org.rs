//! Typed rows for departments, roles and employees.
//!
//! Includes structs for:
//! - Rows of the three relations as stored (`Department`, `Role`, `Employee`).
//! - Joined rows shown by the view actions (`RoleListing`, `EmployeeListing`).
//! - Payloads for the insert statements (`NewRole`, `NewEmployee`).

use crate::cli::Tabular;
use sqlx::types::Decimal;

// --- Stored rows ---

/// A row of `departments`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Department {
    pub id: i32,
    pub name: String,
}

/// A row of `roles`.
#[allow(dead_code)] // Salary and department are only shown through `RoleListing`
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Role {
    pub id: i32,
    pub title: String,
    pub salary: Decimal,
    /// Nullable; only existence is guaranteed by the choice list it was picked from.
    pub department_id: Option<i32>,
}

/// A row of `employees`.
#[allow(dead_code)] // References are only shown through `EmployeeListing`
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub role_id: Option<i32>,
    /// Self reference forming a forest over employees. Cycles are not checked.
    pub manager_id: Option<i32>,
}

impl Employee {
    /// "first last", as used for choice labels and the synthesized manager column.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// --- Joined listings ---

/// A role joined with its department name.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RoleListing {
    pub id: i32,
    pub title: String,
    pub department: Option<String>,
    pub salary: Decimal,
}

/// An employee joined with role, department and manager.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct EmployeeListing {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub department: Option<String>,
    pub salary: Option<Decimal>,
    /// The manager's full name, `None` when the employee has no manager.
    pub manager: Option<String>,
}

// --- Write payloads ---

/// Values for inserting a role.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRole {
    pub title: String,
    /// Salary exactly as typed. The insert statement does the numeric coercion.
    pub salary: String,
    pub department_id: Option<i32>,
}

/// Values for inserting an employee.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub role_id: Option<i32>,
    pub manager_id: Option<i32>,
}

// --- Table columns ---

impl Tabular for Department {
    const COLUMNS: &'static [&'static str] = &["id", "name"];

    fn cell(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            _ => None,
        }
    }
}

impl Tabular for RoleListing {
    const COLUMNS: &'static [&'static str] = &["id", "title", "department", "salary"];

    fn cell(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.to_string()),
            "title" => Some(self.title.clone()),
            "department" => self.department.clone(),
            "salary" => Some(self.salary.to_string()),
            _ => None,
        }
    }
}

impl Tabular for EmployeeListing {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "first_name",
        "last_name",
        "title",
        "department",
        "salary",
        "manager",
    ];

    fn cell(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.to_string()),
            "first_name" => Some(self.first_name.clone()),
            "last_name" => Some(self.last_name.clone()),
            "title" => self.title.clone(),
            "department" => self.department.clone(),
            "salary" => self.salary.map(|s| s.to_string()),
            "manager" => self.manager.clone(),
            _ => None,
        }
    }
}
