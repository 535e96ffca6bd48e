//! An in-memory [`Store`] for exercising the menu actions without PostgreSQL.
//!
//! Rows live in `Vec`s in insertion order, joins are done by hand, and every write call is
//! recorded. Reads and writes can be made to fail to drive the error paths.

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::{
    Department, Employee, EmployeeListing, NewEmployee, NewRole, Role, RoleListing,
};
use sqlx::types::Decimal;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// One recorded write with its positional values.
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    InsertDepartment(String),
    InsertRole(NewRole),
    InsertEmployee(NewEmployee),
    UpdateEmployeeRole { employee_id: i32, role_id: i32 },
}

#[derive(Default)]
struct MemoryState {
    departments: Vec<Department>,
    roles: Vec<Role>,
    employees: Vec<Employee>,
    writes: Vec<Write>,
    reads: usize,
    fail_reads: Option<sqlx::Error>,
    fail_writes: Option<sqlx::Error>,
    closed: usize,
}

/// A cloneable handle onto shared in-memory tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

fn next_id(ids: impl Iterator<Item = i32>) -> i32 {
    ids.max().unwrap_or(0) + 1
}

// sqlx::Error is not Clone, so failures are rebuilt from their message on each call.
fn replay(err: &sqlx::Error) -> AppError {
    match err {
        sqlx::Error::PoolClosed => sqlx::Error::PoolClosed.into(),
        other => sqlx::Error::Protocol(other.to_string()).into(),
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_department(self, name: &str) -> Self {
        {
            let mut s = self.state.lock().unwrap();
            let id = next_id(s.departments.iter().map(|d| d.id));
            s.departments.push(Department {
                id,
                name: name.to_string(),
            });
        }
        self
    }

    pub fn with_role(self, title: &str, salary: i64, department_id: Option<i32>) -> Self {
        {
            let mut s = self.state.lock().unwrap();
            let id = next_id(s.roles.iter().map(|r| r.id));
            s.roles.push(Role {
                id,
                title: title.to_string(),
                salary: Decimal::new(salary, 0),
                department_id,
            });
        }
        self
    }

    pub fn with_employee(
        self,
        first_name: &str,
        last_name: &str,
        role_id: Option<i32>,
        manager_id: Option<i32>,
    ) -> Self {
        {
            let mut s = self.state.lock().unwrap();
            let id = next_id(s.employees.iter().map(|e| e.id));
            s.employees.push(Employee {
                id,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                role_id,
                manager_id,
            });
        }
        self
    }

    /// Makes every later read fail with `err`.
    pub fn failing_reads(self, err: sqlx::Error) -> Self {
        self.state.lock().unwrap().fail_reads = Some(err);
        self
    }

    /// Makes every later write fail with `err` (the attempt is still recorded).
    pub fn failing_writes(self, err: sqlx::Error) -> Self {
        self.state.lock().unwrap().fail_writes = Some(err);
        self
    }

    pub fn writes(&self) -> Vec<Write> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn reads(&self) -> usize {
        self.state.lock().unwrap().reads
    }

    pub fn times_closed(&self) -> usize {
        self.state.lock().unwrap().closed
    }

    pub fn employee(&self, id: i32) -> Option<Employee> {
        let s = self.state.lock().unwrap();
        s.employees.iter().find(|e| e.id == id).cloned()
    }

    fn read<T>(&self, f: impl FnOnce(&MemoryState) -> T) -> Result<T> {
        let mut s = self.state.lock().unwrap();
        s.reads += 1;
        if let Some(err) = &s.fail_reads {
            return Err(replay(err));
        }
        Ok(f(&*s))
    }

    fn write(&self, record: Write, f: impl FnOnce(&mut MemoryState) -> Result<()>) -> Result<()> {
        let mut s = self.state.lock().unwrap();
        s.writes.push(record);
        if let Some(err) = &s.fail_writes {
            return Err(replay(err));
        }
        f(&mut *s)
    }
}

impl Store for MemoryStore {
    async fn departments(&self) -> Result<Vec<Department>> {
        self.read(|s| s.departments.clone())
    }

    async fn roles(&self) -> Result<Vec<Role>> {
        self.read(|s| s.roles.clone())
    }

    async fn employees(&self) -> Result<Vec<Employee>> {
        self.read(|s| s.employees.clone())
    }

    async fn role_listing(&self) -> Result<Vec<RoleListing>> {
        self.read(|s| {
            s.roles
                .iter()
                .map(|r| RoleListing {
                    id: r.id,
                    title: r.title.clone(),
                    department: r
                        .department_id
                        .and_then(|id| s.departments.iter().find(|d| d.id == id))
                        .map(|d| d.name.clone()),
                    salary: r.salary,
                })
                .collect()
        })
    }

    async fn employee_listing(&self) -> Result<Vec<EmployeeListing>> {
        self.read(|s| {
            s.employees
                .iter()
                .map(|e| {
                    let role = e.role_id.and_then(|id| s.roles.iter().find(|r| r.id == id));
                    let department = role
                        .and_then(|r| r.department_id)
                        .and_then(|id| s.departments.iter().find(|d| d.id == id));
                    let manager = e
                        .manager_id
                        .and_then(|id| s.employees.iter().find(|m| m.id == id));
                    EmployeeListing {
                        id: e.id,
                        first_name: e.first_name.clone(),
                        last_name: e.last_name.clone(),
                        title: role.map(|r| r.title.clone()),
                        department: department.map(|d| d.name.clone()),
                        salary: role.map(|r| r.salary),
                        manager: manager.map(Employee::full_name),
                    }
                })
                .collect()
        })
    }

    async fn insert_department(&self, name: &str) -> Result<()> {
        self.write(Write::InsertDepartment(name.to_string()), |s| {
            let id = next_id(s.departments.iter().map(|d| d.id));
            s.departments.push(Department {
                id,
                name: name.to_string(),
            });
            Ok(())
        })
    }

    async fn insert_role(&self, role: &NewRole) -> Result<()> {
        self.write(Write::InsertRole(role.clone()), |s| {
            // Mirrors the `::numeric` cast in the real statement.
            let salary = Decimal::from_str(role.salary.trim()).map_err(|e| {
                sqlx::Error::Protocol(format!("invalid input syntax for type numeric: {e}"))
            })?;
            let id = next_id(s.roles.iter().map(|r| r.id));
            s.roles.push(Role {
                id,
                title: role.title.clone(),
                salary,
                department_id: role.department_id,
            });
            Ok(())
        })
    }

    async fn insert_employee(&self, employee: &NewEmployee) -> Result<()> {
        self.write(Write::InsertEmployee(employee.clone()), |s| {
            let id = next_id(s.employees.iter().map(|e| e.id));
            s.employees.push(Employee {
                id,
                first_name: employee.first_name.clone(),
                last_name: employee.last_name.clone(),
                role_id: employee.role_id,
                manager_id: employee.manager_id,
            });
            Ok(())
        })
    }

    async fn update_employee_role(&self, employee_id: i32, role_id: i32) -> Result<()> {
        let record = Write::UpdateEmployeeRole {
            employee_id,
            role_id,
        };
        self.write(record, |s| {
            if let Some(e) = s.employees.iter_mut().find(|e| e.id == employee_id) {
                e.role_id = Some(role_id);
            }
            Ok(())
        })
    }

    async fn close(&self) {
        self.state.lock().unwrap().closed += 1;
    }
}
