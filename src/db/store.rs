//! The query gateway used by the menu actions.

use crate::error::Result;
use crate::models::{
    Department, Employee, EmployeeListing, NewEmployee, NewRole, Role, RoleListing,
};

/// Parameterized reads and writes against the organization store.
///
/// Reads return rows in the order the store yields them. Writes return once the
/// statement completed. Store failures come back as `AppError::Db` without retries.
#[allow(async_fn_in_trait)]
pub trait Store {
    /// All departments.
    async fn departments(&self) -> Result<Vec<Department>>;

    /// All roles.
    async fn roles(&self) -> Result<Vec<Role>>;

    /// All employees.
    async fn employees(&self) -> Result<Vec<Employee>>;

    /// Roles joined with their department name.
    async fn role_listing(&self) -> Result<Vec<RoleListing>>;

    /// Employees joined with role, department and manager name.
    async fn employee_listing(&self) -> Result<Vec<EmployeeListing>>;

    async fn insert_department(&self, name: &str) -> Result<()>;

    async fn insert_role(&self, role: &NewRole) -> Result<()>;

    async fn insert_employee(&self, employee: &NewEmployee) -> Result<()>;

    /// Points `employee_id` at `role_id`. The previous role is not kept.
    async fn update_employee_role(&self, employee_id: i32, role_id: i32) -> Result<()>;

    /// Releases the connection. Called once, on Exit.
    async fn close(&self);
}
