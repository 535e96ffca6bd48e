//! Provides PostgreSQL database interaction functionalities using `sqlx`.
//!
//! Includes the connection setup, the plain and joined reads behind the view and add
//! actions, and the three inserts plus the role update.
//! Also contains integration tests for database operations (requires the `integration-tests` feature).

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::{
    Department, Employee, EmployeeListing, NewEmployee, NewRole, Role, RoleListing,
};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Pool, Postgres,
};
use tracing::{debug, error, info};

const SELECT_DEPARTMENTS: &str = "SELECT id, name FROM departments";

const SELECT_ROLES: &str = "SELECT id, title, salary, department_id FROM roles";

const SELECT_EMPLOYEES: &str =
    "SELECT id, first_name, last_name, role_id, manager_id FROM employees";

const SELECT_ROLE_LISTING: &str = r#"
    SELECT roles.id, roles.title, departments.name AS department, roles.salary
    FROM roles
    LEFT JOIN departments ON roles.department_id = departments.id
"#;

// `||` yields NULL when there is no manager row, so the column renders blank.
const SELECT_EMPLOYEE_LISTING: &str = r#"
    SELECT e.id, e.first_name, e.last_name, roles.title, departments.name AS department,
           roles.salary, m.first_name || ' ' || m.last_name AS manager
    FROM employees e
    LEFT JOIN roles ON e.role_id = roles.id
    LEFT JOIN departments ON roles.department_id = departments.id
    LEFT JOIN employees m ON e.manager_id = m.id
"#;

const INSERT_DEPARTMENT: &str = "INSERT INTO departments (name) VALUES ($1)";

const INSERT_ROLE: &str =
    "INSERT INTO roles (title, salary, department_id) VALUES ($1, $2::numeric, $3)";

const INSERT_EMPLOYEE: &str =
    "INSERT INTO employees (first_name, last_name, role_id, manager_id) VALUES ($1, $2, $3, $4)";

const UPDATE_EMPLOYEE_ROLE: &str = "UPDATE employees SET role_id = $1 WHERE id = $2";

/// Represents the database connection and provides methods for database operations.
///
/// The pool is capped at a single connection: the tool opens one connection at startup
/// and closes it on Exit.
pub struct Database {
    pool: Pool<Postgres>,
}

impl Database {
    /// Creates a new `Database` instance by establishing the connection.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the connection cannot be established.
    pub async fn connect(options: PgConnectOptions) -> Result<Self> {
        info!("Connecting to database...");

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| {
                error!("Failed to connect to database: {}", e);
                AppError::Db(e.into())
            })?;

        info!("Connected to database successfully");
        Ok(Self { pool })
    }

    async fn fetch<T>(&self, what: &str, sql: &str) -> Result<Vec<T>>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let rows = sqlx::query_as::<_, T>(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to read {}: {}", what, e);
                AppError::Db(e.into())
            })?;
        debug!("Read {} {}", rows.len(), what);
        Ok(rows)
    }
}

impl Store for Database {
    async fn departments(&self) -> Result<Vec<Department>> {
        self.fetch("departments", SELECT_DEPARTMENTS).await
    }

    async fn roles(&self) -> Result<Vec<Role>> {
        self.fetch("roles", SELECT_ROLES).await
    }

    async fn employees(&self) -> Result<Vec<Employee>> {
        self.fetch("employees", SELECT_EMPLOYEES).await
    }

    async fn role_listing(&self) -> Result<Vec<RoleListing>> {
        self.fetch("role listing", SELECT_ROLE_LISTING).await
    }

    async fn employee_listing(&self) -> Result<Vec<EmployeeListing>> {
        self.fetch("employee listing", SELECT_EMPLOYEE_LISTING).await
    }

    async fn insert_department(&self, name: &str) -> Result<()> {
        sqlx::query(INSERT_DEPARTMENT)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to insert department {:?}: {}", name, e);
                AppError::Db(e.into())
            })?;
        info!("Inserted department {:?}", name);
        Ok(())
    }

    async fn insert_role(&self, role: &NewRole) -> Result<()> {
        sqlx::query(INSERT_ROLE)
            .bind(&role.title)
            .bind(&role.salary) // Text; the statement casts it
            .bind(role.department_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to insert role {:?}: {}", role.title, e);
                AppError::Db(e.into())
            })?;
        info!("Inserted role {:?}", role.title);
        Ok(())
    }

    async fn insert_employee(&self, employee: &NewEmployee) -> Result<()> {
        sqlx::query(INSERT_EMPLOYEE)
            .bind(&employee.first_name)
            .bind(&employee.last_name)
            .bind(employee.role_id)
            .bind(employee.manager_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Failed to insert employee {} {}: {}",
                    employee.first_name, employee.last_name, e
                );
                AppError::Db(e.into())
            })?;
        info!(
            "Inserted employee {} {}",
            employee.first_name, employee.last_name
        );
        Ok(())
    }

    async fn update_employee_role(&self, employee_id: i32, role_id: i32) -> Result<()> {
        let result = sqlx::query(UPDATE_EMPLOYEE_ROLE)
            .bind(role_id)
            .bind(employee_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to update role of employee {}: {}", employee_id, e);
                AppError::Db(e.into())
            })?;
        info!(
            "Set role {} on employee {} ({} row(s))",
            role_id,
            employee_id,
            result.rows_affected()
        );
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Database connection closed");
    }
}
