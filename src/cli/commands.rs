use crate::cli::prompt::{Choice, PromptSession, Question};
use crate::cli::table::{render_table, Tabular};
use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::{
    Department, Employee, EmployeeListing, NewEmployee, NewRole, Role, RoleListing,
};
use colored::*;
use std::io::Write;
use tracing::{error, info, warn};

/// The main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ViewDepartments,
    ViewRoles,
    ViewEmployees,
    AddDepartment,
    AddRole,
    AddEmployee,
    UpdateEmployeeRole,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 8] = [
        MenuAction::ViewDepartments,
        MenuAction::ViewRoles,
        MenuAction::ViewEmployees,
        MenuAction::AddDepartment,
        MenuAction::AddRole,
        MenuAction::AddEmployee,
        MenuAction::UpdateEmployeeRole,
        MenuAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::ViewDepartments => "View All Departments",
            MenuAction::ViewRoles => "View All Roles",
            MenuAction::ViewEmployees => "View All Employees",
            MenuAction::AddDepartment => "Add a Department",
            MenuAction::AddRole => "Add a Role",
            MenuAction::AddEmployee => "Add an Employee",
            MenuAction::UpdateEmployeeRole => "Update an Employee Role",
            MenuAction::Exit => "Exit",
        }
    }

    /// The menu as a choice list; each value is the action's position in [`MenuAction::ALL`].
    fn choices() -> Vec<Choice> {
        Self::ALL
            .iter()
            .enumerate()
            .map(|(i, action)| Choice::new(action.label(), Some(i as i32)))
            .collect()
    }

    fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

fn department_choices(departments: &[Department]) -> Vec<Choice> {
    departments
        .iter()
        .map(|d| Choice::new(d.name.clone(), Some(d.id)))
        .collect()
}

fn role_choices(roles: &[Role]) -> Vec<Choice> {
    roles
        .iter()
        .map(|r| Choice::new(r.title.clone(), Some(r.id)))
        .collect()
}

fn employee_choices(employees: &[Employee]) -> Vec<Choice> {
    employees
        .iter()
        .map(|e| Choice::new(e.full_name(), Some(e.id)))
        .collect()
}

/// CLI application
///
/// Owns the store handle, the prompt session and the output sink for one operator session.
pub struct App<S, P, W> {
    store: S,
    prompt: P,
    out: W,
}

impl<S: Store, P: PromptSession, W: Write> App<S, P, W> {
    pub fn new(store: S, prompt: P, out: W) -> Self {
        Self { store, prompt, out }
    }

    #[cfg(test)]
    pub fn prompt_ref(&self) -> &P {
        &self.prompt
    }

    #[cfg(test)]
    pub fn out_ref(&self) -> &W {
        &self.out
    }

    /// Runs the main menu until the operator picks Exit, then closes the store.
    ///
    /// Action errors are reported and the menu comes back. Fatal errors (see
    /// [`AppError::is_fatal`]) stop the loop; the store is still closed before returning.
    pub async fn run(&mut self) -> Result<()> {
        let result = self.menu_loop().await;
        self.store.close().await;
        result
    }

    async fn menu_loop(&mut self) -> Result<()> {
        loop {
            let action = self.choose_action()?;
            if action == MenuAction::Exit {
                writeln!(self.out, "{}", "Exiting application. Goodbye!".green())?;
                info!("Operator chose Exit");
                return Ok(());
            }

            info!("Running menu action: {}", action.label());
            if let Err(e) = self.dispatch(action).await {
                if e.is_fatal() {
                    error!("{} failed fatally: {:?}", action.label(), e);
                    return Err(e);
                }
                warn!("{} failed: {:?}", action.label(), e);
                writeln!(
                    self.out,
                    "{} {}",
                    "Error executing command:".red(),
                    e.to_string().red()
                )?;
            }
        }
    }

    /// Asks for the next action. Backing out of the main menu counts as Exit.
    fn choose_action(&mut self) -> Result<MenuAction> {
        let question =
            Question::select("action", "What would you like to do?", MenuAction::choices());
        match self.prompt.ask(&[question]) {
            Ok(answers) => {
                let index = answers.required_choice("action")?;
                MenuAction::from_index(index)
                    .ok_or_else(|| AppError::MissingAnswer(format!("no menu entry {index}")))
            },
            Err(AppError::Cancelled) => Ok(MenuAction::Exit),
            Err(e) => Err(e),
        }
    }

    /// Runs one menu action to completion.
    pub async fn dispatch(&mut self, action: MenuAction) -> Result<()> {
        match action {
            MenuAction::ViewDepartments => self.view_departments().await,
            MenuAction::ViewRoles => self.view_roles().await,
            MenuAction::ViewEmployees => self.view_employees().await,
            MenuAction::AddDepartment => self.add_department().await,
            MenuAction::AddRole => self.add_role().await,
            MenuAction::AddEmployee => self.add_employee().await,
            MenuAction::UpdateEmployeeRole => self.update_employee_role().await,
            MenuAction::Exit => Ok(()),
        }
    }

    fn print_table<T: Tabular>(&mut self, rows: &[T]) -> Result<()> {
        write!(self.out, "{}", render_table(rows, T::COLUMNS))?;
        Ok(())
    }

    fn print_success(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", message.green())?;
        Ok(())
    }

    async fn view_departments(&mut self) -> Result<()> {
        let rows = self.store.departments().await?;
        self.print_table::<Department>(&rows)
    }

    async fn view_roles(&mut self) -> Result<()> {
        let rows = self.store.role_listing().await?;
        self.print_table::<RoleListing>(&rows)
    }

    async fn view_employees(&mut self) -> Result<()> {
        let rows = self.store.employee_listing().await?;
        self.print_table::<EmployeeListing>(&rows)
    }

    async fn add_department(&mut self) -> Result<()> {
        let answers = self.prompt.ask(&[Question::input(
            "department_name",
            "Enter the name of the department:",
        )])?;
        let name = answers.text("department_name")?;

        self.store.insert_department(&name).await?;
        self.print_success("Department added successfully!")
    }

    async fn add_role(&mut self) -> Result<()> {
        let departments = self.store.departments().await?;

        let answers = self.prompt.ask(&[
            Question::input("title", "Enter the name of the role:"),
            Question::input("salary", "Enter the salary for the role:"),
            Question::select(
                "department_id",
                "Select the department for the role:",
                department_choices(&departments),
            ),
        ])?;
        let role = NewRole {
            title: answers.text("title")?,
            salary: answers.text("salary")?,
            department_id: answers.choice("department_id")?,
        };

        self.store.insert_role(&role).await?;
        self.print_success("Role added successfully!")
    }

    async fn add_employee(&mut self) -> Result<()> {
        let roles = self.store.roles().await?;
        let employees = self.store.employees().await?;

        let mut managers = vec![Choice::new("None", None)];
        managers.extend(employee_choices(&employees));

        let answers = self.prompt.ask(&[
            Question::input("first_name", "Enter the employee's first name:"),
            Question::input("last_name", "Enter the employee's last name:"),
            Question::select("role_id", "Select the employee's role:", role_choices(&roles)),
            Question::select("manager_id", "Select the employee's manager:", managers),
        ])?;
        let employee = NewEmployee {
            first_name: answers.text("first_name")?,
            last_name: answers.text("last_name")?,
            role_id: answers.choice("role_id")?,
            manager_id: answers.choice("manager_id")?,
        };

        self.store.insert_employee(&employee).await?;
        self.print_success("Employee added successfully!")
    }

    async fn update_employee_role(&mut self) -> Result<()> {
        let employees = self.store.employees().await?;
        let roles = self.store.roles().await?;

        let answers = self.prompt.ask(&[
            Question::select(
                "employee_id",
                "Select the employee to update:",
                employee_choices(&employees),
            ),
            Question::select("role_id", "Select the new role:", role_choices(&roles)),
        ])?;
        let employee_id = answers.required_choice("employee_id")?;
        let role_id = answers.required_choice("role_id")?;

        self.store.update_employee_role(employee_id, role_id).await?;
        self.print_success("Employee role updated successfully!")
    }
}
