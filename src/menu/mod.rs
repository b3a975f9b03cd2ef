//! Menu Loop and Handlers
//!
//! The one component of the tool: present a fixed list of actions, dispatch
//! the chosen one to its handler, loop until Exit. Each handler runs to
//! completion (query, prompt, query) before the next menu read; no two
//! database operations are ever in flight at once.
//!
//! # Picklists
//! Add/update handlers derive their selection prompts from prior query
//! results: roles are chosen by title, departments by name, managers by
//! "first last" with a leading "None" sentinel that maps to SQL NULL.

use dialoguer::{theme::ColorfulTheme, Input, Select};
use log::debug;

use crate::error::{Result, StaffdeskError};
use crate::render;
use crate::store::Store;

/// The fixed set of menu actions, in display order
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
    /// All actions in menu order
    pub const ALL: [Self; 8] = [
        Self::ViewDepartments,
        Self::ViewRoles,
        Self::ViewEmployees,
        Self::AddDepartment,
        Self::AddRole,
        Self::AddEmployee,
        Self::UpdateEmployeeRole,
        Self::Exit,
    ];

    /// Display label for the menu
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ViewDepartments => "View all departments",
            Self::ViewRoles => "View all roles",
            Self::ViewEmployees => "View all employees",
            Self::AddDepartment => "Add a department",
            Self::AddRole => "Add a role",
            Self::AddEmployee => "Add an employee",
            Self::UpdateEmployeeRole => "Update an employee role",
            Self::Exit => "Exit",
        }
    }

    /// Look up an action by its display label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.label() == label)
    }

    /// All display labels in menu order
    #[must_use]
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::label).collect()
    }
}

/// A selection prompt whose choices come from a prior query's result rows
///
/// Keeps labels and values in parallel, in source-row order; a selection
/// index maps back to the value at the same position.
pub struct Picklist<T> {
    labels: Vec<String>,
    values: Vec<T>,
}

impl<T> Picklist<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { labels: Vec::new(), values: Vec::new() }
    }

    pub fn push(&mut self, label: impl Into<String>, value: T) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Value at a selection index
    #[must_use]
    pub fn value(&self, idx: usize) -> Option<&T> {
        self.values.get(idx)
    }

    /// Prompt the user to pick one entry
    ///
    /// An empty picklist is an invalid-input error; the prompt is never
    /// shown with zero choices.
    pub fn select(&self, prompt: &str) -> Result<&T> {
        if self.is_empty() {
            return Err(StaffdeskError::invalid_input(format!(
                "No choices available for \"{prompt}\""
            )));
        }

        let idx = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(&self.labels)
            .default(0)
            .interact()?;

        Ok(&self.values[idx])
    }
}

impl<T> Default for Picklist<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the menu loop until the user chooses Exit
pub async fn run(store: &mut Store) -> Result<()> {
    loop {
        let idx = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to do?")
            .items(&MenuAction::labels())
            .default(0)
            .interact()?;
        let action = MenuAction::ALL[idx];
        debug!("menu action: {action:?}");

        match action {
            MenuAction::ViewDepartments => view_departments(store).await?,
            MenuAction::ViewRoles => view_roles(store).await?,
            MenuAction::ViewEmployees => view_employees(store).await?,
            MenuAction::AddDepartment => add_department(store).await?,
            MenuAction::AddRole => add_role(store).await?,
            MenuAction::AddEmployee => add_employee(store).await?,
            MenuAction::UpdateEmployeeRole => update_employee_role(store).await?,
            MenuAction::Exit => break,
        }
    }

    Ok(())
}

fn text_prompt(prompt: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?)
}

fn salary_prompt(prompt: &str) -> Result<f64> {
    // dialoguer re-prompts on unparseable input; no further validation
    Ok(Input::<f64>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?)
}

async fn view_departments(store: &mut Store) -> Result<()> {
    let rows = store.departments().await?;
    render::print_table(&rows);
    Ok(())
}

async fn view_roles(store: &mut Store) -> Result<()> {
    let rows = store.roles().await?;
    render::print_table(&rows);
    Ok(())
}

async fn view_employees(store: &mut Store) -> Result<()> {
    let rows = store.employees().await?;
    render::print_table(&rows);
    Ok(())
}

async fn add_department(store: &mut Store) -> Result<()> {
    let name = text_prompt("Enter the department name:")?;
    store.insert_department(&name).await?;
    println!("Added department: {name}");
    Ok(())
}

async fn add_role(store: &mut Store) -> Result<()> {
    let departments = store.departments().await?;
    let mut picklist = Picklist::new();
    for department in &departments {
        picklist.push(department.name.clone(), department.id);
    }

    let title = text_prompt("Enter the role title:")?;
    let salary = salary_prompt("Enter the role salary:")?;
    let department_id = *picklist.select("Select the department:")?;

    store.insert_role(&title, salary, department_id).await?;
    println!("Added role: {title}");
    Ok(())
}

async fn add_employee(store: &mut Store) -> Result<()> {
    let roles = store.role_refs().await?;
    let employees = store.employee_refs().await?;

    let mut role_picklist = Picklist::new();
    for role in &roles {
        role_picklist.push(role.title.clone(), role.id);
    }

    // "None" sentinel first, mapping to a NULL manager reference
    let mut manager_picklist: Picklist<Option<i32>> = Picklist::new();
    manager_picklist.push("None", None);
    for employee in &employees {
        manager_picklist.push(employee.full_name(), Some(employee.id));
    }

    let first_name = text_prompt("Enter the employee's first name:")?;
    let last_name = text_prompt("Enter the employee's last name:")?;
    let role_id = *role_picklist.select("Select the role:")?;
    let manager_id = *manager_picklist.select("Select the manager:")?;

    store
        .insert_employee(&first_name, &last_name, role_id, manager_id)
        .await?;
    println!("Added employee: {first_name} {last_name}");
    Ok(())
}

async fn update_employee_role(store: &mut Store) -> Result<()> {
    let employees = store.employee_refs().await?;
    let roles = store.role_refs().await?;

    let mut employee_picklist = Picklist::new();
    for employee in &employees {
        employee_picklist.push(employee.full_name(), employee.id);
    }

    let mut role_picklist = Picklist::new();
    for role in &roles {
        role_picklist.push(role.title.clone(), role.id);
    }

    let employee_id = *employee_picklist.select("Select the employee to update:")?;
    let role_id = *role_picklist.select("Select the new role:")?;

    store.update_employee_role(employee_id, role_id).await?;
    println!("Updated employee role.");
    Ok(())
}
