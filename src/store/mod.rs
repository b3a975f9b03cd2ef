//! MySQL Data Access
//!
//! This module owns the single database connection used by the menu loop and
//! exposes one method per SQL statement the tool issues. The connection is
//! opened once at startup, reused across handlers, and released at quit.
//!
//! # Implementation Notes
//! - Uses `mysql_async` (async driver, requires tokio runtime)
//! - All statements are parameterized; values never interpolate into SQL text
//! - The employee view resolves the manager name with a self-join of
//!   `employees` against itself
//! - DECIMAL salaries arrive as bytes from the wire and parse into `f64`

use log::{debug, info};
use mysql_async::{prelude::*, Conn, OptsBuilder, Row};
use tabled::Tabled;

use crate::config::DbConfig;
use crate::error::{Result, StaffdeskError};

/// A department row
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct Department {
    pub id: i32,
    pub name: String,
}

/// A role row joined with its department name
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct RoleOverview {
    pub id: i32,
    pub title: String,
    pub department: String,
    #[tabled(display_with = "display_salary")]
    pub salary: f64,
}

/// Minimal role row for picklists
#[derive(Debug, Clone, PartialEq)]
pub struct RoleRef {
    pub id: i32,
    pub title: String,
}

/// Minimal employee row for picklists
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRef {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl EmployeeRef {
    /// Display name used in picklists and the manager column
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An employee row joined with role, department, and manager name
///
/// Role, department, and salary are `None` when the employee has no role
/// assigned; manager is `None` when `manager_id` is NULL.
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct EmployeeOverview {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[tabled(display_with = "display_opt")]
    pub title: Option<String>,
    #[tabled(display_with = "display_opt")]
    pub department: Option<String>,
    #[tabled(display_with = "display_opt_salary")]
    pub salary: Option<f64>,
    #[tabled(display_with = "display_opt")]
    pub manager: Option<String>,
}

fn display_salary(salary: &f64) -> String {
    format!("{salary:.2}")
}

fn display_opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn display_opt_salary(value: &Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

/// Extract a column value from a row by index
///
/// Works for nullable columns too: pass `Option<T>` as the target type.
fn column<T: FromValue>(row: &Row, idx: usize, name: &str) -> Result<T> {
    row.get(idx).ok_or_else(|| {
        StaffdeskError::query_failed(format!("Failed to extract column `{name}`"))
    })
}

/// The single-connection data store backing all menu handlers
pub struct Store {
    conn: Conn,
}

impl Store {
    /// Open the database connection
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let opts = OptsBuilder::default()
            .ip_or_hostname(config.host.as_str())
            .tcp_port(config.port)
            .user(Some(config.user.as_str()))
            .pass(Some(config.password.as_str()))
            .db_name(Some(config.database.as_str()));

        let mut conn = Conn::new(opts).await.map_err(|e| {
            StaffdeskError::connection_failed(format!("Failed to connect to MySQL: {e}"))
        })?;

        let version: Option<String> = conn.query_first("SELECT VERSION()").await.map_err(|e| {
            StaffdeskError::connection_failed(format!("Failed to query MySQL version: {e}"))
        })?;

        info!(
            "connected to MySQL {} at {}:{}/{}",
            version.as_deref().unwrap_or("unknown"),
            config.host,
            config.port,
            config.database
        );

        Ok(Self { conn })
    }

    /// Release the connection cleanly
    pub async fn disconnect(self) -> Result<()> {
        debug!("disconnecting from MySQL");
        self.conn.disconnect().await.map_err(|e| {
            StaffdeskError::connection_failed(format!("Failed to disconnect: {e}"))
        })
    }

    /// List all departments
    pub async fn departments(&mut self) -> Result<Vec<Department>> {
        let rows: Vec<Row> = self
            .conn
            .query("SELECT id, name FROM departments ORDER BY id")
            .await
            .map_err(|e| {
                StaffdeskError::query_failed(format!("Failed to list departments: {e}"))
            })?;

        rows.iter()
            .map(|row| {
                Ok(Department {
                    id: column(row, 0, "id")?,
                    name: column(row, 1, "name")?,
                })
            })
            .collect()
    }

    /// List all roles with their department name and salary
    pub async fn roles(&mut self) -> Result<Vec<RoleOverview>> {
        let query = "SELECT roles.id, roles.title, departments.name AS department, roles.salary
                     FROM roles
                     JOIN departments ON roles.department_id = departments.id
                     ORDER BY roles.id";

        let rows: Vec<Row> = self.conn.query(query).await.map_err(|e| {
            StaffdeskError::query_failed(format!("Failed to list roles: {e}"))
        })?;

        rows.iter()
            .map(|row| {
                Ok(RoleOverview {
                    id: column(row, 0, "id")?,
                    title: column(row, 1, "title")?,
                    department: column(row, 2, "department")?,
                    salary: column(row, 3, "salary")?,
                })
            })
            .collect()
    }

    /// List all employees with role, department, salary, and manager name
    ///
    /// Three-way LEFT JOIN so employees without a role still appear, plus a
    /// self-join resolving the manager's display name. The manager column is
    /// NULL exactly when `manager_id` is NULL.
    pub async fn employees(&mut self) -> Result<Vec<EmployeeOverview>> {
        let query = "SELECT employees.id, employees.first_name, employees.last_name,
                            roles.title, departments.name AS department, roles.salary,
                            CONCAT(managers.first_name, ' ', managers.last_name) AS manager
                     FROM employees
                     LEFT JOIN roles ON employees.role_id = roles.id
                     LEFT JOIN departments ON roles.department_id = departments.id
                     LEFT JOIN employees AS managers ON employees.manager_id = managers.id
                     ORDER BY employees.id";

        let rows: Vec<Row> = self.conn.query(query).await.map_err(|e| {
            StaffdeskError::query_failed(format!("Failed to list employees: {e}"))
        })?;

        rows.iter()
            .map(|row| {
                Ok(EmployeeOverview {
                    id: column(row, 0, "id")?,
                    first_name: column(row, 1, "first_name")?,
                    last_name: column(row, 2, "last_name")?,
                    title: column(row, 3, "title")?,
                    department: column(row, 4, "department")?,
                    salary: column(row, 5, "salary")?,
                    manager: column(row, 6, "manager")?,
                })
            })
            .collect()
    }

    /// List roles in picklist form (id and title only)
    pub async fn role_refs(&mut self) -> Result<Vec<RoleRef>> {
        let rows: Vec<Row> = self
            .conn
            .query("SELECT id, title FROM roles ORDER BY id")
            .await
            .map_err(|e| StaffdeskError::query_failed(format!("Failed to list roles: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(RoleRef {
                    id: column(row, 0, "id")?,
                    title: column(row, 1, "title")?,
                })
            })
            .collect()
    }

    /// List employees in picklist form (id and name only)
    pub async fn employee_refs(&mut self) -> Result<Vec<EmployeeRef>> {
        let rows: Vec<Row> = self
            .conn
            .query("SELECT id, first_name, last_name FROM employees ORDER BY id")
            .await
            .map_err(|e| {
                StaffdeskError::query_failed(format!("Failed to list employees: {e}"))
            })?;

        rows.iter()
            .map(|row| {
                Ok(EmployeeRef {
                    id: column(row, 0, "id")?,
                    first_name: column(row, 1, "first_name")?,
                    last_name: column(row, 2, "last_name")?,
                })
            })
            .collect()
    }

    /// Insert a department
    pub async fn insert_department(&mut self, name: &str) -> Result<()> {
        self.conn
            .exec_drop("INSERT INTO departments (name) VALUES (?)", (name,))
            .await
            .map_err(|e| {
                StaffdeskError::query_failed(format!("Failed to insert department: {e}"))
            })?;
        debug!("inserted department {name:?}");
        Ok(())
    }

    /// Insert a role referencing an existing department
    pub async fn insert_role(
        &mut self,
        title: &str,
        salary: f64,
        department_id: i32,
    ) -> Result<()> {
        self.conn
            .exec_drop(
                "INSERT INTO roles (title, salary, department_id) VALUES (?, ?, ?)",
                (title, salary, department_id),
            )
            .await
            .map_err(|e| StaffdeskError::query_failed(format!("Failed to insert role: {e}")))?;
        debug!("inserted role {title:?} in department {department_id}");
        Ok(())
    }

    /// Insert an employee
    ///
    /// `manager_id` of `None` stores a NULL manager reference.
    pub async fn insert_employee(
        &mut self,
        first_name: &str,
        last_name: &str,
        role_id: i32,
        manager_id: Option<i32>,
    ) -> Result<()> {
        self.conn
            .exec_drop(
                "INSERT INTO employees (first_name, last_name, role_id, manager_id)
                 VALUES (?, ?, ?, ?)",
                (first_name, last_name, role_id, manager_id),
            )
            .await
            .map_err(|e| {
                StaffdeskError::query_failed(format!("Failed to insert employee: {e}"))
            })?;
        debug!("inserted employee {first_name} {last_name}");
        Ok(())
    }

    /// Reassign an employee's role, scoped by employee id
    pub async fn update_employee_role(&mut self, employee_id: i32, role_id: i32) -> Result<()> {
        self.conn
            .exec_drop(
                "UPDATE employees SET role_id = ? WHERE id = ?",
                (role_id, employee_id),
            )
            .await
            .map_err(|e| {
                StaffdeskError::query_failed(format!("Failed to update employee role: {e}"))
            })?;
        debug!("updated employee {employee_id} to role {role_id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_name() {
        let emp = EmployeeRef {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };
        assert_eq!(emp.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_salary_display() {
        assert_eq!(display_salary(&60000.0), "60000.00");
        assert_eq!(display_opt_salary(&Some(85000.5)), "85000.50");
        assert_eq!(display_opt_salary(&None), "");
    }

    #[test]
    fn test_optional_display() {
        assert_eq!(display_opt(&Some("Ada Lovelace".to_string())), "Ada Lovelace");
        assert_eq!(display_opt(&None), "");
    }

    // Note: connection-dependent tests live in tests/live_roundtrip.rs and
    // are marked #[ignore]; they require a running MySQL instance.
}
