//! staffdesk - Interactive Employee Tracker CLI
//!
//! staffdesk is a menu-driven command-line tool for managing a small
//! relational dataset of departments, roles, and employees in MySQL:
//! list records, insert new rows, reassign an employee's role.
//!
//! # Architecture
//! One component, the menu loop: open a single database connection, present
//! a fixed set of actions, dispatch the chosen action to a handler that
//! issues parameterized SQL and renders the result as a table, loop until
//! Exit. Errors propagate to the process boundary; there is no retry or
//! recovery flow.
//!
//! # Module Organization
//! - [`error`] - Error types and handling
//! - [`config`] - Connection configuration (files, environment, defaults)
//! - [`store`] - Single-connection MySQL data access
//! - [`menu`] - Menu loop, handlers, and picklists
//! - [`render`] - Table rendering for view handlers

pub mod config;
pub mod error;
pub mod menu;
pub mod render;
pub mod store;

// Re-export commonly used types for convenience
pub use config::DbConfig;
pub use error::{Result, StaffdeskError};
pub use menu::{MenuAction, Picklist};
pub use store::{Department, EmployeeOverview, EmployeeRef, RoleOverview, RoleRef, Store};
