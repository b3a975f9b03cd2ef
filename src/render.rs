//! Table Output
//!
//! View handlers hand their result rows to this module for rendering.
//! Rows derive `Tabled`; NULL columns render as empty cells.

use tabled::{Table, Tabled};

/// Render rows as a table string
///
/// An empty result set renders a "(no rows)" notice instead of a bare header.
#[must_use]
pub fn render<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(rows).to_string()
}

/// Print rows as a table to stdout
pub fn print_table<T: Tabled>(rows: &[T]) {
    println!("{}", render(rows));
}
