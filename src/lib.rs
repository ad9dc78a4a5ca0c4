//! Build SQL statements from fragments with positional (`?`) and named
//! (`@name`) parameters, run them through a driver and bind the rows into
//! records, maps, vectors and scalars.
//!
//! ```rust,no_run
//! use weld::{Executor, Record, Statement};
//!
//! #[derive(Record, Default)]
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! async fn active_users<E: Executor>(executor: &mut E, ids: Vec<i64>) -> weld::Result<Vec<User>> {
//!     let mut users = Vec::new();
//!     Statement::new()
//!         .q("SELECT id, name FROM users")
//!         .q_args("WHERE id IN (?)", (ids,))
//!         .q_if(true, "AND active = ?", (true,))
//!         .exec(executor, &mut users)
//!         .await?;
//!     Ok(users)
//! }
//! ```

pub use weld_core::*;
pub use weld_macros::*;
