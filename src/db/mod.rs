//! Database layer.
//!
//! A thin layer over SQLite: [`db::Db`] owns one connection and exposes the
//! two primitives everything else is built on, `execute_query` (rows as
//! [`record::Record`]s) and `execute_mutation` (affected row count). Each
//! table has a small store that keeps its SQL in constants and converts
//! records into typed structs.
//!
//! ```rust,no_run
//! use staffdesk::db::{db::Db, departments::Departments, positions::Positions};
//!
//! let db = Db::init("staffdesk.db")?;
//! Positions::new(&db).insert("Engineer", "Builds things")?;
//! let tree = Departments::new(&db).hierarchy()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection handling and the query/mutation primitives.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Untyped result rows with by-name column access.
pub mod record;

pub mod counters;
pub mod departments;
pub mod employees;
pub mod positions;
pub mod users;
