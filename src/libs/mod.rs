//! Core library modules for staffdesk.
//!
//! Everything here is independent of HTTP: configuration, the data
//! directory, user-facing messages, password hashing, the account and staff
//! workflows, and terminal tables for the CLI.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use staffdesk::db::db::Db;
//! use staffdesk::libs::{config::Config, staff};
//!
//! let config = Config::read()?;
//! let db = Db::init(&config.database)?;
//! let today = chrono::Local::now().date_naive();
//! staff::add_employee(&db, "Ivanov I.I.", 1, 1, today)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod account;
pub mod config;
pub mod data_storage;
pub mod messages;
pub mod password;
pub mod staff;
pub mod view;
