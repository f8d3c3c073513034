//! # Staffdesk
//!
//! A small web application for administering an organization's staff:
//! positions, a tree of departments and the employees assigned to them.
//!
//! ## Features
//!
//! - **Accounts**: registration and login with bcrypt password hashes and a
//!   signed session cookie
//! - **Positions and departments**: add, list and delete; departments form a
//!   hierarchy with per-level statistics
//! - **Employees**: add, reassign and delete, with a tally of how often each
//!   employee changed position or department
//! - **CLI**: serve the site, initialize configuration, create users and
//!   print the registers as terminal tables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use staffdesk::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod web;
