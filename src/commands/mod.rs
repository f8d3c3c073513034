//! Command-line interface.
//!
//! ```text
//! staffdesk serve [--bind ADDR]                 run the web site
//! staffdesk init                                configuration wizard
//! staffdesk adduser <USERNAME>                  create an account
//! staffdesk list positions|departments|employees
//! staffdesk migrations status|history
//! ```

pub mod adduser;
pub mod init;
pub mod list;
pub mod migrations;
pub mod serve;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Run the web server")]
    Serve(serve::ServeArgs),
    #[command(about = "Configuration initialization")]
    Init,
    #[command(about = "Create a user account")]
    Adduser(adduser::AdduserArgs),
    #[command(about = "Print positions, departments or employees", arg_required_else_help = true)]
    List(list::ListArgs),
    #[command(about = "Inspect database migrations", arg_required_else_help = true)]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Serve(args) => serve::cmd(args).await,
            Commands::Init => init::cmd(),
            Commands::Adduser(args) => adduser::cmd(args),
            Commands::List(args) => list::cmd(args),
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}
