use crate::{
    db::{db::Db, departments::Departments, employees::Employees, positions::Positions},
    libs::{config::Config, messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(subcommand)]
    command: ListCommand,
}

#[derive(Debug, Subcommand)]
enum ListCommand {
    /// All positions
    Positions,
    /// Department hierarchy with levels and head counts
    Departments,
    /// Employees with service years and change counters
    Employees,
}

pub fn cmd(args: ListArgs) -> Result<()> {
    let config = Config::read()?;
    let db = Db::init(&config.database)?;

    match args.command {
        ListCommand::Positions => {
            let positions = Positions::new(&db).list()?;
            if positions.is_empty() {
                msg_info!(Message::NoPositions);
                return Ok(());
            }
            msg_print!(Message::PositionsHeader, true);
            View::positions(&positions);
        }
        ListCommand::Departments => {
            let hierarchy = Departments::new(&db).hierarchy()?;
            if hierarchy.is_empty() {
                msg_info!(Message::NoDepartments);
                return Ok(());
            }
            msg_print!(Message::DepartmentsHeader, true);
            View::departments(&hierarchy);
        }
        ListCommand::Employees => {
            let employees = Employees::new(&db).list_with_stats()?;
            if employees.is_empty() {
                msg_info!(Message::NoEmployees);
                return Ok(());
            }
            msg_print!(Message::EmployeesHeader, true);
            View::employees(&employees);
        }
    }

    Ok(())
}
