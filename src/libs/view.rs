use crate::db::departments::DepartmentLevel;
use crate::db::employees::EmployeeStats;
use crate::db::positions::Position;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn positions(positions: &[Position]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "DESCRIPTION"]);
        for position in positions {
            table.add_row(row![position.id, position.position_name, position.description]);
        }
        table.printstd();
    }

    /// Prints the hierarchy with names indented by depth.
    pub fn departments(levels: &[DepartmentLevel]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "DEPARTMENT", "PARENT", "LEVEL", "EMPLOYEES"]);
        for level in levels {
            let indent = "  ".repeat(level.level.max(0) as usize);
            table.add_row(row![
                level.id,
                format!("{}{}", indent, level.department_name),
                level.parent_id.map(|id| id.to_string()).unwrap_or_default(),
                level.level,
                level.employee_count
            ]);
        }
        table.printstd();
    }

    pub fn employees(employees: &[EmployeeStats]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "FIO", "DEPARTMENT", "POSITION", "SINCE", "YEARS", "DEP CHANGES", "POS CHANGES"]);
        for employee in employees {
            table.add_row(row![
                employee.id,
                employee.fio,
                employee.department_name,
                employee.position_name,
                employee.date_start,
                employee.diff_year,
                employee.count_dep,
                employee.count_pos
            ]);
        }
        table.printstd();
    }
}
