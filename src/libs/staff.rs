//! Employee workflows that span more than one statement.
//!
//! ## Change counters
//!
//! Every update of an employee's assignment makes sure a
//! `count_dep_pos_employee` row exists (both counters start at 1) and then
//! bumps a counter for each changed field:
//!
//! | Changed field | Counter incremented |
//! |---------------|---------------------|
//! | position      | `count_dep`         |
//! | department    | `count_pos`         |
//!
//! Note that the column names read the other way round (see DESIGN.md).

use crate::db::counters::{ChangeCounter, Counters};
use crate::db::db::Db;
use crate::db::employees::{Assignment, Employees};
use crate::libs::messages::Message;
use crate::msg_debug;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddEmployeeOutcome {
    Added(i64),
    DuplicateFio,
}

/// Inserts an employee unless one with exactly the same `fio` exists.
pub fn add_employee(db: &Db, fio: &str, position_id: i64, department_id: i64, date_start: NaiveDate) -> rusqlite::Result<AddEmployeeOutcome> {
    let employees = Employees::new(db);
    if employees.fio_exists(fio)? {
        return Ok(AddEmployeeOutcome::DuplicateFio);
    }
    let id = employees.insert(fio, position_id, department_id, date_start)?;
    Ok(AddEmployeeOutcome::Added(id))
}

/// Moves an employee to `submitted` and maintains the change counters.
///
/// Returns the counters after the update, or `None` when the employee does
/// not exist (nothing is written in that case).
pub fn update_employee(db: &Db, employee_id: i64, submitted: Assignment) -> rusqlite::Result<Option<ChangeCounter>> {
    let employees = Employees::new(db);
    let Some(previous) = employees.get_single(employee_id)? else {
        return Ok(None);
    };

    employees.update_assignment(employee_id, submitted)?;

    let counters = Counters::new(db);
    if counters.get(employee_id)?.is_none() {
        counters.create(employee_id)?;
        msg_debug!(Message::CounterCreated(employee_id));
    }
    count_add(&counters, employee_id, previous, submitted)?;

    counters.get(employee_id)
}

fn count_add(counters: &Counters, employee_id: i64, previous: Assignment, submitted: Assignment) -> rusqlite::Result<()> {
    if previous.position_id != submitted.position_id {
        counters.increment_count_dep(employee_id)?;
    }
    if previous.department_id != submitted.department_id {
        counters.increment_count_pos(employee_id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::departments::Departments;
    use crate::db::positions::Positions;

    struct Fixture {
        db: Db,
        _temp_dir: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        let temp_dir = tempfile::tempdir().unwrap();
        let db = Db::init(temp_dir.path().join("staffdesk.db")).unwrap();
        Fixture { db, _temp_dir: temp_dir }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 4, 1).unwrap()
    }

    #[test]
    fn duplicate_fio_is_refused() {
        let f = fixture();
        let pos = Positions::new(&f.db).insert("Engineer", "dev").unwrap();
        let dep = Departments::new(&f.db).insert("R&D", None).unwrap();

        assert!(matches!(add_employee(&f.db, "Ivanov I.I.", pos, dep, date()).unwrap(), AddEmployeeOutcome::Added(_)));
        assert_eq!(add_employee(&f.db, "Ivanov I.I.", pos, dep, date()).unwrap(), AddEmployeeOutcome::DuplicateFio);
        // Case matters.
        assert!(matches!(add_employee(&f.db, "ivanov i.i.", pos, dep, date()).unwrap(), AddEmployeeOutcome::Added(_)));
    }

    #[test]
    fn unchanged_update_only_creates_the_counter() {
        let f = fixture();
        let pos = Positions::new(&f.db).insert("Engineer", "dev").unwrap();
        let dep = Departments::new(&f.db).insert("R&D", None).unwrap();
        let AddEmployeeOutcome::Added(id) = add_employee(&f.db, "Petrov", pos, dep, date()).unwrap() else {
            panic!("employee not added");
        };

        let counter = update_employee(&f.db, id, Assignment { department_id: dep, position_id: pos }).unwrap().unwrap();
        assert_eq!((counter.count_dep, counter.count_pos), (1, 1));
    }

    #[test]
    fn position_change_bumps_count_dep() {
        let f = fixture();
        let positions = Positions::new(&f.db);
        let engineer = positions.insert("Engineer", "dev").unwrap();
        let lead = positions.insert("Lead", "leads").unwrap();
        let dep = Departments::new(&f.db).insert("R&D", None).unwrap();
        let AddEmployeeOutcome::Added(id) = add_employee(&f.db, "Sidorov", engineer, dep, date()).unwrap() else {
            panic!("employee not added");
        };

        let counter = update_employee(&f.db, id, Assignment { department_id: dep, position_id: lead }).unwrap().unwrap();
        assert_eq!((counter.count_dep, counter.count_pos), (2, 1));
    }

    #[test]
    fn unknown_employee_writes_nothing() {
        let f = fixture();

        assert!(update_employee(&f.db, 42, Assignment { department_id: 1, position_id: 1 }).unwrap().is_none());
        assert!(Counters::new(&f.db).get(42).unwrap().is_none());
    }
}
