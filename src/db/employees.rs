use crate::db::db::Db;
use crate::db::record::Record;
use chrono::NaiveDate;
use rusqlite::params;
use serde::Serialize;

const INSERT_EMPLOYEE: &str = "INSERT INTO employee (fio, position_id, department_id, date_start) VALUES (?1, ?2, ?3, ?4)";
const DELETE_EMPLOYEE: &str = "DELETE FROM employee WHERE id = ?1";
const UPDATE_ASSIGNMENT: &str = "UPDATE employee SET department_id = ?1, position_id = ?2 WHERE id = ?3";
const SELECT_FIO: &str = "SELECT fio FROM employee WHERE fio = ?1";
const SELECT_ASSIGNMENT: &str = "SELECT department_id, position_id FROM employee WHERE employee.id = ?1";
const SELECT_EMPLOYEE_BY_ID: &str = "SELECT * FROM employee WHERE id = ?1";

// Employees whose department or position no longer exists are dropped by
// the inner joins. The counter join is a left join so employees that were
// never updated still show up with both counters at 1.
//
// `date('now') - date_start` subtracts two 'YYYY-MM-DD' strings; SQLite
// converts each to its leading integer, so the result is the difference of
// the calendar years, not of the dates.
const SELECT_EMPLOYEE_STATS: &str = "
    SELECT employee.id, employee.fio, department.department_name,
           position.position_name, employee.date_start,
           CASE WHEN count_dep IS NULL THEN 1 ELSE count_dep END AS count_dep,
           CASE WHEN count_pos IS NULL THEN 1 ELSE count_pos END AS count_pos,
           date('now') - date_start AS diff_year
    FROM employee
    INNER JOIN department ON employee.department_id = department.id
    INNER JOIN position ON employee.position_id = position.id
    LEFT JOIN count_dep_pos_employee ON employee.id = count_dep_pos_employee.employee_id
";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub id: i64,
    pub fio: String,
    pub position_id: i64,
    pub department_id: i64,
    pub date_start: NaiveDate,
}

impl TryFrom<&Record> for Employee {
    type Error = rusqlite::Error;

    fn try_from(record: &Record) -> rusqlite::Result<Self> {
        Ok(Employee {
            id: record.get("id")?,
            fio: record.get("fio")?,
            position_id: record.get("position_id")?,
            department_id: record.get("department_id")?,
            date_start: record.get("date_start")?,
        })
    }
}

/// Current department and position of one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub department_id: i64,
    pub position_id: i64,
}

/// A row of the employee listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeStats {
    pub id: i64,
    pub fio: String,
    pub department_name: String,
    pub position_name: String,
    pub date_start: NaiveDate,
    pub count_dep: i64,
    pub count_pos: i64,
    pub diff_year: i64,
}

impl TryFrom<&Record> for EmployeeStats {
    type Error = rusqlite::Error;

    fn try_from(record: &Record) -> rusqlite::Result<Self> {
        Ok(EmployeeStats {
            id: record.get("id")?,
            fio: record.get("fio")?,
            department_name: record.get("department_name")?,
            position_name: record.get("position_name")?,
            date_start: record.get("date_start")?,
            count_dep: record.get("count_dep")?,
            count_pos: record.get("count_pos")?,
            diff_year: record.get("diff_year")?,
        })
    }
}

pub struct Employees<'a> {
    db: &'a Db,
}

impl<'a> Employees<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    pub fn insert(&self, fio: &str, position_id: i64, department_id: i64, date_start: NaiveDate) -> rusqlite::Result<i64> {
        self.db.execute_mutation(INSERT_EMPLOYEE, params![fio, position_id, department_id, date_start])?;
        Ok(self.db.last_insert_id())
    }

    /// Exact, case-sensitive match on the full name.
    pub fn fio_exists(&self, fio: &str) -> rusqlite::Result<bool> {
        Ok(!self.db.execute_query(SELECT_FIO, params![fio])?.is_empty())
    }

    pub fn delete(&self, id: i64) -> rusqlite::Result<usize> {
        self.db.execute_mutation(DELETE_EMPLOYEE, params![id])
    }

    pub fn get(&self, id: i64) -> rusqlite::Result<Option<Employee>> {
        self.db.execute_query(SELECT_EMPLOYEE_BY_ID, params![id])?.first().map(Employee::try_from).transpose()
    }

    /// Department and position of a single employee, `None` if the id is
    /// unknown.
    pub fn get_single(&self, id: i64) -> rusqlite::Result<Option<Assignment>> {
        self.db
            .execute_query(SELECT_ASSIGNMENT, params![id])?
            .first()
            .map(|row| {
                Ok(Assignment {
                    department_id: row.get("department_id")?,
                    position_id: row.get("position_id")?,
                })
            })
            .transpose()
    }

    pub fn update_assignment(&self, id: i64, assignment: Assignment) -> rusqlite::Result<usize> {
        self.db.execute_mutation(UPDATE_ASSIGNMENT, params![assignment.department_id, assignment.position_id, id])
    }

    pub fn list_with_stats(&self) -> rusqlite::Result<Vec<EmployeeStats>> {
        self.db.execute_query(SELECT_EMPLOYEE_STATS, [])?.iter().map(EmployeeStats::try_from).collect()
    }
}
