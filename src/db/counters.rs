use crate::db::db::Db;
use crate::db::record::Record;
use rusqlite::params;
use serde::Serialize;

const INSERT_COUNTER: &str = "INSERT INTO count_dep_pos_employee (employee_id) VALUES (?1)";
const SELECT_COUNTER: &str = "SELECT * FROM count_dep_pos_employee WHERE employee_id = ?1";
const INCREMENT_COUNT_DEP: &str = "UPDATE count_dep_pos_employee SET count_dep = count_dep + 1 WHERE employee_id = ?1";
const INCREMENT_COUNT_POS: &str = "UPDATE count_dep_pos_employee SET count_pos = count_pos + 1 WHERE employee_id = ?1";

/// Per-employee tally of assignment changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangeCounter {
    pub employee_id: i64,
    pub count_dep: i64,
    pub count_pos: i64,
}

impl TryFrom<&Record> for ChangeCounter {
    type Error = rusqlite::Error;

    fn try_from(record: &Record) -> rusqlite::Result<Self> {
        Ok(ChangeCounter {
            employee_id: record.get("employee_id")?,
            count_dep: record.get("count_dep")?,
            count_pos: record.get("count_pos")?,
        })
    }
}

pub struct Counters<'a> {
    db: &'a Db,
}

impl<'a> Counters<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    pub fn get(&self, employee_id: i64) -> rusqlite::Result<Option<ChangeCounter>> {
        self.db.execute_query(SELECT_COUNTER, params![employee_id])?.first().map(ChangeCounter::try_from).transpose()
    }

    /// Creates the row with the storage defaults (both counters at 1).
    pub fn create(&self, employee_id: i64) -> rusqlite::Result<()> {
        self.db.execute_mutation(INSERT_COUNTER, params![employee_id])?;
        Ok(())
    }

    pub fn increment_count_dep(&self, employee_id: i64) -> rusqlite::Result<()> {
        self.db.execute_mutation(INCREMENT_COUNT_DEP, params![employee_id])?;
        Ok(())
    }

    pub fn increment_count_pos(&self, employee_id: i64) -> rusqlite::Result<()> {
        self.db.execute_mutation(INCREMENT_COUNT_POS, params![employee_id])?;
        Ok(())
    }
}
