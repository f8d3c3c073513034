use crate::db::db::Db;
use crate::db::record::Record;
use rusqlite::params;
use serde::Serialize;

const INSERT_DEPARTMENT: &str = "INSERT INTO department (department_name, parent_id) VALUES (?1, ?2)";
const DELETE_DEPARTMENT: &str = "DELETE FROM department WHERE id = ?1";
const SELECT_ALL_DEPARTMENTS: &str = "SELECT * FROM department";

// Walks from the roots down through child links only. Every department has
// a single parent_id, so rows reachable from a root form a tree and the
// recursion ends; departments caught in a parent_id cycle, or whose parent
// was deleted, are never reached.
const SELECT_HIERARCHY: &str = "
    WITH RECURSIVE hierarchy(id, department_name, parent_id, level_parent) AS (
        SELECT id, department_name, parent_id, 0
        FROM department
        WHERE parent_id IS NULL
        UNION ALL
        SELECT d.id, d.department_name, d.parent_id, h.level_parent + 1
        FROM department d
        JOIN hierarchy h ON d.parent_id = h.id
    )
    SELECT h.id, h.department_name, h.parent_id, h.level_parent AS LevelParent,
           (SELECT COUNT(*) FROM employee e WHERE e.department_id = h.id) AS employee_count
    FROM hierarchy h
    ORDER BY h.level_parent, h.id
";

/// Selection-list id meaning "no parent department".
pub const NO_PARENT_ID: i64 = 0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Department {
    pub id: i64,
    pub department_name: String,
    pub parent_id: Option<i64>,
}

impl TryFrom<&Record> for Department {
    type Error = rusqlite::Error;

    fn try_from(record: &Record) -> rusqlite::Result<Self> {
        Ok(Department {
            id: record.get("id")?,
            department_name: record.get("department_name")?,
            parent_id: record.get("parent_id")?,
        })
    }
}

/// One row of the hierarchy statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentLevel {
    pub id: i64,
    pub department_name: String,
    pub parent_id: Option<i64>,
    /// Depth below the root; roots are level 0.
    pub level: i64,
    pub employee_count: i64,
}

impl TryFrom<&Record> for DepartmentLevel {
    type Error = rusqlite::Error;

    fn try_from(record: &Record) -> rusqlite::Result<Self> {
        Ok(DepartmentLevel {
            id: record.get("id")?,
            department_name: record.get("department_name")?,
            parent_id: record.get("parent_id")?,
            level: record.get("LevelParent")?,
            employee_count: record.get("employee_count")?,
        })
    }
}

pub struct Departments<'a> {
    db: &'a Db,
}

impl<'a> Departments<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// Inserts a department. `parent_id` of `None` or [`NO_PARENT_ID`] makes
    /// it a root.
    pub fn insert(&self, department_name: &str, parent_id: Option<i64>) -> rusqlite::Result<i64> {
        let parent_id = parent_id.filter(|id| *id != NO_PARENT_ID);
        self.db.execute_mutation(INSERT_DEPARTMENT, params![department_name, parent_id])?;
        Ok(self.db.last_insert_id())
    }

    /// Deletes exactly one department. Children keep their `parent_id` and
    /// drop out of the hierarchy until re-parented.
    pub fn delete(&self, id: i64) -> rusqlite::Result<usize> {
        self.db.execute_mutation(DELETE_DEPARTMENT, params![id])
    }

    pub fn list(&self) -> rusqlite::Result<Vec<Department>> {
        self.db.execute_query(SELECT_ALL_DEPARTMENTS, [])?.iter().map(Department::try_from).collect()
    }


    /// `(id, department_name)` pairs for selection lists, in storage order.
    pub fn choices(&self) -> rusqlite::Result<Vec<(i64, String)>> {
        self.db
            .execute_query(SELECT_ALL_DEPARTMENTS, [])?
            .iter()
            .map(|row| Ok((row.get("id")?, row.get("department_name")?)))
            .collect()
    }

    /// Departments reachable from the roots, annotated with their depth and
    /// head count, shallowest first.
    pub fn hierarchy(&self) -> rusqlite::Result<Vec<DepartmentLevel>> {
        self.db.execute_query(SELECT_HIERARCHY, [])?.iter().map(DepartmentLevel::try_from).collect()
    }
}
