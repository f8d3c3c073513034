use crate::db::db::Db;
use crate::db::record::Record;
use rusqlite::params;
use serde::Serialize;

const INSERT_POSITION: &str = "INSERT INTO position (position_name, description) VALUES (?1, ?2)";
const DELETE_POSITION: &str = "DELETE FROM position WHERE id = ?1";
const SELECT_ALL_POSITIONS: &str = "SELECT * FROM position";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    pub id: i64,
    pub position_name: String,
    pub description: String,
}

impl TryFrom<&Record> for Position {
    type Error = rusqlite::Error;

    fn try_from(record: &Record) -> rusqlite::Result<Self> {
        Ok(Position {
            id: record.get("id")?,
            position_name: record.get("position_name")?,
            description: record.get("description")?,
        })
    }
}

pub struct Positions<'a> {
    db: &'a Db,
}

impl<'a> Positions<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    pub fn insert(&self, position_name: &str, description: &str) -> rusqlite::Result<i64> {
        self.db.execute_mutation(INSERT_POSITION, params![position_name, description])?;
        Ok(self.db.last_insert_id())
    }

    /// Deletes one position. Employees holding it keep the dangling id.
    pub fn delete(&self, id: i64) -> rusqlite::Result<usize> {
        self.db.execute_mutation(DELETE_POSITION, params![id])
    }

    /// All positions in storage order.
    pub fn list(&self) -> rusqlite::Result<Vec<Position>> {
        self.db.execute_query(SELECT_ALL_POSITIONS, [])?.iter().map(Position::try_from).collect()
    }


    /// `(id, position_name)` pairs for selection lists, in storage order.
    pub fn choices(&self) -> rusqlite::Result<Vec<(i64, String)>> {
        self.db
            .execute_query(SELECT_ALL_POSITIONS, [])?
            .iter()
            .map(|row| Ok((row.get("id")?, row.get("position_name")?)))
            .collect()
    }
}
