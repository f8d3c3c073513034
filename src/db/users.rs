use crate::db::db::Db;
use crate::db::record::Record;
use rusqlite::params;
use serde::Serialize;

const INSERT_USER: &str = "INSERT INTO user (username, password_hash) VALUES (?1, ?2)";
const SELECT_USER_BY_NAME: &str = "SELECT * FROM user WHERE username = ?1";
const SELECT_USER_BY_ID: &str = "SELECT * FROM user WHERE id = ?1";

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl TryFrom<&Record> for User {
    type Error = rusqlite::Error;

    fn try_from(record: &Record) -> rusqlite::Result<Self> {
        Ok(User {
            id: record.get("id")?,
            username: record.get("username")?,
            password_hash: record.get("password_hash")?,
        })
    }
}

pub struct Users<'a> {
    db: &'a Db,
}

impl<'a> Users<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// Stores a user with an already hashed password and returns its id.
    pub fn insert(&self, username: &str, password_hash: &str) -> rusqlite::Result<i64> {
        self.db.execute_mutation(INSERT_USER, params![username, password_hash])?;
        Ok(self.db.last_insert_id())
    }

    pub fn get_by_username(&self, username: &str) -> rusqlite::Result<Option<User>> {
        self.first(SELECT_USER_BY_NAME, params![username])
    }

    pub fn get_by_id(&self, id: i64) -> rusqlite::Result<Option<User>> {
        self.first(SELECT_USER_BY_ID, params![id])
    }

    fn first<P: rusqlite::Params>(&self, sql: &str, params: P) -> rusqlite::Result<Option<User>> {
        self.db.execute_query(sql, params)?.first().map(User::try_from).transpose()
    }
}
