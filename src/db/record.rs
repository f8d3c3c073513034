//! Untyped result rows.
//!
//! [`Record`] is what [`Db::execute_query`](super::db::Db::execute_query)
//! hands back: the column names of the statement plus one owned value per
//! column. Stores convert records into their typed structs.

use rusqlite::types::{FromSql, Value, ValueRef};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Record {
    pub(crate) fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Reads the value of `column`, converting it like `rusqlite::Row::get`.
    pub fn get<T: FromSql>(&self, column: &str) -> rusqlite::Result<T> {
        let idx = self
            .columns
            .iter()
            .position(|name| name == column)
            .ok_or_else(|| rusqlite::Error::InvalidColumnName(column.to_string()))?;
        let value = &self.values[idx];

        T::column_result(ValueRef::from(value)).map_err(|e| match e {
            rusqlite::types::FromSqlError::InvalidType => rusqlite::Error::InvalidColumnType(idx, column.to_string(), value.data_type()),
            other => rusqlite::Error::FromSqlConversionFailure(idx, value.data_type(), Box::new(other)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        let columns: Arc<[String]> = vec!["id".to_string(), "name".to_string(), "parent_id".to_string()].into();
        Record::new(columns, vec![Value::Integer(3), Value::Text("Sales".into()), Value::Null])
    }

    #[test]
    fn get_reads_by_column_name() {
        let record = record();

        assert_eq!(record.get::<i64>("id").unwrap(), 3);
        assert_eq!(record.get::<String>("name").unwrap(), "Sales");
        assert_eq!(record.get::<Option<i64>>("parent_id").unwrap(), None);
    }

    #[test]
    fn get_rejects_unknown_columns_and_wrong_types() {
        let record = record();

        assert!(matches!(record.get::<i64>("missing"), Err(rusqlite::Error::InvalidColumnName(_))));
        assert!(matches!(record.get::<i64>("name"), Err(rusqlite::Error::InvalidColumnType(1, _, _))));
    }
}
