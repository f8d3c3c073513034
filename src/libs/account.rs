//! Registration and credential checks.

use crate::db::db::Db;
use crate::db::users::{User, Users};
use crate::libs::password::{hash_password, verify_password};
use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered(i64),
    UsernameTaken,
}

#[derive(Debug, Clone)]
pub enum LoginOutcome {
    Authenticated(User),
    UnknownUser,
    IncorrectPassword,
}

/// Creates a user unless the name is already taken. Only the bcrypt hash of
/// `password` is stored.
pub fn register(db: &Db, username: &str, password: &str, cost: u32) -> Result<RegisterOutcome> {
    let users = Users::new(db);
    if users.get_by_username(username)?.is_some() {
        return Ok(RegisterOutcome::UsernameTaken);
    }

    let password_hash = hash_password(password, cost)?;
    let id = users.insert(username, &password_hash)?;
    tracing::info!(user_id = id, username, "user registered");
    Ok(RegisterOutcome::Registered(id))
}

pub fn username_taken(db: &Db, username: &str) -> Result<bool> {
    Ok(Users::new(db).get_by_username(username)?.is_some())
}

pub fn authenticate(db: &Db, username: &str, password: &str) -> Result<LoginOutcome> {
    let Some(user) = Users::new(db).get_by_username(username)? else {
        return Ok(LoginOutcome::UnknownUser);
    };

    if verify_password(password, &user.password_hash)? {
        Ok(LoginOutcome::Authenticated(user))
    } else {
        Ok(LoginOutcome::IncorrectPassword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn register_then_authenticate() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db = Db::init(temp_dir.path().join("staffdesk.db")).unwrap();

        let outcome = register(&db, "admin", "admin", TEST_COST).unwrap();
        assert!(matches!(outcome, RegisterOutcome::Registered(id) if id > 0));
        assert_eq!(register(&db, "admin", "other", TEST_COST).unwrap(), RegisterOutcome::UsernameTaken);

        assert!(matches!(authenticate(&db, "admin", "admin").unwrap(), LoginOutcome::Authenticated(user) if user.username == "admin"));
        assert!(matches!(authenticate(&db, "admin", "wrong").unwrap(), LoginOutcome::IncorrectPassword));
        assert!(matches!(authenticate(&db, "nobody", "admin").unwrap(), LoginOutcome::UnknownUser));
    }

    #[test]
    fn stored_password_is_hashed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db = Db::init(temp_dir.path().join("staffdesk.db")).unwrap();

        register(&db, "admin", "admin", TEST_COST).unwrap();
        let user = Users::new(&db).get_by_username("admin").unwrap().unwrap();
        assert_ne!(user.password_hash, "admin");
    }
}
