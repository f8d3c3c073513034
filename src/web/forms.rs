//! HTML form bodies and their validation rules.
//!
//! Every field deserializes as a string with an empty default, so a missing
//! field is reported the same way as a blank one instead of rejecting the
//! whole request. [`Validate`] turns a raw form into typed values or a set of
//! per-field error messages.

use crate::db::db::Db;
use crate::db::departments::{Departments, NO_PARENT_ID};
use crate::db::employees::Assignment;
use crate::db::positions::Positions;
use crate::libs::messages::Message;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error messages keyed by field name, in the shape the templates expect.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: Message) {
        self.0.entry(field).or_default().push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    fn finish<T>(self, valid: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(valid)
        } else {
            Err(self)
        }
    }
}

/// Values a select field may take, rebuilt for every request.
#[derive(Debug, Default, Clone)]
pub struct Choices {
    pub positions: Vec<(i64, String)>,
    pub departments: Vec<(i64, String)>,
}

impl Choices {
    /// Current positions and departments, in storage order.
    pub fn load(db: &Db) -> rusqlite::Result<Self> {
        Ok(Self {
            positions: Positions::new(db).choices()?,
            departments: Departments::new(db).choices()?,
        })
    }

    /// Department choices with the "no parent" entry in front.
    pub fn parents(&self) -> Vec<(i64, String)> {
        let mut parents = vec![(NO_PARENT_ID, Message::NoParentDepartment.to_string())];
        parents.extend(self.departments.iter().cloned());
        parents
    }
}

pub trait Validate {
    type Valid;

    fn validate(&self, choices: &Choices) -> Result<Self::Valid, FormErrors>;
}

fn required(errors: &mut FormErrors, field: &'static str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        errors.add(field, Message::FieldRequired);
        None
    } else {
        Some(value.to_string())
    }
}

fn choice(errors: &mut FormErrors, field: &'static str, value: &str, choices: &[(i64, String)]) -> Option<i64> {
    match value.trim().parse::<i64>() {
        Ok(id) if choices.iter().any(|(choice, _)| *choice == id) => Some(id),
        _ => {
            errors.add(field, Message::InvalidChoice);
            None
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub password2: String,
}

#[derive(Debug)]
pub struct Registration {
    pub username: String,
    pub password: String,
}

impl Validate for RegisterForm {
    type Valid = Registration;

    fn validate(&self, _choices: &Choices) -> Result<Registration, FormErrors> {
        let mut errors = FormErrors::default();
        let username = required(&mut errors, "username", &self.username);
        let password = required(&mut errors, "password", &self.password);
        if required(&mut errors, "password2", &self.password2).is_some() && self.password2 != self.password {
            errors.add("password2", Message::FieldMustEqual("password".into()));
        }

        match (username, password) {
            (Some(username), Some(password)) => errors.finish(Registration { username, password }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub remember_me: Option<String>,
}

#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Validate for LoginForm {
    type Valid = Credentials;

    fn validate(&self, _choices: &Choices) -> Result<Credentials, FormErrors> {
        let mut errors = FormErrors::default();
        let username = required(&mut errors, "username", &self.username);
        let password = required(&mut errors, "password", &self.password);

        match (username, password) {
            (Some(username), Some(password)) => errors.finish(Credentials { username, password }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PositionForm {
    pub position_name: String,
    pub description: String,
}

#[derive(Debug)]
pub struct NewPosition {
    pub position_name: String,
    pub description: String,
}

impl Validate for PositionForm {
    type Valid = NewPosition;

    fn validate(&self, _choices: &Choices) -> Result<NewPosition, FormErrors> {
        let mut errors = FormErrors::default();
        let position_name = required(&mut errors, "position_name", &self.position_name);
        let description = required(&mut errors, "description", &self.description);

        match (position_name, description) {
            (Some(position_name), Some(description)) => errors.finish(NewPosition { position_name, description }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DepartmentForm {
    pub department_name: String,
    pub parent_id: String,
}

#[derive(Debug)]
pub struct NewDepartment {
    pub department_name: String,
    /// `None` for a root department.
    pub parent_id: Option<i64>,
}

impl Validate for DepartmentForm {
    type Valid = NewDepartment;

    fn validate(&self, choices: &Choices) -> Result<NewDepartment, FormErrors> {
        let mut errors = FormErrors::default();
        let department_name = required(&mut errors, "department_name", &self.department_name);
        // An absent selection means no parent.
        let parent_id = if self.parent_id.trim().is_empty() {
            Some(NO_PARENT_ID)
        } else {
            choice(&mut errors, "parent_id", &self.parent_id, &choices.parents())
        };

        match (department_name, parent_id) {
            (Some(department_name), Some(parent_id)) => errors.finish(NewDepartment {
                department_name,
                parent_id: Some(parent_id).filter(|id| *id != NO_PARENT_ID),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmployeeForm {
    pub fio: String,
    pub position_id: String,
    pub department_id: String,
}

#[derive(Debug)]
pub struct NewEmployee {
    pub fio: String,
    pub position_id: i64,
    pub department_id: i64,
}

impl Validate for EmployeeForm {
    type Valid = NewEmployee;

    fn validate(&self, choices: &Choices) -> Result<NewEmployee, FormErrors> {
        let mut errors = FormErrors::default();
        let fio = required(&mut errors, "fio", &self.fio);
        let position_id = choice(&mut errors, "position_id", &self.position_id, &choices.positions);
        let department_id = choice(&mut errors, "department_id", &self.department_id, &choices.departments);

        match (fio, position_id, department_id) {
            (Some(fio), Some(position_id), Some(department_id)) => errors.finish(NewEmployee {
                fio,
                position_id,
                department_id,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssignmentForm {
    pub position_id: String,
    pub department_id: String,
}

impl Validate for AssignmentForm {
    type Valid = Assignment;

    fn validate(&self, choices: &Choices) -> Result<Assignment, FormErrors> {
        let mut errors = FormErrors::default();
        let position_id = choice(&mut errors, "position_id", &self.position_id, &choices.positions);
        let department_id = choice(&mut errors, "department_id", &self.department_id, &choices.departments);

        match (position_id, department_id) {
            (Some(position_id), Some(department_id)) => errors.finish(Assignment { department_id, position_id }),
            _ => Err(errors),
        }
    }
}
