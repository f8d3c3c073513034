use super::auth::CurrentUser;
use super::error::AppError;
use super::forms::{AssignmentForm, Choices, EmployeeForm, Validate};
use super::request_db::RequestDb;
use super::views::{options, Page};
use super::AppState;
use crate::db::employees::{Employee, Employees};
use crate::libs::messages::Message;
use crate::libs::staff::{self, AddEmployeeOutcome};
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::{Extension, Form};
use chrono::Local;

fn add_form_page(user: &CurrentUser, choices: &Choices, form: &EmployeeForm) -> Page {
    Page::new("employee_add")
        .user(user)
        .with("form", form)
        .with("positions", options(&choices.positions, &form.position_id))
        .with("departments", options(&choices.departments, &form.department_id))
}

pub async fn add_page(State(state): State<AppState>, Extension(user): Extension<CurrentUser>, db: RequestDb) -> Result<Html<String>, AppError> {
    let choices = db.with(Choices::load)?;
    state.views.render(add_form_page(&user, &choices, &EmployeeForm::default()))
}

pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    db: RequestDb,
    Form(form): Form<EmployeeForm>,
) -> Result<Html<String>, AppError> {
    let choices = db.with(Choices::load)?;
    let page = add_form_page(&user, &choices, &form);
    let page = match form.validate(&choices) {
        Ok(employee) => {
            let today = Local::now().date_naive();
            match db.with(|db| staff::add_employee(db, &employee.fio, employee.position_id, employee.department_id, today))? {
                AddEmployeeOutcome::Added(id) => {
                    tracing::info!(target: "staff", employee_id = id, "{}", Message::EmployeeAdded);
                    page.flash(Message::EmployeeAdded)
                }
                AddEmployeeOutcome::DuplicateFio => page.flash(Message::FioTaken),
            }
        }
        Err(errors) => page.errors(&errors),
    };
    state.views.render(page)
}

pub async fn delete(db: RequestDb, Path(id): Path<i64>) -> Result<Redirect, AppError> {
    if db.with(|db| Employees::new(db).delete(id))? > 0 {
        tracing::info!(target: "staff", "{}", Message::EmployeeDeleted(id));
    }
    Ok(Redirect::to("/employees"))
}

fn find_employee(db: &RequestDb, id: i64) -> Result<Employee, AppError> {
    db.with(|db| Employees::new(db).get(id))?
        .ok_or_else(|| AppError::NotFound(Message::EmployeeNotFound(id).to_string()))
}

fn update_form_page(user: &CurrentUser, employee: &Employee, choices: &Choices, form: &AssignmentForm) -> Page {
    Page::new("employee_update")
        .user(user)
        .with("employee", employee)
        .with("positions", options(&choices.positions, &form.position_id))
        .with("departments", options(&choices.departments, &form.department_id))
}

pub async fn update_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    db: RequestDb,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let employee = find_employee(&db, id)?;
    let choices = db.with(Choices::load)?;
    let form = AssignmentForm {
        position_id: employee.position_id.to_string(),
        department_id: employee.department_id.to_string(),
    };
    state.views.render(update_form_page(&user, &employee, &choices, &form))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    db: RequestDb,
    Path(id): Path<i64>,
    Form(form): Form<AssignmentForm>,
) -> Result<Html<String>, AppError> {
    let employee = find_employee(&db, id)?;
    let choices = db.with(Choices::load)?;
    let page = update_form_page(&user, &employee, &choices, &form);
    let page = match form.validate(&choices) {
        Ok(assignment) => {
            let counter = db
                .with(|db| staff::update_employee(db, id, assignment))?
                .ok_or_else(|| AppError::NotFound(Message::EmployeeNotFound(id).to_string()))?;
            tracing::info!(
                target: "staff",
                employee_id = id,
                count_dep = counter.count_dep,
                count_pos = counter.count_pos,
                "{}",
                Message::EmployeeUpdated
            );
            page.with("counter", counter).flash(Message::EmployeeUpdated)
        }
        Err(errors) => page.errors(&errors),
    };
    state.views.render(page)
}

pub async fn list(State(state): State<AppState>, Extension(user): Extension<CurrentUser>, db: RequestDb) -> Result<Html<String>, AppError> {
    let employees = db.with(|db| Employees::new(db).list_with_stats())?;
    state.views.render(
        Page::new("employees")
            .user(&user)
            .with("employees", &employees)
            .with("today", Local::now().date_naive()),
    )
}
