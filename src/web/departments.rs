use super::auth::CurrentUser;
use super::error::AppError;
use super::forms::{Choices, DepartmentForm, Validate};
use super::request_db::RequestDb;
use super::views::{options, Page};
use super::AppState;
use crate::db::departments::Departments;
use crate::libs::messages::Message;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::{Extension, Form};

fn add_form_page(user: &CurrentUser, db: &RequestDb, form: &DepartmentForm) -> Result<Page, AppError> {
    let (choices, departments) = db.with(|db| Ok::<_, rusqlite::Error>((Choices::load(db)?, Departments::new(db).list()?)))?;
    Ok(Page::new("department_add")
        .user(user)
        .with("form", form)
        .with("parents", options(&choices.parents(), &form.parent_id))
        .with("departments", &departments))
}

pub async fn add_page(State(state): State<AppState>, Extension(user): Extension<CurrentUser>, db: RequestDb) -> Result<Html<String>, AppError> {
    state.views.render(add_form_page(&user, &db, &DepartmentForm::default())?)
}

pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    db: RequestDb,
    Form(form): Form<DepartmentForm>,
) -> Result<Html<String>, AppError> {
    let choices = db.with(Choices::load)?;
    let page = match form.validate(&choices) {
        Ok(department) => {
            let id = db.with(|db| Departments::new(db).insert(&department.department_name, department.parent_id))?;
            tracing::info!(target: "staff", department_id = id, parent_id = ?department.parent_id, "{}", Message::DepartmentAdded);
            add_form_page(&user, &db, &form)?.flash(Message::DepartmentAdded)
        }
        Err(errors) => add_form_page(&user, &db, &form)?.errors(&errors),
    };
    state.views.render(page)
}

/// Deletes one department. Its children are left in place.
pub async fn delete(db: RequestDb, Path(id): Path<i64>) -> Result<Redirect, AppError> {
    if db.with(|db| Departments::new(db).delete(id))? > 0 {
        tracing::info!(target: "staff", "{}", Message::DepartmentDeleted(id));
    }
    Ok(Redirect::to("/index"))
}

pub async fn stats(State(state): State<AppState>, Extension(user): Extension<CurrentUser>, db: RequestDb) -> Result<Html<String>, AppError> {
    let hierarchy = db.with(|db| Departments::new(db).hierarchy())?;
    state.views.render(Page::new("department_stats").user(&user).with("departments", &hierarchy))
}
