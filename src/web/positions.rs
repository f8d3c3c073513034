use super::auth::CurrentUser;
use super::error::AppError;
use super::forms::{Choices, PositionForm, Validate};
use super::request_db::RequestDb;
use super::views::Page;
use super::AppState;
use crate::db::positions::Positions;
use crate::libs::messages::Message;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::{Extension, Form};

pub async fn add_page(State(state): State<AppState>, Extension(user): Extension<CurrentUser>) -> Result<Html<String>, AppError> {
    state.views.render(Page::new("position_add").user(&user).with("form", PositionForm::default()))
}

pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    db: RequestDb,
    Form(form): Form<PositionForm>,
) -> Result<Html<String>, AppError> {
    let page = Page::new("position_add").user(&user).with("form", &form);
    let page = match form.validate(&Choices::default()) {
        Ok(position) => {
            let id = db.with(|db| Positions::new(db).insert(&position.position_name, &position.description))?;
            tracing::info!(target: "staff", position_id = id, "{}", Message::PositionAdded);
            page.flash(Message::PositionAdded)
        }
        Err(errors) => page.errors(&errors),
    };
    state.views.render(page)
}

/// Deletes by id; an unknown id is not an error.
pub async fn delete(db: RequestDb, Path(id): Path<i64>) -> Result<Redirect, AppError> {
    if db.with(|db| Positions::new(db).delete(id))? > 0 {
        tracing::info!(target: "staff", "{}", Message::PositionDeleted(id));
    }
    Ok(Redirect::to("/positions"))
}

pub async fn list(State(state): State<AppState>, Extension(user): Extension<CurrentUser>, db: RequestDb) -> Result<Html<String>, AppError> {
    let positions = db.with(|db| Positions::new(db).list())?;
    state.views.render(Page::new("positions").user(&user).with("positions", &positions))
}
