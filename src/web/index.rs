use super::auth::CurrentUser;
use super::error::AppError;
use super::views::Page;
use super::AppState;
use axum::extract::State;
use axum::response::Html;
use axum::Extension;

pub async fn index(State(state): State<AppState>, Extension(user): Extension<CurrentUser>) -> Result<Html<String>, AppError> {
    state.views.render(Page::new("index").user(&user))
}
