//! Registration, login, logout and the login gate.

use super::error::AppError;
use super::forms::{Choices, LoginForm, RegisterForm, Validate};
use super::request_db::RequestDb;
use super::session::{cleared_cookie, read_session, session_cookie};
use super::views::Page;
use super::AppState;
use crate::db::users::{User, Users};
use crate::libs::account::{self, LoginOutcome, RegisterOutcome};
use crate::libs::messages::Message;
use axum::extract::{Request, State};
use axum::http::header::SET_COOKIE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Serialize;

/// The logged-in user, available to every protected handler as an
/// `Extension`.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// Lets the request through only with a valid session for an existing
/// user; everyone else is sent to `/login`.
pub async fn require_login(State(state): State<AppState>, db: RequestDb, mut request: Request, next: Next) -> Result<Response, AppError> {
    let user_id = read_session(request.headers()).and_then(|token| state.sessions.verify(&token));
    let user = match user_id {
        Some(user_id) => db.with(|db| Users::new(db).get_by_id(user_id))?,
        None => None,
    };

    match user {
        Some(user) => {
            request.extensions_mut().insert(CurrentUser::from(user));
            Ok(next.run(request).await)
        }
        None => {
            tracing::debug!(target: "auth", "{}", Message::LoginRequired(request.uri().path().to_string()));
            Ok(Redirect::to("/login").into_response())
        }
    }
}

pub async fn register_page(State(state): State<AppState>) -> Result<Response, AppError> {
    Ok(state.views.render(Page::new("auth/register").with("form", RegisterForm::default()))?.into_response())
}

pub async fn register(State(state): State<AppState>, db: RequestDb, Form(form): Form<RegisterForm>) -> Result<Response, AppError> {
    let mut errors = match form.validate(&Choices::default()) {
        Ok(registration) => {
            let cost = state.config.password_cost;
            let outcome = run_blocking(db.clone(), move |db| account::register(db, &registration.username, &registration.password, cost)).await?;
            match outcome {
                RegisterOutcome::Registered(_) => {
                    tracing::info!(target: "auth", "{}", Message::UserRegistered(form.username.clone()));
                    return Ok(Redirect::to("/login").into_response());
                }
                RegisterOutcome::UsernameTaken => Default::default(),
            }
        }
        Err(errors) => errors,
    };

    if !form.username.trim().is_empty() && db.with(|db| account::username_taken(db, &form.username))? {
        errors.add("username", Message::UsernameTaken);
    }

    Ok(state
        .views
        .render(Page::new("auth/register").with("form", &form).errors(&errors))?
        .into_response())
}

pub async fn login_page(State(state): State<AppState>) -> Result<Response, AppError> {
    Ok(state.views.render(Page::new("auth/login").with("form", LoginForm::default()))?.into_response())
}

pub async fn login(State(state): State<AppState>, db: RequestDb, Form(form): Form<LoginForm>) -> Result<Response, AppError> {
    let credentials = match form.validate(&Choices::default()) {
        Ok(credentials) => credentials,
        Err(errors) => {
            return Ok(state
                .views
                .render(Page::new("auth/login").with("form", &form).errors(&errors))?
                .into_response())
        }
    };

    let outcome = run_blocking(db, move |db| account::authenticate(db, &credentials.username, &credentials.password)).await?;
    let page = Page::new("auth/login").with("form", &form);
    let page = match outcome {
        LoginOutcome::Authenticated(user) => {
            tracing::info!(target: "auth", "{}", Message::UserLoggedIn(user.username.clone()));
            let token = state.sessions.issue(user.id)?;
            let max_age = form.remember_me.is_some().then(|| state.sessions.lifetime());
            return Ok(([(SET_COOKIE, session_cookie(&token, max_age))], Redirect::to("/index")).into_response());
        }
        LoginOutcome::UnknownUser => page.flash(Message::UserDoesNotMatch),
        LoginOutcome::IncorrectPassword => page.flash(Message::IncorrectPassword),
    };

    Ok(state.views.render(page)?.into_response())
}

pub async fn logout() -> Response {
    tracing::debug!(target: "auth", "{}", Message::UserLoggedOut);
    ([(SET_COOKIE, cleared_cookie())], Redirect::to("/login")).into_response()
}

/// Runs password hashing off the async workers.
async fn run_blocking<R, F>(db: RequestDb, f: F) -> Result<R, AppError>
where
    R: Send + 'static,
    F: FnOnce(&crate::db::db::Db) -> anyhow::Result<R> + Send + 'static,
{
    tokio::task::spawn_blocking(move || db.with(f))
        .await
        .map_err(|error| AppError::Internal(error.into()))?
}
