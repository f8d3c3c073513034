//! Connection-per-request.
//!
//! [`attach_db`] puts an empty [`RequestDb`] slot into every request. The
//! first extractor or handler that calls [`RequestDb::with`] opens the
//! connection; it closes when the last clone of the slot is dropped, which
//! happens when the request finishes, whether the handler succeeded or not.

use super::error::AppError;
use super::AppState;
use crate::db::db::Db;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct RequestDb {
    path: Arc<PathBuf>,
    conn: Arc<Mutex<Option<Db>>>,
}

impl RequestDb {
    pub fn new(path: Arc<PathBuf>) -> Self {
        Self {
            path,
            conn: Arc::new(Mutex::new(None)),
        }
    }

    /// Runs `f` against this request's connection, opening it on first use.
    pub fn with<R, E>(&self, f: impl FnOnce(&Db) -> Result<R, E>) -> Result<R, AppError>
    where
        AppError: From<E>,
    {
        let mut slot = self.conn.lock();
        if slot.is_none() {
            tracing::debug!(target: "database", path = %self.path.display(), "opening request connection");
            *slot = Some(Db::open(self.path.as_path())?);
        }
        match slot.as_ref() {
            Some(db) => Ok(f(db)?),
            None => Err(AppError::Internal(anyhow::anyhow!("request connection unavailable"))),
        }
    }

    /// Whether a connection has been opened for this request.
    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.conn.lock().is_some()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestDb {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestDb>()
            .cloned()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("request database slot missing")))
    }
}

pub async fn attach_db(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(RequestDb::new(Arc::clone(&state.database)));
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::positions::Positions;

    #[test]
    fn connection_opens_lazily_and_is_reused() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("staffdesk.db");
        Db::init(&path).unwrap();

        let db = RequestDb::new(Arc::new(path));
        assert!(!db.is_open());

        db.with(|db| Positions::new(db).insert("Engineer", "dev")).unwrap();
        assert!(db.is_open());

        let positions = db.with(|db| Positions::new(db).list()).unwrap();
        assert_eq!(positions.len(), 1);
    }
}
