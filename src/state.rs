use crate::config::Config;
use crate::store::ExamStore;
use axum::extract::FromRef;
use std::sync::Arc;

/// Shared application state.
///
/// The store client is constructed once in `main` and injected here; no
/// component reaches a connection pool through a global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ExamStore>,
    pub config: Config,
}

impl FromRef<AppState> for Arc<dyn ExamStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
