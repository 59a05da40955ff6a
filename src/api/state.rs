use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    models::Session,
    services::{providers::PosterProvider, Recommender},
};

/// Shared application state
///
/// Models and collaborators are read-only; the session is the only mutable
/// part and is serialized behind a lock.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub posters: Arc<dyn PosterProvider>,
    pub session: Arc<RwLock<Session>>,
}

impl AppState {
    /// Creates state with a fresh, empty session
    pub fn new(recommender: Recommender, posters: Arc<dyn PosterProvider>) -> Self {
        Self {
            recommender: Arc::new(recommender),
            posters,
            session: Arc::new(RwLock::new(Session::new())),
        }
    }
}
