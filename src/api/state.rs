use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::data::{Catalog, GenreTopList};
use crate::engine::RatingStore;
use crate::error::{AppError, AppResult};
use crate::models::{Movie, SessionInfo};
use crate::services::Recommender;

/// One user's rating session.
///
/// The store is wrapped in its own lock so mutations are serialized per
/// session while reads may run concurrently; sessions never share stores.
#[derive(Clone)]
pub struct Session {
    pub store: Arc<RwLock<RatingStore>>,
    pub created_at: DateTime<Utc>,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub genre_top: Arc<GenreTopList>,
    pub samples: Arc<Vec<Movie>>,
    pub recommender: Arc<Recommender>,
    pub sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    pub rating_capacity: usize,
}

impl AppState {
    pub fn new(
        catalog: Arc<Catalog>,
        genre_top: Arc<GenreTopList>,
        samples: Arc<Vec<Movie>>,
        recommender: Arc<Recommender>,
        rating_capacity: usize,
    ) -> Self {
        Self {
            catalog,
            genre_top,
            samples,
            recommender,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            rating_capacity,
        }
    }

    /// Creates a fresh rating session and returns its metadata
    pub async fn create_session(&self) -> AppResult<SessionInfo> {
        let store = RatingStore::new(self.rating_capacity)?;
        let session_id = Uuid::new_v4();
        let created_at = Utc::now();

        let session = Session {
            store: Arc::new(RwLock::new(store)),
            created_at,
        };
        self.sessions.write().await.insert(session_id, session);

        tracing::info!(session_id = %session_id, "Session created");
        Ok(SessionInfo {
            session_id,
            capacity: self.rating_capacity,
            created_at,
        })
    }

    /// Looks up a session, failing with `NotFound` for unknown ids
    pub async fn session(&self, session_id: Uuid) -> AppResult<Session> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("session {} does not exist", session_id)))
    }

    /// Discards a session and its ratings
    pub async fn remove_session(&self, session_id: Uuid) -> AppResult<()> {
        match self.sessions.write().await.remove(&session_id) {
            Some(_) => {
                tracing::info!(session_id = %session_id, "Session removed");
                Ok(())
            }
            None => Err(AppError::NotFound(format!(
                "session {} does not exist",
                session_id
            ))),
        }
    }
}
