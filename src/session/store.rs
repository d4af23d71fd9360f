use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::SessionContext;

/// A session behind its own lock. Holding the lock for a whole turn keeps the
/// turns of one browser session strictly one after another.
pub type SharedSession = Arc<Mutex<SessionContext>>;

/// Live sessions, keyed by the id handed out to the page.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
    idle_timeout: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Opens a fresh session and drops the ones nobody used for a while.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| match session.try_lock() {
            Ok(session) => session.last_seen().elapsed() < self.idle_timeout,
            // busy with a turn, so certainly not idle
            Err(_) => true,
        });
        sessions.insert(id, Arc::new(Mutex::new(SessionContext::new(id))));
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
