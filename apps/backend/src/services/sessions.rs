//! In-memory grade assignment sessions.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use svp_core::{GradeAssignment, Selection};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AssignmentSession {
    pub selection: Selection,
    pub grid: GradeAssignment,
    pub created_at: DateTime<Utc>,
}

/// Sessions keyed by id; entries older than the TTL are dropped on access.
pub struct AssignmentSessions {
    ttl: Duration,
    sessions: Mutex<HashMap<Uuid, AssignmentSession>>,
}

impl AssignmentSessions {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn prune(&self, sessions: &mut HashMap<Uuid, AssignmentSession>, now: DateTime<Utc>) {
        let before = sessions.len();
        sessions.retain(|_, s| now - s.created_at < self.ttl);
        let pruned = before - sessions.len();
        if pruned > 0 {
            tracing::info!(pruned, "expired assignment sessions dropped");
        }
    }

    pub async fn create(&self, selection: Selection, grid: GradeAssignment) -> (Uuid, AssignmentSession) {
        self.create_at(selection, grid, Utc::now()).await
    }

    async fn create_at(
        &self,
        selection: Selection,
        grid: GradeAssignment,
        now: DateTime<Utc>,
    ) -> (Uuid, AssignmentSession) {
        let mut sessions = self.sessions.lock().await;
        self.prune(&mut sessions, now);

        let id = Uuid::new_v4();
        let session = AssignmentSession {
            selection,
            grid,
            created_at: now,
        };
        sessions.insert(id, session.clone());
        tracing::info!(%id, rows = session.grid.len(), "assignment session created");
        (id, session)
    }

    pub async fn get(&self, id: Uuid) -> Option<AssignmentSession> {
        let mut sessions = self.sessions.lock().await;
        self.prune(&mut sessions, Utc::now());
        sessions.get(&id).cloned()
    }

    /// Run `f` on a session; `None` when it does not exist.
    pub async fn update<F, T>(&self, id: Uuid, f: F) -> Option<T>
    where
        F: FnOnce(&mut AssignmentSession) -> T,
    {
        let mut sessions = self.sessions.lock().await;
        self.prune(&mut sessions, Utc::now());
        sessions.get_mut(&id).map(f)
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.lock().await.remove(&id).is_some();
        if removed {
            tracing::info!(%id, "assignment session deleted");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
