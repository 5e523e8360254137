use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::api::ApiClient;
use crate::planner::{new_shared_session, SharedSession};

/// Idle planning sessions older than this are dropped.
pub const SESSION_TTL: Duration = Duration::from_secs(2 * 60 * 60);
/// Upper bound on live planning sessions; the least recently seen goes first.
pub const MAX_SESSIONS: usize = 10_000;

struct SessionEntry {
    session: SharedSession,
    last_seen: Instant,
}

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    /// Planning sessions keyed by the `session_id` cookie.
    sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
    pub flash_store: Arc<Mutex<HashMap<String, Vec<String>>>>,
    pub custom_css: Option<String>,
    pub session_ttl: Duration,
    pub max_sessions: usize,
}

impl AppState {
    pub fn new(api: ApiClient) -> Self {
        AppState {
            api,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            flash_store: Arc::new(Mutex::new(HashMap::new())),
            custom_css: None,
            session_ttl: SESSION_TTL,
            max_sessions: MAX_SESSIONS,
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<String, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn session_count(&self) -> usize {
        self.sessions().len()
    }

    /// Looks up a live session and marks it as seen.
    pub fn session(&self, sid: &str) -> Option<SharedSession> {
        let mut sessions = self.sessions();
        let entry = sessions.get_mut(sid)?;
        entry.last_seen = Instant::now();
        Some(entry.session.clone())
    }

    pub fn create_session(&self, sid: String) -> SharedSession {
        let now = Instant::now();
        self.prune_sessions(now);
        let session = new_shared_session();
        let evicted = {
            let mut sessions = self.sessions();
            let evicted = if sessions.len() >= self.max_sessions {
                let oldest = sessions
                    .iter()
                    .min_by_key(|(_, e)| e.last_seen)
                    .map(|(k, _)| k.clone());
                oldest.and_then(|k| sessions.remove(&k).map(|_| k))
            } else {
                None
            };
            sessions.insert(
                sid,
                SessionEntry {
                    session: session.clone(),
                    last_seen: now,
                },
            );
            evicted
        };
        if let Some(sid) = evicted {
            tracing::debug!("Session limit reached, dropped least recently seen session");
            self.flash_store.lock().unwrap_or_else(PoisonError::into_inner).remove(&sid);
        }
        session
    }

    /// Drop sessions idle for longer than `session_ttl` as of `now`, along
    /// with their pending flash messages. Returns how many were removed.
    pub fn prune_sessions(&self, now: Instant) -> usize {
        let ttl = self.session_ttl;
        let mut expired = Vec::new();
        self.sessions().retain(|sid, e| {
            let alive = now.saturating_duration_since(e.last_seen) <= ttl;
            if !alive {
                expired.push(sid.clone());
            }
            alive
        });
        if !expired.is_empty() {
            let mut flashes = self.flash_store.lock().unwrap_or_else(PoisonError::into_inner);
            for sid in &expired {
                flashes.remove(sid);
            }
            tracing::debug!(count = expired.len(), "Pruned idle planning sessions");
        }
        expired.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn state() -> AppState {
        let api = ApiClient::new(&Settings {
            api_base_url: "http://127.0.0.1:9".into(),
            request_timeout: Duration::from_secs(1),
        })
        .unwrap();
        AppState::new(api)
    }

    #[test]
    fn idle_sessions_are_pruned_with_their_flashes() {
        let state = state();
        state.create_session("a".into());
        state
            .flash_store
            .lock()
            .unwrap()
            .insert("a".into(), vec!["hello".into()]);

        assert_eq!(state.prune_sessions(Instant::now()), 0);
        assert!(state.session("a").is_some());

        let later = Instant::now() + state.session_ttl + Duration::from_secs(1);
        assert_eq!(state.prune_sessions(later), 1);
        assert!(state.session("a").is_none());
        assert!(state.flash_store.lock().unwrap().get("a").is_none());
    }

    #[test]
    fn oldest_session_makes_room_at_the_limit() {
        let mut state = state();
        state.max_sessions = 2;
        state.create_session("a".into());
        state.create_session("b".into());
        state.sessions().get_mut("b").unwrap().last_seen = Instant::now() + Duration::from_secs(1);
        state.create_session("c".into());
        assert_eq!(state.session_count(), 2);
        assert!(state.session("a").is_none());
        assert!(state.session("b").is_some());
        assert!(state.session("c").is_some());
    }
}
