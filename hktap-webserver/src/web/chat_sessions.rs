use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use hktap_core::usecases::ChatSession;
use parking_lot::Mutex;

pub type SharedChatSession = Arc<Mutex<ChatSession>>;

#[derive(Debug, Clone, Copy)]
pub struct ChatSessionLimits {
    pub max_sessions: usize,
    /// Sessions without a request for this long are dropped.
    pub idle_timeout: Duration,
}

impl Default for ChatSessionLimits {
    fn default() -> Self {
        Self {
            max_sessions: 1000,
            idle_timeout: Duration::from_secs(60 * 60),
        }
    }
}

struct Entry {
    session: SharedChatSession,
    last_access: Instant,
}

impl Entry {
    // A request holds another reference while it uses the session
    fn is_busy(&self) -> bool {
        Arc::strong_count(&self.session) > 1
    }
}

/// In-memory chat sessions by session id.
///
/// Each session has its own lock that is held for
/// a whole turn, i.e. turns of a session never overlap.
pub struct ChatSessions {
    limits: ChatSessionLimits,
    sessions: Mutex<HashMap<String, Entry>>,
}

impl ChatSessions {
    pub fn new(limits: ChatSessionLimits) -> Self {
        Self {
            limits,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Looks up a session without starting a new one.
    pub fn get(&self, session_id: &str) -> Option<SharedChatSession> {
        let mut sessions = self.sessions.lock();
        let entry = sessions.get_mut(session_id)?;
        entry.last_access = Instant::now();
        Some(Arc::clone(&entry.session))
    }

    /// Returns `None` if the limit is reached and every
    /// session is busy.
    pub fn get_or_create(&self, session_id: &str) -> Option<SharedChatSession> {
        let now = Instant::now();
        let mut sessions = self.sessions.lock();
        if let Some(entry) = sessions.get_mut(session_id) {
            entry.last_access = now;
            return Some(Arc::clone(&entry.session));
        }
        let idle_timeout = self.limits.idle_timeout;
        sessions.retain(|id, entry| {
            let keep = entry.is_busy() || now.duration_since(entry.last_access) < idle_timeout;
            if !keep {
                debug!("Dropping idle chat session {id}");
            }
            keep
        });
        if sessions.len() >= self.limits.max_sessions {
            let least_recently_used = sessions
                .iter()
                .filter(|(_, entry)| !entry.is_busy())
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(id, _)| id.clone());
            let Some(id) = least_recently_used else {
                warn!(
                    "Cannot start chat session {session_id}: {} sessions are busy",
                    sessions.len()
                );
                return None;
            };
            debug!("Dropping least recently used chat session {id}");
            sessions.remove(&id);
        }
        debug!("Starting new chat session {session_id}");
        let session = Arc::new(Mutex::new(ChatSession::new()));
        sessions.insert(
            session_id.to_owned(),
            Entry {
                session: Arc::clone(&session),
                last_access: now,
            },
        );
        Some(session)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }
}
