//! Per-session conversation state and the registry that serializes access.
//!
//! A session's cumulative risk only moves up: increments are added and the
//! total is clamped to the configured maximum. [`SessionState::reset`] is the
//! only way back to zero.

use crate::config::SessionConfig;
use crate::emotion::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::info;

/// One exchange in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub user: String,
    pub bot: String,
    pub emotion: Category,
    pub timestamp: DateTime<Utc>,
}

/// Mutable state owned by exactly one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    id: String,
    created_at: DateTime<Utc>,
    turns: Vec<Turn>,
    emotions: Vec<Category>,
    risk_score: u8,
    emotion_cap: usize,
    mood_len: usize,
    max_risk: u8,
}

impl SessionState {
    pub fn new(id: impl Into<String>, config: &SessionConfig, max_risk: u8) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            turns: Vec::new(),
            emotions: Vec::new(),
            risk_score: 0,
            emotion_cap: config.emotion_history_cap,
            mood_len: config.mood_history_len,
            max_risk,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Emotion history, oldest first, capped at the configured length.
    pub fn emotions(&self) -> &[Category] {
        &self.emotions
    }

    pub fn risk_score(&self) -> u8 {
        self.risk_score
    }

    /// The most recent emotions reported back to the user.
    pub fn mood_history(&self) -> &[Category] {
        &self.emotions[self.emotions.len().saturating_sub(self.mood_len)..]
    }

    /// Add a single-turn increment; returns the clamped total.
    pub fn add_risk(&mut self, increment: u8) -> u8 {
        self.risk_score = self.risk_score.saturating_add(increment).min(self.max_risk);
        self.risk_score
    }

    /// Append a completed exchange and its emotion.
    pub fn record_turn(
        &mut self,
        user: impl Into<String>,
        bot: impl Into<String>,
        emotion: Category,
    ) {
        self.turns.push(Turn {
            user: user.into(),
            bot: bot.into(),
            emotion,
            timestamp: Utc::now(),
        });
        self.emotions.push(emotion);
        if self.emotions.len() > self.emotion_cap {
            let excess = self.emotions.len() - self.emotion_cap;
            self.emotions.drain(..excess);
        }
    }

    /// Clear history and risk, keeping the session id.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.emotions.clear();
        self.risk_score = 0;
        self.created_at = Utc::now();
    }
}

/// Shared handle to one session, locked for the duration of a turn.
pub type SessionHandle = Arc<tokio::sync::Mutex<SessionState>>;

/// In-memory session table.
///
/// The outer map lock is held only for lookup and insertion. Each session has
/// its own async mutex, so turns within a session run one at a time while
/// different sessions proceed independently.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, SessionHandle>>,
    config: SessionConfig,
    max_risk: u8,
}

impl SessionRegistry {
    pub fn new(config: SessionConfig, max_risk: u8) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            config,
            max_risk,
        }
    }

    /// Start a fresh session and return its id.
    pub fn create(&self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.get_or_create(&id);
        id
    }

    /// Handle for `id`, creating the session on first contact.
    pub fn get_or_create(&self, id: &str) -> SessionHandle {
        let mut sessions = self.lock();
        Arc::clone(sessions.entry(id.to_owned()).or_insert_with(|| {
            info!(session = id, "session created");
            Arc::new(tokio::sync::Mutex::new(SessionState::new(id, &self.config, self.max_risk)))
        }))
    }

    pub fn get(&self, id: &str) -> Option<SessionHandle> {
        self.lock().get(id).cloned()
    }

    /// Reset a session in place. Returns `false` for unknown ids.
    pub async fn reset(&self, id: &str) -> bool {
        let Some(handle) = self.get(id) else {
            return false;
        };
        handle.lock().await.reset();
        info!(session = id, "session reset");
        true
    }

    /// Mood history for `id`, empty for unknown ids.
    pub async fn mood_history(&self, id: &str) -> Vec<Category> {
        match self.get(id) {
            Some(handle) => handle.lock().await.mood_history().to_vec(),
            None => Vec::new(),
        }
    }

    /// Drop a session, e.g. when it expires.
    pub fn remove(&self, id: &str) -> bool {
        self.lock().remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, SessionHandle>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}
