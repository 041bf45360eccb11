//! Reply composition.
//!
//! Sub-modules:
//! - `templates`: fragment pools, fixed addenda, coping strategies.
//!
//! [`ResponseComposer`] assembles a reply from one random fragment per
//! class, re-rolls against a process-wide memory of recent replies, then
//! appends the deterministic addenda:
//!
//! ```text
//! base reply
//! [pattern acknowledgment]      same emotion ≥ min_count in last window
//! [crisis resources + closing]  cumulative risk ≥ high threshold
//! [professional-help line]      medium ≤ risk < high
//! ```

pub mod templates;

pub use templates::{CRISIS_CLOSINGS, CRISIS_RESOURCES, PROFESSIONAL_HELP, coping_strategies};

use crate::config::{ComposerConfig, RiskConfig};
use crate::emotion::Category;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::debug;

/// Separator between the base reply and each addendum.
const SECTION_BREAK: &str = "\n\n";

/// Bounded FIFO of recently emitted base replies.
#[derive(Debug)]
struct RecentReplies {
    entries: VecDeque<String>,
    capacity: usize,
}

impl RecentReplies {
    fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn contains(&self, reply: &str) -> bool {
        self.entries.iter().any(|r| r == reply)
    }

    /// Capacity 0 disables the memory.
    fn remember(&mut self, reply: String) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(reply);
    }
}

/// Composes replies. One instance is shared by every session.
#[derive(Debug)]
pub struct ResponseComposer {
    config: ComposerConfig,
    medium_threshold: u8,
    high_threshold: u8,
    recent: Mutex<RecentReplies>,
}

impl ResponseComposer {
    pub fn new(config: ComposerConfig, risk: &RiskConfig) -> Self {
        let recent = Mutex::new(RecentReplies::new(config.memory_capacity));
        Self {
            config,
            medium_threshold: risk.medium_threshold,
            high_threshold: risk.high_threshold,
            recent,
        }
    }

    /// Compose a reply using the thread-local RNG.
    ///
    /// `history` holds the session's earlier emotions, oldest first, not
    /// including the current message.
    pub fn compose(&self, emotion: Category, cumulative_risk: u8, history: &[Category]) -> String {
        self.compose_with_rng(emotion, cumulative_risk, history, &mut rand::thread_rng())
    }

    /// Compose a reply with a caller-supplied RNG.
    pub fn compose_with_rng<R: Rng + ?Sized>(
        &self,
        emotion: Category,
        cumulative_risk: u8,
        history: &[Category],
        rng: &mut R,
    ) -> String {
        let mut reply = self.assemble_unrepeated(emotion, rng);

        if self.is_persistent(emotion, history)
            && let Some(note) = templates::pattern_addendum(emotion)
        {
            reply.push_str(SECTION_BREAK);
            reply.push_str(note);
        }

        if cumulative_risk >= self.high_threshold {
            reply.push_str(SECTION_BREAK);
            reply.push_str(CRISIS_RESOURCES);
            reply.push_str(SECTION_BREAK);
            reply.push_str(CRISIS_CLOSINGS.choose(rng).copied().unwrap_or_default());
        } else if cumulative_risk >= self.medium_threshold {
            reply.push_str(SECTION_BREAK);
            reply.push_str(PROFESSIONAL_HELP);
        }

        reply
    }

    /// Number of replies currently remembered.
    pub fn recent_len(&self) -> usize {
        self.lock_recent().entries.len()
    }

    /// Assemble base replies until one is not in recent memory or attempts
    /// run out; the last attempt is accepted either way.
    fn assemble_unrepeated<R: Rng + ?Sized>(&self, emotion: Category, rng: &mut R) -> String {
        let pool = templates::pool_for(emotion);
        let mut recent = self.lock_recent();

        let mut reply = assemble(pool, rng);
        let mut attempts = 1;
        while recent.contains(&reply) && attempts < self.config.max_attempts {
            reply = assemble(pool, rng);
            attempts += 1;
        }
        if attempts > 1 {
            debug!(emotion = %emotion, attempts, "re-rolled repeated reply");
        }

        recent.remember(reply.clone());
        reply
    }

    fn is_persistent(&self, emotion: Category, history: &[Category]) -> bool {
        let window = &history[history.len().saturating_sub(self.config.pattern_window)..];
        window.iter().filter(|&&c| c == emotion).count() >= self.config.pattern_min_count
    }

    fn lock_recent(&self) -> std::sync::MutexGuard<'_, RecentReplies> {
        // A panic mid-compose leaves the memory usable; it holds only strings.
        self.recent.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn assemble<R: Rng + ?Sized>(pool: &templates::FragmentPool, rng: &mut R) -> String {
    pool.classes()
        .iter()
        .filter_map(|class| class.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}
