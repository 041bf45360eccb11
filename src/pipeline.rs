//! One conversational turn, end to end.
//!
//! ```text
//! message → classify → score → session risk (clamped) → compose → record
//! ```
//!
//! The pipeline itself holds only read-only resources plus the composer's
//! guarded reply memory, so one instance serves every session.

use crate::classifier::EmotionClassifier;
use crate::config::MindmateConfig;
use crate::corpus::Corpora;
use crate::emotion::{Category, Method};
use crate::error::Result;
use crate::remote::{EmotionModel, HuggingFaceModel};
use crate::responder::{ResponseComposer, coping_strategies};
use crate::risk::RiskScorer;
use crate::session::{SessionRegistry, SessionState};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Everything reported back to the caller after a turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub reply: String,
    pub emotion: Category,
    pub confidence: f32,
    pub method: Method,
    /// This turn's contribution to the session risk.
    pub risk_increment: u8,
    /// Cumulative session risk after this turn.
    pub risk_score: u8,
    /// Most recent emotions, oldest first, including this turn.
    pub mood_history: Vec<Category>,
    pub coping_strategies: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Classifier, scorer, and composer wired together.
#[derive(Debug)]
pub struct SupportPipeline {
    config: MindmateConfig,
    classifier: EmotionClassifier,
    scorer: RiskScorer,
    composer: ResponseComposer,
}

impl SupportPipeline {
    /// Assemble a pipeline from already-loaded corpora, without a remote model.
    pub fn new(config: MindmateConfig, corpora: Corpora) -> Self {
        let classifier = EmotionClassifier::new(config.classifier.clone(), corpora.emotions);
        let scorer = RiskScorer::new(&config.risk, corpora.reference);
        let composer = ResponseComposer::new(config.composer.clone(), &config.risk);
        Self {
            config,
            classifier,
            scorer,
            composer,
        }
    }

    /// Validate `config`, load its corpora, and attach the remote model if a
    /// credential is available.
    ///
    /// Missing corpora and a missing credential only reduce capability.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SupportError::Config`] if the config fails validation.
    pub fn from_config(config: MindmateConfig) -> Result<Self> {
        config.validate()?;
        let corpora = Corpora::load(&config.corpus);
        let remote = match HuggingFaceModel::from_config(&config.remote) {
            Ok(model) => model,
            Err(e) => {
                warn!(error = %e, "remote emotion model unavailable");
                None
            }
        };

        let mut pipeline = Self::new(config, corpora);
        if let Some(model) = remote {
            pipeline = pipeline.with_remote(Arc::new(model));
        }
        info!(
            corpus = pipeline.classifier.has_corpus(),
            remote = pipeline.classifier.has_remote(),
            "support pipeline ready"
        );
        Ok(pipeline)
    }

    /// Attach a remote emotion model.
    pub fn with_remote(mut self, model: Arc<dyn EmotionModel>) -> Self {
        self.classifier = self.classifier.with_remote(model);
        self
    }

    pub fn config(&self) -> &MindmateConfig {
        &self.config
    }

    pub fn classifier(&self) -> &EmotionClassifier {
        &self.classifier
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    pub fn composer(&self) -> &ResponseComposer {
        &self.composer
    }

    /// A fresh session using this pipeline's limits.
    pub fn new_session(&self, id: impl Into<String>) -> SessionState {
        SessionState::new(id, &self.config.session, self.config.risk.max_score)
    }

    /// An empty session registry using this pipeline's limits.
    pub fn session_registry(&self) -> SessionRegistry {
        SessionRegistry::new(self.config.session.clone(), self.config.risk.max_score)
    }

    /// Run one turn against `session`.
    ///
    /// The caller is expected to have rejected empty messages; an empty one
    /// is still answered as neutral.
    pub async fn process_turn(&self, session: &mut SessionState, text: &str) -> TurnOutcome {
        let classification = self.classifier.classify(text).await;
        let emotion = classification.category;

        let risk_increment = self.scorer.score(text, emotion);
        let risk_score = session.add_risk(risk_increment);

        let reply = self
            .composer
            .compose(emotion, risk_score, session.emotions());
        session.record_turn(text, reply.clone(), emotion);

        info!(
            session = session.id(),
            emotion = %emotion,
            method = %classification.method,
            risk_increment,
            risk_score,
            "turn processed"
        );

        TurnOutcome {
            reply,
            emotion,
            confidence: classification.confidence,
            method: classification.method,
            risk_increment,
            risk_score,
            mood_history: session.mood_history().to_vec(),
            coping_strategies: coping_strategies(emotion)
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
            timestamp: Utc::now(),
        }
    }

    /// Run one turn for `session_id`, creating the session on first contact.
    ///
    /// Holds the session's lock for the whole turn so concurrent messages to
    /// the same session are applied one after another.
    pub async fn respond(
        &self,
        registry: &SessionRegistry,
        session_id: &str,
        text: &str,
    ) -> TurnOutcome {
        let handle = registry.get_or_create(session_id);
        let mut session = handle.lock().await;
        self.process_turn(&mut session, text).await
    }
}
