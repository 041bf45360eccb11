//! Mindmate: emotion-aware conversational support assistant.
//!
//! This crate turns a free-text message into an emotion label, a bounded
//! session risk score, and a templated empathetic reply:
//! Message → Classifier → Risk Scorer → Session → Composer → Reply
//!
//! # Architecture
//!
//! - **Lexicon**: ordered keyword tables for emotions and risk tiers
//! - **Corpus**: CSV reference sets, TF-IDF indexed once at startup
//! - **Classifier**: keyword → remote model → corpus similarity → default
//! - **Risk**: single-turn increments, accumulated and clamped per session
//! - **Responder**: fragment assembly with anti-repetition and risk addenda
//!
//! Nothing here is a clinical instrument. Risk scores are heuristic
//! severity proxies only.

pub mod classifier;
pub mod config;
pub mod corpus;
pub mod emotion;
pub mod error;
pub mod lexicon;
pub mod pipeline;
pub mod remote;
pub mod responder;
pub mod risk;
pub mod session;

pub use classifier::EmotionClassifier;
pub use config::MindmateConfig;
pub use corpus::Corpora;
pub use emotion::{Category, ClassificationResult, Method};
pub use error::{Result, SupportError};
pub use pipeline::{SupportPipeline, TurnOutcome};
pub use remote::{EmotionModel, HuggingFaceModel};
pub use responder::ResponseComposer;
pub use risk::RiskScorer;
pub use session::{SessionRegistry, SessionState};
