//! Remote emotion model over the HuggingFace inference API.
//!
//! Request: `POST <endpoint>` with `Authorization: Bearer <key>` and body
//! `{"inputs": "<text>"}`. The response is a label distribution, either
//! nested one level (`[[{label, score}, ...]]`, one list per input) or flat.
//!
//! Calls are single-shot: a timeout, non-200 status, or unparseable body is
//! returned as [`SupportError::Remote`] and never retried.

use crate::config::RemoteConfig;
use crate::error::{Result, SupportError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// One entry of a model's label distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// Top label plus the full distribution it was picked from.
#[derive(Debug, Clone, PartialEq)]
pub struct RemotePrediction {
    pub label: String,
    pub score: f32,
    pub distribution: Vec<LabelScore>,
}

/// A model that can label text with an emotion.
#[async_trait]
pub trait EmotionModel: Send + Sync {
    /// Predict the emotion distribution for `text`.
    async fn predict(&self, text: &str) -> Result<RemotePrediction>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

/// HuggingFace inference API client.
pub struct HuggingFaceModel {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for HuggingFaceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceModel")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl HuggingFaceModel {
    /// Build a client with the given endpoint, key, and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::Remote`] if the HTTP client cannot be constructed.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SupportError::Remote(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Build from config, or `Ok(None)` when disabled or no credential is set.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::Remote`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &RemoteConfig) -> Result<Option<Self>> {
        if !config.enabled {
            info!("remote emotion model disabled in config");
            return Ok(None);
        }
        let Some(api_key) = config.resolved_api_key() else {
            info!(
                env = %config.api_key_env,
                "no remote model credential; using local classification only"
            );
            return Ok(None);
        };
        Self::new(
            config.endpoint.clone(),
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
        .map(Some)
    }
}

#[async_trait]
impl EmotionModel for HuggingFaceModel {
    async fn predict(&self, text: &str) -> Result<RemotePrediction> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "inputs": text }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SupportError::Remote("request timed out".into())
                } else {
                    SupportError::Remote(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(SupportError::Remote(format!("unexpected status {status}")));
        }

        let body: InferenceResponse = response
            .json()
            .await
            .map_err(|e| SupportError::Remote(format!("malformed response: {e}")))?;
        let distribution = match body {
            InferenceResponse::Nested(mut lists) if !lists.is_empty() => lists.swap_remove(0),
            InferenceResponse::Nested(_) => Vec::new(),
            InferenceResponse::Flat(list) => list,
        };

        let prediction = top_label(distribution)?;
        debug!(label = %prediction.label, score = prediction.score, "remote prediction");
        Ok(prediction)
    }

    fn name(&self) -> &str {
        "huggingface"
    }
}

/// Pick the highest-scoring finite entry.
fn top_label(distribution: Vec<LabelScore>) -> Result<RemotePrediction> {
    let best = distribution
        .iter()
        .filter(|ls| ls.score.is_finite())
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .cloned()
        .ok_or_else(|| SupportError::Remote("empty label distribution".into()))?;
    Ok(RemotePrediction {
        label: best.label,
        score: best.score,
        distribution,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn ls(label: &str, score: f32) -> LabelScore {
        LabelScore {
            label: label.into(),
            score,
        }
    }

    #[test]
    fn top_label_picks_max() {
        let p = top_label(vec![ls("joy", 0.1), ls("fear", 0.8), ls("anger", 0.1)]).unwrap();
        assert_eq!(p.label, "fear");
        assert_eq!(p.distribution.len(), 3);
    }

    #[test]
    fn top_label_ignores_nan() {
        let p = top_label(vec![ls("joy", f32::NAN), ls("sadness", 0.2)]).unwrap();
        assert_eq!(p.label, "sadness");
    }

    #[test]
    fn empty_distribution_is_an_error() {
        assert!(matches!(top_label(vec![]), Err(SupportError::Remote(_))));
    }

    #[test]
    fn nested_and_flat_shapes_parse() {
        let nested: InferenceResponse =
            serde_json::from_str(r#"[[{"label":"joy","score":0.9}]]"#).unwrap();
        assert!(matches!(nested, InferenceResponse::Nested(_)));
        let flat: InferenceResponse =
            serde_json::from_str(r#"[{"label":"joy","score":0.9}]"#).unwrap();
        assert!(matches!(flat, InferenceResponse::Flat(_)));
    }

    #[test]
    fn from_config_without_key_is_none() {
        let config = RemoteConfig {
            api_key: None,
            api_key_env: "MINDMATE_TEST_UNSET_KEY_VAR".into(),
            ..Default::default()
        };
        assert!(HuggingFaceModel::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn from_config_disabled_is_none() {
        let config = RemoteConfig {
            enabled: false,
            api_key: Some("hf_test".into()),
            ..Default::default()
        };
        assert!(HuggingFaceModel::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn from_config_with_key_builds() {
        let config = RemoteConfig {
            api_key: Some("hf_test".into()),
            ..Default::default()
        };
        assert!(HuggingFaceModel::from_config(&config).unwrap().is_some());
    }
}
