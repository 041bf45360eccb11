//! End-to-end pipeline tests against on-disk CSV corpora.
//!
//! Each test builds its own corpus directory in a tempdir, so nothing here
//! depends on the shipped datasets or on network access.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use mindmate::config::MindmateConfig;
use mindmate::responder::{CRISIS_RESOURCES, PROFESSIONAL_HELP};
use mindmate::{Category, Corpora, Method, SupportPipeline};
use std::collections::HashSet;
use std::path::Path;
use tempfile::TempDir;

const EMOTIONS_CSV: &str = "text,emotion\n\
\"the traffic jam ruined my commute completely\",anger\n\
\"my puppy learned a new trick today\",joy\n\
\"the train schedule changed again\",neutral\n\
,joy\n";

const CONTROL_CSV: &str = "text\n\
went to the park with friends\n\
cooked pasta for dinner\n";

const CONDITION_CSV: &str = "text\n\
cannot sleep again tonight\n\
cannot sleep and nothing helps\n";

fn write_corpora(dir: &Path) {
    std::fs::write(dir.join("goemotions.csv"), EMOTIONS_CSV).unwrap();
    std::fs::write(dir.join("control.csv"), CONTROL_CSV).unwrap();
    std::fs::write(dir.join("condition.csv"), CONDITION_CSV).unwrap();
}

fn config_for(dir: &Path) -> MindmateConfig {
    let mut config = MindmateConfig::default();
    config.corpus.dir = dir.to_path_buf();
    config.remote.enabled = false;
    config
}

fn pipeline_with_corpora() -> (TempDir, SupportPipeline) {
    let tmp = TempDir::new().unwrap();
    write_corpora(tmp.path());
    let pipeline = SupportPipeline::from_config(config_for(tmp.path())).unwrap();
    (tmp, pipeline)
}

#[tokio::test]
async fn corpus_similarity_labels_unmatched_message() {
    let (_tmp, pipeline) = pipeline_with_corpora();
    assert!(pipeline.classifier().has_corpus());
    assert!(!pipeline.classifier().has_remote());

    let result = pipeline
        .classifier()
        .classify("stuck in traffic on the commute")
        .await;
    assert_eq!(result.category, Category::Anger);
    assert_eq!(result.method, Method::Similarity);
    assert!((result.confidence - 0.6).abs() < 1e-6);
}

#[tokio::test]
async fn zero_similarity_is_neutral() {
    let (_tmp, pipeline) = pipeline_with_corpora();
    let result = pipeline
        .classifier()
        .classify("zebra xylophone quartz")
        .await;
    assert_eq!(result.category, Category::Neutral);
    assert_eq!(result.method, Method::Similarity);
    assert!((result.confidence - 0.5).abs() < 1e-6);
}

#[tokio::test]
async fn keyword_wins_over_corpus() {
    let (_tmp, pipeline) = pipeline_with_corpora();
    let result = pipeline
        .classifier()
        .classify("I'm happy about the traffic jam on my commute")
        .await;
    assert_eq!(result.category, Category::Joy);
    assert_eq!(result.method, Method::Keyword);
    assert!((result.confidence - 0.85).abs() < 1e-6);
}

#[tokio::test]
async fn reference_overlap_contributes_risk() {
    let (_tmp, pipeline) = pipeline_with_corpora();
    let mut session = pipeline.new_session("overlap");

    let outcome = pipeline
        .process_turn(&mut session, "cannot sleep tonight")
        .await;
    assert_eq!(outcome.risk_increment, 2);
    assert_eq!(session.risk_score(), 2);

    let calm = pipeline
        .process_turn(&mut session, "cooked pasta with friends")
        .await;
    assert_eq!(calm.risk_increment, 0);
    assert_eq!(calm.risk_score, 2);
}

#[tokio::test]
async fn missing_corpora_still_answer() {
    let tmp = TempDir::new().unwrap();
    let pipeline = SupportPipeline::from_config(config_for(tmp.path())).unwrap();
    assert!(!pipeline.classifier().has_corpus());

    let mut session = pipeline.new_session("bare");
    let outcome = pipeline
        .process_turn(&mut session, "cannot sleep tonight")
        .await;
    assert_eq!(outcome.emotion, Category::Neutral);
    assert_eq!(outcome.method, Method::Default);
    assert_eq!(outcome.risk_increment, 0);
    assert!(!outcome.reply.is_empty());
}

#[tokio::test]
async fn risk_never_decreases_and_stays_bounded() {
    let pipeline = SupportPipeline::new(MindmateConfig::default(), Corpora::empty());
    let mut session = pipeline.new_session("bounded");
    let messages = [
        "hello there",
        "I feel worthless",
        "the weather is okay",
        "I want to end it all",
        "so tired and lonely",
        "I can't go on",
        "had a wonderful lunch",
        "better off dead",
        "nothing matters",
    ];

    let mut previous = 0;
    for message in messages {
        let outcome = pipeline.process_turn(&mut session, message).await;
        assert!(
            outcome.risk_score >= previous,
            "risk dropped on {message:?}"
        );
        assert!(outcome.risk_score <= 10);
        previous = outcome.risk_score;
    }
    assert_eq!(previous, 10);
}

#[tokio::test]
async fn crisis_block_appears_from_seven() {
    let pipeline = SupportPipeline::new(MindmateConfig::default(), Corpora::empty());
    let mut session = pipeline.new_session("crisis");

    let first = pipeline.process_turn(&mut session, "I feel hopeless").await;
    assert_eq!(first.risk_score, 2);
    assert!(!first.reply.contains(PROFESSIONAL_HELP));

    let second = pipeline
        .process_turn(&mut session, "I feel worthless")
        .await;
    assert_eq!(second.risk_score, 4);
    assert!(second.reply.contains(PROFESSIONAL_HELP));
    assert!(!second.reply.contains(CRISIS_RESOURCES));

    let third = pipeline.process_turn(&mut session, "better off dead").await;
    assert_eq!(third.risk_score, 7);
    assert!(third.reply.contains(CRISIS_RESOURCES));
    assert!(!third.reply.contains(PROFESSIONAL_HELP));
}

#[tokio::test]
async fn repeated_emotion_gets_varied_replies_and_pattern_note() {
    let pipeline = SupportPipeline::new(MindmateConfig::default(), Corpora::empty());
    let mut session = pipeline.new_session("variety");

    let mut replies = HashSet::new();
    let mut last = String::new();
    for _ in 0..10 {
        let outcome = pipeline
            .process_turn(&mut session, "I've been crying a lot")
            .await;
        assert_eq!(outcome.emotion, Category::Sadness);
        assert!(replies.insert(outcome.reply.clone()), "reply repeated");
        last = outcome.reply;
    }
    assert!(
        last.contains("\n\n"),
        "pattern note expected after repeated sadness"
    );
}

#[tokio::test]
async fn sessions_are_isolated() {
    let pipeline = SupportPipeline::new(MindmateConfig::default(), Corpora::empty());
    let registry = pipeline.session_registry();

    pipeline.respond(&registry, "a", "I want to die").await;
    let other = pipeline.respond(&registry, "b", "hello there").await;
    assert_eq!(other.risk_score, 0);
    assert_eq!(other.mood_history, vec![Category::Neutral]);

    assert!(registry.reset("a").await);
    let after = pipeline.respond(&registry, "a", "hello again").await;
    assert_eq!(after.risk_score, 0);
    assert_eq!(registry.len(), 2);
}
