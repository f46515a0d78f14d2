//! Property-based coverage of the scoring and coaching invariants.

use chrono::{Duration, Utc};
use proptest::prelude::*;

use bolchaal_engine::coaching::{adjust_difficulty, AdjustmentType, PerformanceProfile};
use bolchaal_engine::config::{CoachingConfig, EngineConfig};
use bolchaal_engine::speech::{calculate_accuracy, detect_common_errors, feedback_for};
use bolchaal_engine::store::SessionRecord;
use bolchaal_engine::types::{Attempt, DifficultyLevel, SessionMetrics, SessionType};
use bolchaal_engine::FeedbackEngine;

const DISCOURAGING: [&str; 6] = ["fail", "bad", "poor", "wrong", "weak", "terrible"];

// ---------- generators ----------

fn transcript() -> impl Strategy<Value = String> {
    "[a-z]{1,8}( [a-z]{1,8}){0,6}"
}

fn record(score: f64, minutes: f64, age_days: i64) -> SessionRecord {
    SessionRecord {
        session_id: format!("s-{age_days}"),
        session_type: SessionType::Pronunciation,
        metrics: SessionMetrics {
            overall_score: score,
            pronunciation_score: score,
            fluency_score: score,
            confidence_score: score,
            vocabulary_usage: score,
            cultural_appropriateness_score: score,
        },
        phoneme_errors: vec![],
        duration_minutes: minutes,
        completed_at: Utc::now() - Duration::days(age_days),
    }
}

fn strong_history() -> impl Strategy<Value = Vec<SessionRecord>> {
    (10usize..30, 75.0f64..100.0, 30.0f64..60.0).prop_map(|(count, score, minutes)| {
        (0..count)
            .map(|i| record(score, minutes, (count - i) as i64))
            .collect()
    })
}

// ---------- properties ----------

proptest! {
    #[test]
    fn prop_accuracy_is_bounded(spoken in transcript(), expected in transcript()) {
        let accuracy = calculate_accuracy(&spoken, &expected);
        prop_assert!((0.0..=100.0).contains(&accuracy));
    }

    #[test]
    fn prop_identical_input_is_perfect_and_error_free(text in transcript()) {
        prop_assert_eq!(calculate_accuracy(&text, &text), 100.0);
        prop_assert!(detect_common_errors(&text, &text).is_empty());
    }

    #[test]
    fn prop_feedback_always_has_bilingual_tips(accuracy in -50.0f64..150.0) {
        let bundle = feedback_for(accuracy, &[]);
        prop_assert!(bundle.message.is_complete());
        prop_assert!(!bundle.tips.is_empty());
        for tip in &bundle.tips {
            prop_assert!(tip.is_complete());
        }
    }

    #[test]
    fn prop_feedback_never_discourages(accuracy in 0.0f64..100.0, spoken in transcript(), expected in transcript()) {
        let errors = detect_common_errors(&spoken, &expected);
        let bundle = feedback_for(accuracy, &errors);
        let mut text = bundle.message.en.to_lowercase();
        for tip in &bundle.tips {
            text.push_str(&tip.en.to_lowercase());
        }
        for word in DISCOURAGING {
            prop_assert!(!text.contains(word), "feedback contains {:?}", word);
        }
    }

    #[test]
    fn prop_attempt_confidence_is_clamped(confidence in -10.0f64..10.0) {
        let attempt = Attempt::new("a", "a", confidence, 0);
        prop_assert!((0.0..=1.0).contains(&attempt.confidence));
    }

    #[test]
    fn prop_promotion_confidence_has_floor(history in strong_history()) {
        let profile = PerformanceProfile::from_history(
            "u1",
            DifficultyLevel::Beginner,
            &history,
            &CoachingConfig::default(),
            Utc::now(),
        );
        let adjustment = adjust_difficulty(&profile, &CoachingConfig::default());
        prop_assert_eq!(adjustment.adjustment_type, AdjustmentType::Increase);
        prop_assert!(adjustment.confidence >= 0.7);
        prop_assert!(adjustment.confidence <= 0.95);
        prop_assert!(adjustment.reason.is_complete());
    }

    #[test]
    fn prop_stage_completion_is_idempotent(repeats in 1usize..6) {
        let engine = FeedbackEngine::new(EngineConfig::default());
        let id = engine.start_session("u1", SessionType::Pronunciation, 2);
        for _ in 0..repeats {
            engine.complete_stage(&id, "stage-1", 80.0).unwrap();
        }
        let state = engine.session_state(&id).unwrap();
        prop_assert_eq!(state.completed_stages(), 1);
        prop_assert!(state.completed_stages() <= state.total_stages);
    }

    #[test]
    fn prop_session_metrics_are_bounded(
        spoken in transcript(),
        expected in transcript(),
        confidence in 0.0f64..1.0,
    ) {
        let engine = FeedbackEngine::new(EngineConfig::default());
        let id = engine.start_session("u1", SessionType::Pronunciation, 1);
        let outcome = bolchaal_engine::CaptureOutcome::Captured {
            attempt: Attempt::new(&spoken, &expected, confidence, 0),
            elapsed_ms: 2_000,
        };
        let result = engine.process_attempt(&id, "s1", &[], outcome).unwrap();
        engine.complete_stage(&id, "s1", result.accuracy).unwrap();
        let metrics = engine.complete_session(&id).unwrap();
        for value in [
            metrics.overall_score,
            metrics.pronunciation_score,
            metrics.fluency_score,
            metrics.confidence_score,
            metrics.vocabulary_usage,
            metrics.cultural_appropriateness_score,
        ] {
            prop_assert!((0.0..=100.0).contains(&value));
        }
    }
}

// ---------- plain unit tests ----------

#[test]
fn test_empty_weekly_report_is_well_formed() {
    let engine = FeedbackEngine::new(EngineConfig::default());
    let report = engine.weekly_report("nobody", Utc::now());
    assert_eq!(report.metrics.session_count, 0);
    assert!(report.summary.is_complete());
    assert!(!report.next_week_goals.is_empty());
}

#[test]
fn test_empty_history_maintains_with_low_confidence() {
    let profile = PerformanceProfile::from_history(
        "u1",
        DifficultyLevel::Intermediate,
        &[],
        &CoachingConfig::default(),
        Utc::now(),
    );
    let adjustment = adjust_difficulty(&profile, &CoachingConfig::default());
    assert_eq!(adjustment.adjustment_type, AdjustmentType::Maintain);
    assert!((adjustment.confidence - 0.2).abs() < 1e-9);
}
