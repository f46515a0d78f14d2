//! Speaking-practice feedback engine for Hindi-speaking English learners.
//!
//! The crate is a synchronous library driven by a UI event loop: the host
//! captures speech, hands transcripts in, and renders whatever comes back.
//! Everything user-facing is bilingual (English and Hindi) and worded to
//! encourage rather than grade.
//!
//! [`FeedbackEngine`] is the facade. One call per attempt
//! ([`FeedbackEngine::process_attempt`]) runs scoring, interference-pattern
//! detection and feedback; session lifecycle, coaching and weekly reports
//! hang off the same handle.

pub mod coaching;
pub mod config;
pub mod culture;
pub mod error;
pub mod logging;
pub mod session;
pub mod speech;
pub mod store;
pub mod types;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coaching::{
    adjust_difficulty, default_rules, identify_weak_areas, progress_unlocks,
    targeted_recommendations, DifficultyAdjustment, PerformanceProfile, PracticeRecommendation,
    Unlock, UnlockRule, WeakArea,
};
use crate::config::EngineConfig;
use crate::culture::{
    detect_and_correct, gentle_feedback, Correction, GentleFeedback, Scenario, ScenarioCatalog,
    ScenarioCategory,
};
use crate::error::EngineError;
use crate::session::report::{generate_weekly_report, WeeklyReport};
use crate::session::{SessionId, SessionState, SessionTracker};
use crate::speech::{
    analyze_phonemes, calculate_accuracy, detect_common_errors, feedback_for, DetectedError,
    FeedbackBundle, PhonemeAnalysis,
};
use crate::store::{InMemoryMetricsStore, MetricsStore};
use crate::types::{Attempt, DifficultyLevel, SessionMetrics, SessionType};

/// What the capture layer produced for one utterance. Speech-to-text
/// failures flow through the same entry point as clean transcripts.
#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    Captured { attempt: Attempt, elapsed_ms: u64 },
    Failed { reason: String },
}

/// Everything the UI needs to render one attempt's feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResult {
    pub accuracy: f64,
    pub phoneme_analysis: PhonemeAnalysis,
    pub errors: Vec<DetectedError>,
    pub feedback: FeedbackBundle,
    /// Present only for roleplay and conversation sessions.
    pub correction: Option<Correction>,
    pub gentle_feedback: Option<GentleFeedback>,
}

/// One coaching pass over a user's persisted history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingPlan {
    pub profile: PerformanceProfile,
    pub difficulty: DifficultyAdjustment,
    pub weak_areas: Vec<WeakArea>,
    pub recommendations: Vec<PracticeRecommendation>,
    pub unlocks: Vec<Unlock>,
}

pub struct FeedbackEngine {
    config: EngineConfig,
    store: Arc<dyn MetricsStore>,
    tracker: SessionTracker,
    catalog: ScenarioCatalog,
    unlock_rules: Vec<UnlockRule>,
}

impl FeedbackEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryMetricsStore::new()))
    }

    /// Plugs in the host's persistence collaborator.
    pub fn with_store(config: EngineConfig, store: Arc<dyn MetricsStore>) -> Self {
        let tracker = SessionTracker::new(config.clone(), store.clone());
        Self {
            config,
            store,
            tracker,
            catalog: ScenarioCatalog::new(),
            unlock_rules: default_rules(),
        }
    }

    pub fn start_session(
        &self,
        user_id: &str,
        session_type: SessionType,
        total_stages: u32,
    ) -> SessionId {
        self.tracker.start_session(user_id, session_type, total_stages)
    }

    pub fn introduce_vocabulary(
        &self,
        id: &SessionId,
        words: &[String],
    ) -> Result<(), EngineError> {
        self.tracker.introduce_vocabulary(id, words)
    }

    /// The per-attempt pipeline: score, detect interference patterns,
    /// build feedback, and fold the attempt into the live session. A
    /// capture failure is recorded as a zero-accuracy attempt and surfaced
    /// as an error so the host can prompt a retry.
    pub fn process_attempt(
        &self,
        id: &SessionId,
        stage_id: &str,
        vocab_used: &[String],
        outcome: CaptureOutcome,
    ) -> Result<AttemptResult, EngineError> {
        let (attempt, elapsed_ms) = match outcome {
            CaptureOutcome::Captured { attempt, elapsed_ms } => (attempt, elapsed_ms),
            CaptureOutcome::Failed { reason } => {
                self.tracker.record_capture_failure(id)?;
                return Err(EngineError::AudioCapture(reason));
            }
        };

        let session_type = self
            .tracker
            .session_state(id)
            .ok_or_else(|| EngineError::SessionNotFound(id.to_string()))?
            .session_type;

        let accuracy = calculate_accuracy(&attempt.spoken_text, &attempt.expected_text);
        let phoneme_analysis = analyze_phonemes(&attempt.spoken_text, &attempt.expected_text);
        let errors = detect_common_errors(&attempt.spoken_text, &attempt.expected_text);
        let feedback = feedback_for(accuracy, &errors);

        self.tracker
            .update_progress(id, stage_id, &attempt, elapsed_ms, accuracy, vocab_used, &errors)?;

        let (correction, gentle) = match session_type {
            SessionType::Roleplay | SessionType::Conversation => {
                let correction = detect_and_correct(&attempt.spoken_text);
                if !correction.corrections.is_empty() {
                    self.tracker
                        .record_usage_errors(id, correction.corrections.len() as u32)?;
                }
                let gentle = gentle_feedback(&correction.corrections, attempt.confidence);
                (Some(correction), Some(gentle))
            }
            _ => (None, None),
        };

        Ok(AttemptResult {
            accuracy,
            phoneme_analysis,
            errors,
            feedback,
            correction,
            gentle_feedback: gentle,
        })
    }

    pub fn complete_stage(
        &self,
        id: &SessionId,
        stage_id: &str,
        accuracy: f64,
    ) -> Result<u32, EngineError> {
        self.tracker.complete_stage(id, stage_id, accuracy)
    }

    pub fn complete_session(&self, id: &SessionId) -> Result<SessionMetrics, EngineError> {
        self.tracker.complete_session(id)
    }

    pub fn session_state(&self, id: &SessionId) -> Option<SessionState> {
        self.tracker.session_state(id)
    }

    /// Rebuilds the performance profile from the metrics log and runs every
    /// coaching policy over it in one pass.
    pub fn coach(&self, user_id: &str, current_level: DifficultyLevel) -> CoachingPlan {
        let history = self.store.history(user_id);
        let profile = PerformanceProfile::from_history(
            user_id,
            current_level,
            &history,
            &self.config.coaching,
            Utc::now(),
        );
        let difficulty = adjust_difficulty(&profile, &self.config.coaching);
        let weak_areas = identify_weak_areas(&profile, &self.config.weak_area);
        let recommendations = targeted_recommendations(&weak_areas);
        let unlocks = progress_unlocks(
            &profile,
            &self.unlock_rules,
            self.config.coaching.recent_window,
        );
        CoachingPlan {
            profile,
            difficulty,
            weak_areas,
            recommendations,
            unlocks,
        }
    }

    pub fn scenarios(
        &self,
        category: Option<ScenarioCategory>,
        difficulty: DifficultyLevel,
    ) -> Vec<&Scenario> {
        self.catalog.scenarios(category, difficulty)
    }

    pub fn select_scenario(
        &self,
        level: DifficultyLevel,
        time_available_minutes: u32,
    ) -> Option<&Scenario> {
        self.catalog.select_scenario(level, time_available_minutes)
    }

    pub fn weekly_report(&self, user_id: &str, now: DateTime<Utc>) -> WeeklyReport {
        generate_weekly_report(self.store.as_ref(), &self.config.report, user_id, now)
    }
}
