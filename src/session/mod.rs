//! Session Tracker: lifecycle of one practice session from start to
//! completion. Live state is owned exclusively by the tracker and keyed by
//! an explicit session handle, so concurrent sessions can never collide on
//! an implicit "current session". Completion freezes the state into
//! `SessionMetrics` and hands one record to the metrics store; abandoned
//! sessions simply never persist anything.

pub mod report;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::speech::{DetectedError, FluencyTracker};
use crate::store::{MetricsStore, SessionRecord};
use crate::types::{clamp_score, Attempt, ErrorKind, SessionMetrics, SessionType};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Live, mutable aggregate for one in-progress session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub session_id: SessionId,
    pub user_id: String,
    pub session_type: SessionType,
    pub current_stage: Option<String>,
    pub completed_stage_ids: HashSet<String>,
    pub total_stages: u32,
    pub started_at: DateTime<Utc>,
    pub vocabulary_introduced: Vec<String>,
    pub vocabulary_used: Vec<String>,
    pub pronunciation_issues: Vec<DetectedError>,
    pub attempt_accuracies: Vec<f64>,
    pub stage_accuracies: Vec<f64>,
    pub attempt_confidences: Vec<f64>,
    pub usage_error_count: u32,
    pub capture_failures: u32,
    #[serde(skip)]
    fluency: FluencyTracker,
}

impl SessionState {
    pub fn completed_stages(&self) -> u32 {
        self.completed_stage_ids.len() as u32
    }

    fn has_activity(&self) -> bool {
        !self.attempt_accuracies.is_empty() || !self.stage_accuracies.is_empty()
    }
}

pub struct SessionTracker {
    config: EngineConfig,
    sessions: RwLock<HashMap<SessionId, SessionState>>,
    store: Arc<dyn MetricsStore>,
}

impl SessionTracker {
    pub fn new(config: EngineConfig, store: Arc<dyn MetricsStore>) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
            store,
        }
    }

    /// Opens a session in `InProgress`; `total_stages` is fixed for its
    /// lifetime. The returned handle is required by every subsequent call.
    pub fn start_session(
        &self,
        user_id: &str,
        session_type: SessionType,
        total_stages: u32,
    ) -> SessionId {
        let id = SessionId::generate();
        let state = SessionState {
            session_id: id.clone(),
            user_id: user_id.to_string(),
            session_type,
            current_stage: None,
            completed_stage_ids: HashSet::new(),
            total_stages,
            started_at: Utc::now(),
            vocabulary_introduced: vec![],
            vocabulary_used: vec![],
            pronunciation_issues: vec![],
            attempt_accuracies: vec![],
            stage_accuracies: vec![],
            attempt_confidences: vec![],
            usage_error_count: 0,
            capture_failures: 0,
            fluency: FluencyTracker::new(),
        };
        tracing::info!(
            session_id = %id,
            user_id,
            session_type = session_type.as_str(),
            total_stages,
            "session started"
        );
        self.sessions.write().insert(id.clone(), state);
        id
    }

    /// Lesson vocabulary handed out by the content catalog at stage entry.
    pub fn introduce_vocabulary(
        &self,
        id: &SessionId,
        words: &[String],
    ) -> Result<(), EngineError> {
        let mut sessions = self.sessions.write();
        let state = sessions
            .get_mut(id)
            .ok_or_else(|| EngineError::SessionNotFound(id.to_string()))?;
        for word in words {
            if !state.vocabulary_introduced.contains(word) {
                state.vocabulary_introduced.push(word.clone());
            }
        }
        Ok(())
    }

    /// Folds one scored attempt into the running state. Does not touch
    /// stage completion.
    pub fn update_progress(
        &self,
        id: &SessionId,
        stage_id: &str,
        attempt: &Attempt,
        elapsed_ms: u64,
        accuracy: f64,
        vocab_used: &[String],
        errors: &[DetectedError],
    ) -> Result<(), EngineError> {
        let mut sessions = self.sessions.write();
        let state = sessions
            .get_mut(id)
            .ok_or_else(|| EngineError::SessionNotFound(id.to_string()))?;

        state.current_stage = Some(stage_id.to_string());
        state.attempt_accuracies.push(clamp_score(accuracy));
        state.attempt_confidences.push(attempt.confidence);
        state.pronunciation_issues.extend(errors.iter().cloned());
        state
            .fluency
            .record(&attempt.spoken_text, elapsed_ms, attempt.confidence);
        for word in vocab_used {
            if !state.vocabulary_used.contains(word) {
                state.vocabulary_used.push(word.clone());
            }
        }
        Ok(())
    }

    /// Communicative (register/idiom) errors found during roleplay turns.
    pub fn record_usage_errors(&self, id: &SessionId, count: u32) -> Result<(), EngineError> {
        let mut sessions = self.sessions.write();
        let state = sessions
            .get_mut(id)
            .ok_or_else(|| EngineError::SessionNotFound(id.to_string()))?;
        state.usage_error_count += count;
        Ok(())
    }

    /// Speech-to-text timed out or was unavailable: the attempt counts as
    /// failed input (zero accuracy, no detected errors) and the session
    /// stays in progress so the user can retry.
    pub fn record_capture_failure(&self, id: &SessionId) -> Result<(), EngineError> {
        let mut sessions = self.sessions.write();
        let state = sessions
            .get_mut(id)
            .ok_or_else(|| EngineError::SessionNotFound(id.to_string()))?;
        state.capture_failures += 1;
        state.attempt_accuracies.push(0.0);
        state.attempt_confidences.push(0.0);
        tracing::warn!(session_id = %id, "audio capture failed; attempt scored as zero");
        Ok(())
    }

    /// Marks a stage done. Idempotent per stage id: repeating a stage never
    /// double-counts, and `completed_stages` can never exceed the total
    /// fixed at start.
    pub fn complete_stage(
        &self,
        id: &SessionId,
        stage_id: &str,
        accuracy: f64,
    ) -> Result<u32, EngineError> {
        let mut sessions = self.sessions.write();
        let state = sessions
            .get_mut(id)
            .ok_or_else(|| EngineError::SessionNotFound(id.to_string()))?;

        if state.completed_stage_ids.contains(stage_id) {
            return Ok(state.completed_stages());
        }
        if state.completed_stages() >= state.total_stages {
            return Err(EngineError::StageLimitReached {
                session_id: id.to_string(),
                total_stages: state.total_stages,
            });
        }

        state.completed_stage_ids.insert(stage_id.to_string());
        state.stage_accuracies.push(clamp_score(accuracy));
        Ok(state.completed_stages())
    }

    /// Freezes the session into immutable metrics, persists one record,
    /// and drops the live state. Completing with no activity still returns
    /// valid zeroed metrics.
    pub fn complete_session(&self, id: &SessionId) -> Result<SessionMetrics, EngineError> {
        let state = self
            .sessions
            .write()
            .remove(id)
            .ok_or_else(|| EngineError::SessionNotFound(id.to_string()))?;

        let now = Utc::now();
        let metrics = compute_metrics(&state, &self.config);
        let phoneme_errors = distinct_error_kinds(&state.pronunciation_issues);
        let duration_minutes = (now - state.started_at).num_seconds().max(0) as f64 / 60.0;

        tracing::info!(
            session_id = %id,
            user_id = %state.user_id,
            overall = metrics.overall_score,
            stages = state.completed_stages(),
            "session completed"
        );

        self.store.append(
            &state.user_id,
            SessionRecord {
                session_id: id.to_string(),
                session_type: state.session_type,
                metrics: metrics.clone(),
                phoneme_errors,
                duration_minutes,
                completed_at: now,
            },
        );

        Ok(metrics)
    }

    pub fn session_state(&self, id: &SessionId) -> Option<SessionState> {
        self.sessions.read().get(id).cloned()
    }
}

fn distinct_error_kinds(issues: &[DetectedError]) -> Vec<ErrorKind> {
    let mut kinds = Vec::new();
    for issue in issues {
        if !kinds.contains(&issue.kind) {
            kinds.push(issue.kind);
        }
    }
    kinds
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

const ISSUE_PENALTY: f64 = 2.0;
const USAGE_ERROR_PENALTY: f64 = 12.5;

const WEIGHT_PRONUNCIATION: f64 = 0.35;
const WEIGHT_FLUENCY: f64 = 0.20;
const WEIGHT_CONFIDENCE: f64 = 0.15;
const WEIGHT_VOCABULARY: f64 = 0.15;
const WEIGHT_CULTURAL: f64 = 0.15;

fn compute_metrics(state: &SessionState, config: &EngineConfig) -> SessionMetrics {
    if !state.has_activity() {
        return SessionMetrics::zeroed();
    }

    let base_accuracy = if state.stage_accuracies.is_empty() {
        average(&state.attempt_accuracies)
    } else {
        average(&state.stage_accuracies)
    };
    let pronunciation_score =
        clamp_score(base_accuracy - ISSUE_PENALTY * state.pronunciation_issues.len() as f64);

    let fluency_score = state.fluency.score(&config.fluency);
    let confidence_score = clamp_score(average(&state.attempt_confidences) * 100.0);

    let vocabulary_usage = if state.vocabulary_introduced.is_empty() {
        clamp_score(state.vocabulary_used.len() as f64 * 10.0)
    } else {
        clamp_score(
            state.vocabulary_used.len() as f64 / state.vocabulary_introduced.len() as f64 * 100.0,
        )
    };

    let cultural_appropriateness_score =
        clamp_score(100.0 - USAGE_ERROR_PENALTY * state.usage_error_count as f64);

    let overall_score = WEIGHT_PRONUNCIATION * pronunciation_score
        + WEIGHT_FLUENCY * fluency_score
        + WEIGHT_CONFIDENCE * confidence_score
        + WEIGHT_VOCABULARY * vocabulary_usage
        + WEIGHT_CULTURAL * cultural_appropriateness_score;

    SessionMetrics {
        overall_score,
        pronunciation_score,
        fluency_score,
        confidence_score,
        vocabulary_usage,
        cultural_appropriateness_score,
    }
    .clamped()
}
