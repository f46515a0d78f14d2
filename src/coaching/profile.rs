use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::CoachingConfig;
use crate::store::SessionRecord;
use crate::types::{DifficultyLevel, ErrorKind};

const STRONG_AREA_SCORE: f64 = 80.0;

/// Derived view of a user, rebuilt from the persisted metrics log every
/// time a coaching decision is needed. Never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceProfile {
    pub user_id: String,
    pub current_level: DifficultyLevel,
    pub session_history: Vec<SessionRecord>,
    pub weak_phonemes: Vec<ErrorKind>,
    pub strong_areas: Vec<String>,
    pub total_practice_minutes: f64,
    /// Later-half minus earlier-half average overall score, in points.
    pub improvement_rate: f64,
    pub last_assessment: DateTime<Utc>,
}

/// Share of sessions whose error list contains `kind`.
pub fn error_frequency(history: &[SessionRecord], kind: ErrorKind) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    let hits = history
        .iter()
        .filter(|record| record.phoneme_errors.contains(&kind))
        .count();
    hits as f64 / history.len() as f64
}

pub fn average_overall(history: &[SessionRecord]) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    history
        .iter()
        .map(|record| record.metrics.overall_score)
        .sum::<f64>()
        / history.len() as f64
}

impl PerformanceProfile {
    pub fn from_history(
        user_id: &str,
        current_level: DifficultyLevel,
        history: &[SessionRecord],
        config: &CoachingConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let weak_phonemes = ErrorKind::all()
            .iter()
            .copied()
            .filter(|kind| error_frequency(history, *kind) >= config.weak_phoneme_min_frequency)
            .collect();

        let strong_areas = strong_areas(history);
        let total_practice_minutes = history.iter().map(|r| r.duration_minutes).sum();

        let improvement_rate = if history.len() >= 4 {
            let mid = history.len() / 2;
            average_overall(&history[mid..]) - average_overall(&history[..mid])
        } else {
            0.0
        };

        Self {
            user_id: user_id.to_string(),
            current_level,
            session_history: history.to_vec(),
            weak_phonemes,
            strong_areas,
            total_practice_minutes,
            improvement_rate,
            last_assessment: now,
        }
    }

    /// Average overall score of the most recent `window` sessions.
    pub fn recent_accuracy(&self, window: usize) -> f64 {
        let start = self.session_history.len().saturating_sub(window);
        average_overall(&self.session_history[start..])
    }
}

fn strong_areas(history: &[SessionRecord]) -> Vec<String> {
    if history.is_empty() {
        return vec![];
    }
    let count = history.len() as f64;
    let averages = [
        (
            "pronunciation",
            history.iter().map(|r| r.metrics.pronunciation_score).sum::<f64>() / count,
        ),
        (
            "fluency",
            history.iter().map(|r| r.metrics.fluency_score).sum::<f64>() / count,
        ),
        (
            "confidence",
            history.iter().map(|r| r.metrics.confidence_score).sum::<f64>() / count,
        ),
        (
            "vocabulary",
            history.iter().map(|r| r.metrics.vocabulary_usage).sum::<f64>() / count,
        ),
        (
            "cultural_awareness",
            history
                .iter()
                .map(|r| r.metrics.cultural_appropriateness_score)
                .sum::<f64>()
                / count,
        ),
    ];

    averages
        .iter()
        .filter(|(_, avg)| *avg >= STRONG_AREA_SCORE)
        .map(|(name, _)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SessionMetrics, SessionType};
    use chrono::Duration;

    pub(crate) fn record_with(
        overall: f64,
        errors: Vec<ErrorKind>,
        minutes: f64,
        age_days: i64,
    ) -> SessionRecord {
        SessionRecord {
            session_id: format!("s-{age_days}"),
            session_type: SessionType::Pronunciation,
            metrics: SessionMetrics {
                overall_score: overall,
                pronunciation_score: overall,
                fluency_score: overall,
                confidence_score: overall,
                vocabulary_usage: overall,
                cultural_appropriateness_score: overall,
            },
            phoneme_errors: errors,
            duration_minutes: minutes,
            completed_at: Utc::now() - Duration::days(age_days),
        }
    }

    #[test]
    fn test_empty_history_gives_conservative_profile() {
        let profile = PerformanceProfile::from_history(
            "u1",
            DifficultyLevel::Beginner,
            &[],
            &CoachingConfig::default(),
            Utc::now(),
        );
        assert!(profile.weak_phonemes.is_empty());
        assert!(profile.strong_areas.is_empty());
        assert_eq!(profile.total_practice_minutes, 0.0);
        assert_eq!(profile.recent_accuracy(10), 0.0);
    }

    #[test]
    fn test_recurring_errors_become_weak_phonemes() {
        let history: Vec<SessionRecord> = (0..6)
            .map(|i| {
                let errors = if i < 4 {
                    vec![ErrorKind::ThSubstitution]
                } else {
                    vec![]
                };
                record_with(70.0, errors, 10.0, 6 - i)
            })
            .collect();
        let profile = PerformanceProfile::from_history(
            "u1",
            DifficultyLevel::Beginner,
            &history,
            &CoachingConfig::default(),
            Utc::now(),
        );
        assert!(profile.weak_phonemes.contains(&ErrorKind::ThSubstitution));
        assert!(!profile.weak_phonemes.contains(&ErrorKind::VWConfusion));
    }

    #[test]
    fn test_improvement_rate_reflects_halves() {
        let history: Vec<SessionRecord> = (0..8)
            .map(|i| {
                let score = if i < 4 { 60.0 } else { 80.0 };
                record_with(score, vec![], 10.0, 8 - i)
            })
            .collect();
        let profile = PerformanceProfile::from_history(
            "u1",
            DifficultyLevel::Beginner,
            &history,
            &CoachingConfig::default(),
            Utc::now(),
        );
        assert!((profile.improvement_rate - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_strong_areas_need_high_average() {
        let history: Vec<SessionRecord> =
            (0..5).map(|i| record_with(85.0, vec![], 10.0, 5 - i)).collect();
        let profile = PerformanceProfile::from_history(
            "u1",
            DifficultyLevel::Intermediate,
            &history,
            &CoachingConfig::default(),
            Utc::now(),
        );
        assert!(profile.strong_areas.contains(&"pronunciation".to_string()));
    }
}
