use serde::{Deserialize, Serialize};

use crate::coaching::profile::{error_frequency, PerformanceProfile};
use crate::types::{ErrorKind, Localized};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Lesson,
    Scenario,
    Exercise,
}

/// A single gate inside an unlock rule. All requirements of a rule must
/// pass for the rule to fire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Requirement {
    MinAccuracy { threshold: f64 },
    MinPracticeMinutes { minutes: f64 },
    MinSessions { count: usize },
    /// Error kind must appear in at most this share of sessions.
    PhonemeUnderControl {
        #[serde(rename = "errorKind")]
        kind: ErrorKind,
        max_frequency: f64,
    },
}

impl Requirement {
    fn is_met(&self, profile: &PerformanceProfile, recent_window: usize) -> bool {
        match self {
            Self::MinAccuracy { threshold } => {
                !profile.session_history.is_empty()
                    && profile.recent_accuracy(recent_window) >= *threshold
            }
            Self::MinPracticeMinutes { minutes } => profile.total_practice_minutes >= *minutes,
            Self::MinSessions { count } => profile.session_history.len() >= *count,
            Self::PhonemeUnderControl {
                kind,
                max_frequency,
            } => {
                !profile.session_history.is_empty()
                    && error_frequency(&profile.session_history, *kind) <= *max_frequency
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::MinAccuracy { threshold } => format!("recent accuracy at least {threshold}%"),
            Self::MinPracticeMinutes { minutes } => {
                format!("at least {minutes} practice minutes")
            }
            Self::MinSessions { count } => format!("at least {count} completed sessions"),
            Self::PhonemeUnderControl { kind, .. } => {
                format!("{} under control", kind.area_label().replace('_', " "))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockRule {
    pub content_type: ContentType,
    pub content_id: String,
    pub title: Localized,
    pub unlocked_by: String,
    pub requirements: Vec<Requirement>,
}

/// Follow-on content made available once thresholds are met.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unlock {
    pub content_type: ContentType,
    pub content_id: String,
    pub title: Localized,
    pub unlocked_by: String,
    pub requirements: Vec<String>,
}

pub fn default_rules() -> Vec<UnlockRule> {
    vec![
        UnlockRule {
            content_type: ContentType::Scenario,
            content_id: "scenario_market_bargaining".into(),
            title: Localized::new("Bargaining at the Sabzi Mandi", "सब्ज़ी मंडी में मोल-भाव"),
            unlocked_by: "steady early practice".into(),
            requirements: vec![
                Requirement::MinAccuracy { threshold: 70.0 },
                Requirement::MinSessions { count: 5 },
            ],
        },
        UnlockRule {
            content_type: ContentType::Lesson,
            content_id: "lesson_story_mode_2".into(),
            title: Localized::new("Story Mode: The Railway Journey", "कहानी मोड: रेल यात्रा"),
            unlocked_by: "consistent practice time".into(),
            requirements: vec![
                Requirement::MinPracticeMinutes { minutes: 120.0 },
                Requirement::MinSessions { count: 8 },
            ],
        },
        UnlockRule {
            content_type: ContentType::Exercise,
            content_id: "exercise_th_mastery".into(),
            title: Localized::new("Advanced 'th' Tongue Twisters", "कठिन 'th' अभ्यास"),
            unlocked_by: "taming the th sound".into(),
            requirements: vec![
                Requirement::MinAccuracy { threshold: 80.0 },
                Requirement::PhonemeUnderControl {
                    kind: ErrorKind::ThSubstitution,
                    max_frequency: 0.2,
                },
            ],
        },
        UnlockRule {
            content_type: ContentType::Scenario,
            content_id: "scenario_job_interview".into(),
            title: Localized::new("The Job Interview", "नौकरी का इंटरव्यू"),
            unlocked_by: "sustained accuracy and practice".into(),
            requirements: vec![
                Requirement::MinAccuracy { threshold: 75.0 },
                Requirement::MinPracticeMinutes { minutes: 300.0 },
            ],
        },
    ]
}

/// Evaluates each rule against the profile; a rule fires only when every
/// requirement is met. Fired unlocks carry the satisfied requirement text.
pub fn progress_unlocks(
    profile: &PerformanceProfile,
    rules: &[UnlockRule],
    recent_window: usize,
) -> Vec<Unlock> {
    let mut unlocks = Vec::new();
    for rule in rules {
        if rule
            .requirements
            .iter()
            .all(|req| req.is_met(profile, recent_window))
        {
            tracing::debug!(
                user_id = %profile.user_id,
                content_id = %rule.content_id,
                "unlock rule fired"
            );
            unlocks.push(Unlock {
                content_type: rule.content_type,
                content_id: rule.content_id.clone(),
                title: rule.title.clone(),
                unlocked_by: rule.unlocked_by.clone(),
                requirements: rule.requirements.iter().map(|r| r.describe()).collect(),
            });
        }
    }
    unlocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoachingConfig;
    use crate::store::SessionRecord;
    use crate::types::{DifficultyLevel, SessionMetrics, SessionType};
    use chrono::{Duration, Utc};

    fn history(count: usize, score: f64, minutes_each: f64) -> Vec<SessionRecord> {
        (0..count)
            .map(|i| SessionRecord {
                session_id: format!("s{i}"),
                session_type: SessionType::Conversation,
                metrics: SessionMetrics {
                    overall_score: score,
                    pronunciation_score: score,
                    fluency_score: score,
                    confidence_score: score,
                    vocabulary_usage: score,
                    cultural_appropriateness_score: score,
                },
                phoneme_errors: vec![],
                duration_minutes: minutes_each,
                completed_at: Utc::now() - Duration::days((count - i) as i64),
            })
            .collect()
    }

    fn profile_of(records: Vec<SessionRecord>) -> PerformanceProfile {
        PerformanceProfile::from_history(
            "u1",
            DifficultyLevel::Beginner,
            &records,
            &CoachingConfig::default(),
            Utc::now(),
        )
    }

    #[test]
    fn test_all_requirements_must_pass() {
        // 70% accuracy over 4 sessions: accuracy gate passes, session gate fails.
        let profile = profile_of(history(4, 72.0, 10.0));
        let unlocks = progress_unlocks(&profile, &default_rules(), 10);
        assert!(unlocks
            .iter()
            .all(|u| u.content_id != "scenario_market_bargaining"));
    }

    #[test]
    fn test_market_scenario_unlocks() {
        let profile = profile_of(history(5, 72.0, 10.0));
        let unlocks = progress_unlocks(&profile, &default_rules(), 10);
        let market = unlocks
            .iter()
            .find(|u| u.content_id == "scenario_market_bargaining")
            .expect("market scenario should unlock");
        assert!(market.title.is_complete());
        assert!(!market.requirements.is_empty());
    }

    #[test]
    fn test_new_user_unlocks_nothing() {
        let profile = profile_of(vec![]);
        assert!(progress_unlocks(&profile, &default_rules(), 10).is_empty());
    }

    #[test]
    fn test_phoneme_gate_blocks_on_frequent_errors() {
        let mut records = history(10, 85.0, 40.0);
        for record in &mut records {
            record.phoneme_errors.push(ErrorKind::ThSubstitution);
        }
        let profile = profile_of(records);
        let unlocks = progress_unlocks(&profile, &default_rules(), 10);
        assert!(unlocks.iter().all(|u| u.content_id != "exercise_th_mastery"));
    }

    #[test]
    fn test_every_rule_title_is_bilingual() {
        for rule in default_rules() {
            assert!(rule.title.is_complete());
            assert!(!rule.requirements.is_empty());
        }
    }
}
