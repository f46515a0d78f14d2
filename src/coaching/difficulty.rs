use serde::{Deserialize, Serialize};

use crate::coaching::profile::PerformanceProfile;
use crate::config::{CoachingConfig, PromotionGate};
use crate::types::{clamp_unit, DifficultyLevel, Localized};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentType {
    Increase,
    Decrease,
    Maintain,
}

/// Output-only recommendation, recomputed per request. The recommended
/// level moves exactly one step and differs from the current level only
/// when the type is not maintain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyAdjustment {
    pub current_difficulty: DifficultyLevel,
    pub recommended_difficulty: DifficultyLevel,
    pub adjustment_type: AdjustmentType,
    pub reason: Localized,
    pub confidence: f64,
}

fn gate_met(gate: &PromotionGate, recent_accuracy: f64, profile: &PerformanceProfile) -> bool {
    recent_accuracy >= gate.min_accuracy
        && profile.session_history.len() >= gate.min_sessions
        && profile.total_practice_minutes >= gate.min_practice_minutes
}

/// Confidence grows with sample size; a fired promotion always reports at
/// least 0.7 because its gate already guarantees a meaningful sample.
fn sample_confidence(sessions: usize) -> f64 {
    clamp_unit(0.25 + 0.05 * sessions as f64).clamp(0.2, 0.95)
}

fn promotion_confidence(sessions: usize, gate: &PromotionGate) -> f64 {
    let extra = sessions.saturating_sub(gate.min_sessions) as f64;
    (0.7 + 0.01 * extra).clamp(0.7, 0.95)
}

/// Rule-based difficulty policy over the recent session window. Reasons
/// are always forward-looking; an empty history degrades to a low-confidence
/// maintain instead of an error.
pub fn adjust_difficulty(
    profile: &PerformanceProfile,
    config: &CoachingConfig,
) -> DifficultyAdjustment {
    let level = profile.current_level;
    let sessions = profile.session_history.len();
    let recent_accuracy = profile.recent_accuracy(config.recent_window);

    if sessions == 0 {
        return DifficultyAdjustment {
            current_difficulty: level,
            recommended_difficulty: level,
            adjustment_type: AdjustmentType::Maintain,
            reason: Localized::new(
                "A few more practice sessions will help tune recommendations just for you.",
                "कुछ और अभ्यास सत्रों के बाद आपके लिए और सटीक सुझाव बन पाएंगे।",
            ),
            confidence: 0.2,
        };
    }

    let struggling = recent_accuracy < config.demotion.max_accuracy
        && profile.weak_phonemes.len() >= config.demotion.min_recurring_weak_phonemes;

    if struggling {
        let adjustment = if level > DifficultyLevel::Beginner {
            DifficultyAdjustment {
                current_difficulty: level,
                recommended_difficulty: level.demote(),
                adjustment_type: AdjustmentType::Decrease,
                reason: Localized::new(
                    "Let's take one small step back and make these sounds rock solid — the next level will feel much easier after that.",
                    "चलिए एक छोटा कदम पीछे लेकर इन ध्वनियों को पक्का करें — उसके बाद अगला स्तर कहीं आसान लगेगा।",
                ),
                confidence: sample_confidence(sessions),
            }
        } else {
            DifficultyAdjustment {
                current_difficulty: level,
                recommended_difficulty: level,
                adjustment_type: AdjustmentType::Maintain,
                reason: Localized::new(
                    "Let's spend a little more time with these sounds — steady practice will get you there.",
                    "इन ध्वनियों के साथ थोड़ा और समय बिताएं — नियमित अभ्यास से आप ज़रूर वहां पहुंचेंगे।",
                ),
                confidence: sample_confidence(sessions),
            }
        };
        tracing::info!(
            user_id = %profile.user_id,
            recent_accuracy,
            adjustment = ?adjustment.adjustment_type,
            "difficulty policy held back promotion"
        );
        return adjustment;
    }

    let promotion = match level {
        DifficultyLevel::Beginner if gate_met(&config.to_intermediate, recent_accuracy, profile) => {
            Some((&config.to_intermediate, DifficultyLevel::Intermediate))
        }
        DifficultyLevel::Intermediate if gate_met(&config.to_advanced, recent_accuracy, profile) => {
            Some((&config.to_advanced, DifficultyLevel::Advanced))
        }
        _ => None,
    };

    if let Some((gate, next)) = promotion {
        tracing::info!(
            user_id = %profile.user_id,
            recent_accuracy,
            sessions,
            to = next.as_str(),
            "difficulty promotion recommended"
        );
        return DifficultyAdjustment {
            current_difficulty: level,
            recommended_difficulty: next,
            adjustment_type: AdjustmentType::Increase,
            reason: Localized::new(
                "Consistently strong scores across your recent sessions — you are ready for the next level!",
                "हाल के सत्रों में लगातार शानदार अंक — अब आप अगले स्तर के लिए तैयार हैं!",
            ),
            confidence: promotion_confidence(sessions, gate),
        };
    }

    DifficultyAdjustment {
        current_difficulty: level,
        recommended_difficulty: level,
        adjustment_type: AdjustmentType::Maintain,
        reason: Localized::new(
            "Keep practicing at this level — every session is building your base.",
            "इसी स्तर पर अभ्यास जारी रखें — हर सत्र आपकी नींव मज़बूत कर रहा है।",
        ),
        confidence: sample_confidence(sessions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SessionRecord;
    use crate::types::{ErrorKind, SessionMetrics, SessionType};
    use chrono::{Duration, Utc};

    const DISCOURAGING: &[&str] = &["fail", "bad", "poor", "wrong", "weak", "terrible"];

    fn history(count: usize, score: f64, minutes_each: f64, errors: Vec<ErrorKind>) -> Vec<SessionRecord> {
        (0..count)
            .map(|i| SessionRecord {
                session_id: format!("s{i}"),
                session_type: SessionType::Pronunciation,
                metrics: SessionMetrics {
                    overall_score: score,
                    pronunciation_score: score,
                    fluency_score: score,
                    confidence_score: score,
                    vocabulary_usage: score,
                    cultural_appropriateness_score: score,
                },
                phoneme_errors: errors.clone(),
                duration_minutes: minutes_each,
                completed_at: Utc::now() - Duration::days((count - i) as i64),
            })
            .collect()
    }

    fn profile(
        level: DifficultyLevel,
        records: Vec<SessionRecord>,
    ) -> PerformanceProfile {
        PerformanceProfile::from_history(
            "u1",
            level,
            &records,
            &CoachingConfig::default(),
            Utc::now(),
        )
    }

    fn assert_encouraging(reason: &Localized) {
        let lower = reason.en.to_lowercase();
        for word in DISCOURAGING {
            assert!(!lower.contains(word), "reason contains '{word}': {lower}");
        }
        assert!(reason.is_complete());
    }

    #[test]
    fn test_beginner_promotion_gate() {
        let p = profile(DifficultyLevel::Beginner, history(10, 80.0, 30.0, vec![]));
        let adj = adjust_difficulty(&p, &CoachingConfig::default());
        assert_eq!(adj.adjustment_type, AdjustmentType::Increase);
        assert_eq!(adj.recommended_difficulty, DifficultyLevel::Intermediate);
        assert!(adj.confidence >= 0.7);
        assert_encouraging(&adj.reason);
    }

    #[test]
    fn test_promotion_needs_minutes_too() {
        // 10 sessions at 80% but only 100 minutes total
        let p = profile(DifficultyLevel::Beginner, history(10, 80.0, 10.0, vec![]));
        let adj = adjust_difficulty(&p, &CoachingConfig::default());
        assert_eq!(adj.adjustment_type, AdjustmentType::Maintain);
        assert_eq!(adj.recommended_difficulty, DifficultyLevel::Beginner);
    }

    #[test]
    fn test_intermediate_promotion_gate() {
        let p = profile(DifficultyLevel::Intermediate, history(25, 90.0, 40.0, vec![]));
        let adj = adjust_difficulty(&p, &CoachingConfig::default());
        assert_eq!(adj.adjustment_type, AdjustmentType::Increase);
        assert_eq!(adj.recommended_difficulty, DifficultyLevel::Advanced);
    }

    #[test]
    fn test_struggling_intermediate_steps_down() {
        let errors = vec![ErrorKind::ThSubstitution, ErrorKind::VWConfusion];
        let p = profile(DifficultyLevel::Intermediate, history(8, 45.0, 10.0, errors));
        let adj = adjust_difficulty(&p, &CoachingConfig::default());
        assert_eq!(adj.adjustment_type, AdjustmentType::Decrease);
        assert_eq!(adj.recommended_difficulty, DifficultyLevel::Beginner);
        assert_encouraging(&adj.reason);
    }

    #[test]
    fn test_struggling_beginner_never_demoted_below_floor() {
        let errors = vec![ErrorKind::ThSubstitution, ErrorKind::RPronunciation];
        let p = profile(DifficultyLevel::Beginner, history(8, 40.0, 10.0, errors));
        let adj = adjust_difficulty(&p, &CoachingConfig::default());
        assert_eq!(adj.adjustment_type, AdjustmentType::Maintain);
        assert_eq!(adj.recommended_difficulty, DifficultyLevel::Beginner);
        assert_encouraging(&adj.reason);
    }

    #[test]
    fn test_empty_history_maintains_with_low_confidence() {
        let p = profile(DifficultyLevel::Beginner, vec![]);
        let adj = adjust_difficulty(&p, &CoachingConfig::default());
        assert_eq!(adj.adjustment_type, AdjustmentType::Maintain);
        assert!(adj.confidence <= 0.3);
        assert_encouraging(&adj.reason);
    }

    #[test]
    fn test_recommended_level_moves_one_step_only() {
        let p = profile(DifficultyLevel::Beginner, history(30, 95.0, 60.0, vec![]));
        let adj = adjust_difficulty(&p, &CoachingConfig::default());
        // Even with advanced-grade numbers, a beginner moves one level.
        assert_eq!(adj.recommended_difficulty, DifficultyLevel::Intermediate);
    }
}
