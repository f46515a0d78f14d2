use serde::{Deserialize, Serialize};

/// Gate for one difficulty promotion step. The numeric defaults mirror the
/// rollout values; all of them can be tuned without touching the policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionGate {
    pub min_accuracy: f64,
    pub min_sessions: usize,
    pub min_practice_minutes: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemotionParams {
    /// Recent accuracy below this with recurring weak phonemes triggers a
    /// step down (never below beginner).
    pub max_accuracy: f64,
    pub min_recurring_weak_phonemes: usize,
}

impl Default for DemotionParams {
    fn default() -> Self {
        Self {
            max_accuracy: 55.0,
            min_recurring_weak_phonemes: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachingConfig {
    pub to_intermediate: PromotionGate,
    pub to_advanced: PromotionGate,
    pub demotion: DemotionParams,
    /// Number of most recent sessions the accuracy window looks at.
    pub recent_window: usize,
    /// Share of sessions an error kind must appear in before it counts as
    /// a recurring weak phoneme on the profile.
    pub weak_phoneme_min_frequency: f64,
}

impl Default for CoachingConfig {
    fn default() -> Self {
        Self {
            to_intermediate: PromotionGate {
                min_accuracy: 75.0,
                min_sessions: 10,
                min_practice_minutes: 300.0,
            },
            to_advanced: PromotionGate {
                min_accuracy: 85.0,
                min_sessions: 25,
                min_practice_minutes: 900.0,
            },
            demotion: DemotionParams::default(),
            recent_window: 10,
            weak_phoneme_min_frequency: 0.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeakAreaParams {
    pub high_frequency: f64,
    pub medium_frequency: f64,
    /// Average session score under which a weak area is escalated one
    /// severity step.
    pub impact_accuracy: f64,
    /// Frequency delta between window halves that counts as a trend.
    pub trend_delta: f64,
    pub practice_minutes_high: u32,
    pub practice_minutes_medium: u32,
    pub practice_minutes_low: u32,
}

impl Default for WeakAreaParams {
    fn default() -> Self {
        Self {
            high_frequency: 0.6,
            medium_frequency: 0.3,
            impact_accuracy: 55.0,
            trend_delta: 0.1,
            practice_minutes_high: 15,
            practice_minutes_medium: 10,
            practice_minutes_low: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FluencyParams {
    /// Floor so degenerate timing data never yields a zero or negative rate.
    pub min_words_per_minute: f64,
    pub max_words_per_minute: f64,
    /// Comfortable conversational rate used as the 100-point anchor.
    pub target_words_per_minute: f64,
}

impl Default for FluencyParams {
    fn default() -> Self {
        Self {
            min_words_per_minute: 1.0,
            max_words_per_minute: 400.0,
            target_words_per_minute: 130.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportParams {
    pub window_days: i64,
    pub achievement_session_count: usize,
    pub achievement_average_score: f64,
    pub goal_practice_minutes: f64,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            window_days: 7,
            achievement_session_count: 5,
            achievement_average_score: 80.0,
            goal_practice_minutes: 60.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub coaching: CoachingConfig,
    pub weak_area: WeakAreaParams,
    pub fluency: FluencyParams,
    pub report: ReportParams,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("ENGINE_PROMOTE_INTERMEDIATE_ACCURACY") {
            if let Ok(parsed) = val.parse() {
                config.coaching.to_intermediate.min_accuracy = parsed;
            }
        }
        if let Ok(val) = std::env::var("ENGINE_PROMOTE_ADVANCED_ACCURACY") {
            if let Ok(parsed) = val.parse() {
                config.coaching.to_advanced.min_accuracy = parsed;
            }
        }
        if let Ok(val) = std::env::var("ENGINE_RECENT_WINDOW") {
            if let Ok(parsed) = val.parse() {
                config.coaching.recent_window = parsed;
            }
        }
        if let Ok(val) = std::env::var("ENGINE_REPORT_WINDOW_DAYS") {
            if let Ok(parsed) = val.parse() {
                config.report.window_days = parsed;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_rollout_gates() {
        let config = EngineConfig::default();
        assert_eq!(config.coaching.to_intermediate.min_sessions, 10);
        assert_eq!(config.coaching.to_intermediate.min_practice_minutes, 300.0);
        assert_eq!(config.coaching.to_advanced.min_sessions, 25);
        assert_eq!(config.coaching.to_advanced.min_practice_minutes, 900.0);
    }
}
