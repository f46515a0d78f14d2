use serde::{Deserialize, Serialize};

/// Bilingual value used for every user-facing string. Both sides are
/// required; `new` trims nothing away silently so the completeness
/// invariant is checkable in one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub en: String,
    pub hi: String,
}

impl Localized {
    pub fn new(en: impl Into<String>, hi: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            hi: hi.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.en.trim().is_empty() && !self.hi.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum DifficultyLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::Beginner,
        }
    }

    /// One step up the ordered scale; saturates at advanced.
    pub fn promote(&self) -> Self {
        match self {
            Self::Beginner => Self::Intermediate,
            _ => Self::Advanced,
        }
    }

    /// One step down the ordered scale; saturates at beginner.
    pub fn demote(&self) -> Self {
        match self {
            Self::Advanced => Self::Intermediate,
            _ => Self::Beginner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum SessionType {
    #[default]
    Pronunciation,
    Conversation,
    Roleplay,
    Story,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pronunciation => "pronunciation",
            Self::Conversation => "conversation",
            Self::Roleplay => "roleplay",
            Self::Story => "story",
        }
    }
}

/// Closed set of Hindi-speaker interference patterns the rule table knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ThSubstitution,
    VWConfusion,
    RPronunciation,
    ConsonantCluster,
    SchwaInsertion,
    StressPattern,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThSubstitution => "th_substitution",
            Self::VWConfusion => "v_w_confusion",
            Self::RPronunciation => "r_pronunciation",
            Self::ConsonantCluster => "consonant_cluster",
            Self::SchwaInsertion => "schwa_insertion",
            Self::StressPattern => "stress_pattern",
        }
    }

    /// Practice-area label used by coaching output and unlock rules.
    pub fn area_label(&self) -> &'static str {
        match self {
            Self::ThSubstitution => "th_sounds",
            Self::VWConfusion => "v_w_sounds",
            Self::RPronunciation => "r_sounds",
            Self::ConsonantCluster => "consonant_clusters",
            Self::SchwaInsertion => "word_rhythm",
            Self::StressPattern => "word_stress",
        }
    }

    pub fn all() -> &'static [ErrorKind] {
        &[
            Self::ThSubstitution,
            Self::VWConfusion,
            Self::RPronunciation,
            Self::ConsonantCluster,
            Self::SchwaInsertion,
            Self::StressPattern,
        ]
    }
}

/// One scored utterance. Consumed by the analysis pipeline and discarded;
/// only derived metrics outlive it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub spoken_text: String,
    pub expected_text: String,
    pub confidence: f64,
    pub timestamp_ms: i64,
}

impl Attempt {
    /// Out-of-range confidence is clamped, never rejected; the pipeline
    /// must keep moving on malformed input.
    pub fn new(
        spoken_text: impl Into<String>,
        expected_text: impl Into<String>,
        confidence: f64,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            spoken_text: spoken_text.into(),
            expected_text: expected_text.into(),
            confidence: clamp_unit(confidence),
            timestamp_ms,
        }
    }
}

/// Immutable summary of a completed session. The only per-session data
/// that is ever persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetrics {
    pub overall_score: f64,
    pub pronunciation_score: f64,
    pub fluency_score: f64,
    pub confidence_score: f64,
    pub vocabulary_usage: f64,
    pub cultural_appropriateness_score: f64,
}

impl SessionMetrics {
    pub fn zeroed() -> Self {
        Self {
            overall_score: 0.0,
            pronunciation_score: 0.0,
            fluency_score: 0.0,
            confidence_score: 0.0,
            vocabulary_usage: 0.0,
            cultural_appropriateness_score: 0.0,
        }
    }

    pub fn clamped(mut self) -> Self {
        self.overall_score = clamp_score(self.overall_score);
        self.pronunciation_score = clamp_score(self.pronunciation_score);
        self.fluency_score = clamp_score(self.fluency_score);
        self.confidence_score = clamp_score(self.confidence_score);
        self.vocabulary_usage = clamp_score(self.vocabulary_usage);
        self.cultural_appropriateness_score = clamp_score(self.cultural_appropriateness_score);
        self
    }
}

pub fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

pub fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
