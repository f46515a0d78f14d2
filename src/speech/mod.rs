//! Speech Analysis Engine: transcript-level scoring, interference-pattern
//! detection, fluency metrics and bilingual feedback. Pure functions over
//! (spoken, expected) pairs; no I/O and nothing here can fail.

pub mod accuracy;
pub mod feedback;
pub mod fluency;
pub mod patterns;

use serde::{Deserialize, Serialize};

pub use accuracy::calculate_accuracy;
pub use feedback::{feedback_for, FeedbackBundle};
pub use fluency::{FluencyMetrics, FluencyTracker};

use crate::types::{ErrorKind, Localized, Severity};

/// A unit of mismatch between spoken and expected sound patterns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhonemeIssue {
    pub phoneme: String,
    pub detected_form: String,
    pub expected_form: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub phoneme: String,
    pub tip: Localized,
    pub practice_words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhonemeAnalysis {
    /// Phoneme-level sub-score, independent of word-level accuracy.
    pub accuracy: f64,
    pub problematic_phonemes: Vec<PhonemeIssue>,
    pub suggestions: Vec<Suggestion>,
}

/// A classified interference pattern with severity and bilingual coaching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub detected: String,
    pub expected: String,
    pub explanation: Localized,
    pub practice_words: Vec<String>,
    pub severity: Severity,
}

fn severity_penalty(severity: Severity) -> f64 {
    match severity {
        Severity::High => 25.0,
        Severity::Medium => 15.0,
        Severity::Low => 8.0,
    }
}

/// Pattern-rule scan producing the phoneme-level report. Match confidence
/// reflects how much of the catalog fired, not acoustic certainty.
pub fn analyze_phonemes(spoken: &str, expected: &str) -> PhonemeAnalysis {
    let matches = patterns::scan(spoken, expected);

    let penalty: f64 = matches.iter().map(|m| severity_penalty(m.severity)).sum();
    let accuracy = (100.0 - penalty).clamp(0.0, 100.0);

    let problematic_phonemes = matches
        .iter()
        .map(|m| PhonemeIssue {
            phoneme: m.phoneme.to_string(),
            detected_form: m.detected.clone(),
            expected_form: m.expected.clone(),
            confidence: match m.severity {
                Severity::High => 0.9,
                Severity::Medium => 0.7,
                Severity::Low => 0.5,
            },
        })
        .collect();

    let mut suggestions: Vec<Suggestion> = Vec::new();
    for m in &matches {
        if suggestions.iter().any(|s| s.phoneme == m.phoneme) {
            continue;
        }
        suggestions.push(Suggestion {
            phoneme: m.phoneme.to_string(),
            tip: Localized::new(m.explanation_en, m.explanation_hi),
            practice_words: m.practice_words.iter().map(|w| w.to_string()).collect(),
        });
    }

    PhonemeAnalysis {
        accuracy,
        problematic_phonemes,
        suggestions,
    }
}

/// Classified version of the rule scan, deduplicated per error kind.
/// Identical (normalized) input never yields an error.
pub fn detect_common_errors(spoken: &str, expected: &str) -> Vec<DetectedError> {
    let mut errors: Vec<DetectedError> = Vec::new();
    for m in patterns::scan(spoken, expected) {
        if errors.iter().any(|e| e.kind == m.kind) {
            continue;
        }
        errors.push(DetectedError {
            kind: m.kind,
            detected: m.detected,
            expected: m.expected,
            explanation: Localized::new(m.explanation_en, m.explanation_hi),
            practice_words: m.practice_words.iter().map(|w| w.to_string()).collect(),
            severity: m.severity,
        });
    }
    errors
}
