use serde::{Deserialize, Serialize};

use crate::config::FluencyParams;
use crate::speech::accuracy::words;
use crate::types::clamp_unit;

/// Per-attempt timing accumulated over one session. The tracker never
/// rejects a sample; degenerate timing is clamped when metrics are read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FluencyTracker {
    samples: Vec<FluencySample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FluencySample {
    word_count: usize,
    elapsed_ms: u64,
    confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FluencyMetrics {
    pub words_per_minute: f64,
    pub total_speaking_ms: u64,
    pub utterance_count: usize,
    pub average_confidence: f64,
    pub longest_utterance_ms: u64,
}

impl FluencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, spoken: &str, elapsed_ms: u64, confidence: f64) {
        self.samples.push(FluencySample {
            word_count: words(spoken).len(),
            elapsed_ms,
            confidence: clamp_unit(confidence),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Always returns a positive words-per-minute; zero-duration or empty
    /// input falls back to the configured floor instead of dividing by zero.
    pub fn metrics(&self, params: &FluencyParams) -> FluencyMetrics {
        let total_words: usize = self.samples.iter().map(|s| s.word_count).sum();
        let total_ms: u64 = self.samples.iter().map(|s| s.elapsed_ms).sum();
        let longest_ms = self.samples.iter().map(|s| s.elapsed_ms).max().unwrap_or(0);

        let words_per_minute = if total_words == 0 || total_ms == 0 {
            params.min_words_per_minute
        } else {
            let raw = total_words as f64 / (total_ms as f64 / 60_000.0);
            raw.clamp(params.min_words_per_minute, params.max_words_per_minute)
        };

        let average_confidence = if self.samples.is_empty() {
            0.0
        } else {
            self.samples.iter().map(|s| s.confidence).sum::<f64>() / self.samples.len() as f64
        };

        FluencyMetrics {
            words_per_minute,
            total_speaking_ms: total_ms,
            utterance_count: self.samples.len(),
            average_confidence,
            longest_utterance_ms: longest_ms,
        }
    }

    /// 0-100 score anchored at the target conversational rate.
    pub fn score(&self, params: &FluencyParams) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let metrics = self.metrics(params);
        (metrics.words_per_minute / params.target_words_per_minute * 100.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> FluencyParams {
        FluencyParams::default()
    }

    #[test]
    fn test_wpm_positive_for_normal_input() {
        let mut tracker = FluencyTracker::new();
        tracker.record("think about this thing", 2_000, 0.9);
        let metrics = tracker.metrics(&params());
        assert!(metrics.words_per_minute > 0.0);
        assert_eq!(metrics.utterance_count, 1);
        // 4 words in 2s = 120 wpm
        assert!((metrics.words_per_minute - 120.0).abs() < 1.0);
    }

    #[test]
    fn test_degenerate_timing_clamps_to_floor() {
        let mut tracker = FluencyTracker::new();
        tracker.record("hello", 0, 0.5);
        let metrics = tracker.metrics(&params());
        assert_eq!(metrics.words_per_minute, params().min_words_per_minute);
        assert!(metrics.words_per_minute > 0.0);
    }

    #[test]
    fn test_empty_tracker_still_positive_rate() {
        let tracker = FluencyTracker::new();
        let metrics = tracker.metrics(&params());
        assert!(metrics.words_per_minute > 0.0);
        assert_eq!(tracker.score(&params()), 0.0);
    }

    #[test]
    fn test_implausible_rate_is_capped() {
        let mut tracker = FluencyTracker::new();
        tracker.record("one two three four five six seven eight", 10, 1.0);
        let metrics = tracker.metrics(&params());
        assert!(metrics.words_per_minute <= params().max_words_per_minute);
    }
}
