//! Declarative catalog of Hindi-English interference rules.
//!
//! Each rule pairs a textual matcher with a fixed bilingual explanation and
//! practice words. Rules run in sequence over index-aligned word pairs; the
//! first rule that matches a pair claims it. This is deliberately not a
//! phonetic aligner: the catalog must stay auditable rule by rule.

use crate::speech::accuracy::{levenshtein, words};
use crate::types::{ErrorKind, Severity};

pub struct InterferenceRule {
    pub kind: ErrorKind,
    pub phoneme: &'static str,
    pub severity: Severity,
    pub explanation_en: &'static str,
    pub explanation_hi: &'static str,
    pub practice_words: &'static [&'static str],
    matcher: fn(spoken: &str, expected: &str) -> bool,
}

#[derive(Debug, Clone)]
pub struct RuleMatch {
    pub kind: ErrorKind,
    pub phoneme: &'static str,
    pub severity: Severity,
    pub explanation_en: &'static str,
    pub explanation_hi: &'static str,
    pub practice_words: &'static [&'static str],
    pub detected: String,
    pub expected: String,
}

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn syllable_estimate(word: &str) -> usize {
    let mut count = 0;
    let mut in_group = false;
    for ch in word.chars() {
        if is_vowel(ch) {
            if !in_group {
                count += 1;
            }
            in_group = true;
        } else {
            in_group = false;
        }
    }
    count.max(1)
}

fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    levenshtein(&a, &b)
}

fn matches_th(spoken: &str, expected: &str) -> bool {
    expected.contains("th")
        && !spoken.contains("th")
        && (spoken.contains('d') || spoken.contains('t'))
}

fn matches_v_w(spoken: &str, expected: &str) -> bool {
    let v_to_w = expected.contains('v') && !spoken.contains('v') && spoken.contains('w');
    let w_to_v = expected.contains('w') && !spoken.contains('w') && spoken.contains('v');
    v_to_w || w_to_v
}

fn matches_cluster_prothesis(spoken: &str, expected: &str) -> bool {
    let starts_with_cluster = expected.len() >= 2 && {
        let mut chars = expected.chars();
        let first = chars.next().unwrap_or(' ');
        let second = chars.next().unwrap_or(' ');
        first == 's' && !is_vowel(second)
    };
    starts_with_cluster
        && (spoken.strip_prefix('i') == Some(expected) || spoken.strip_prefix('e') == Some(expected))
}

fn matches_schwa_insertion(spoken: &str, expected: &str) -> bool {
    if spoken.chars().count() != expected.chars().count() + 1 {
        return false;
    }
    let chars: Vec<char> = spoken.chars().collect();
    // Interior insertions only; a leading vowel is cluster prothesis.
    for i in 1..chars.len() {
        if !matches!(chars[i], 'a' | 'i' | 'u') {
            continue;
        }
        let mut reduced = String::with_capacity(spoken.len());
        for (j, ch) in chars.iter().enumerate() {
            if j != i {
                reduced.push(*ch);
            }
        }
        if reduced == expected {
            return true;
        }
    }
    false
}

fn matches_r_coloring(spoken: &str, expected: &str) -> bool {
    let dropped = expected.contains('r') && !spoken.contains('r');
    let rolled = spoken.contains("rr") && !expected.contains("rr");
    dropped || rolled
}

fn matches_stress_drift(spoken: &str, expected: &str) -> bool {
    syllable_estimate(spoken) != syllable_estimate(expected) && edit_distance(spoken, expected) <= 2
}

/// Evaluated in order; earlier rules claim a word pair first, so the most
/// intelligibility-affecting patterns win ties.
pub const RULES: &[InterferenceRule] = &[
    InterferenceRule {
        kind: ErrorKind::ThSubstitution,
        phoneme: "th",
        severity: Severity::High,
        explanation_en: "Hindi has no 'th' as in 'think'. Place the tip of your tongue between your teeth and release a soft puff of air, instead of 'd' or 't'.",
        explanation_hi: "हिंदी में 'think' वाली 'th' ध्वनि नहीं होती। जीभ की नोक को दांतों के बीच रखकर हल्की हवा छोड़ें — 'द' या 'ट' से यह अलग है।",
        practice_words: &["think", "thank", "three", "tooth", "weather"],
        matcher: matches_th,
    },
    InterferenceRule {
        kind: ErrorKind::VWConfusion,
        phoneme: "v/w",
        severity: Severity::Medium,
        explanation_en: "English 'v' touches the top teeth to the lower lip; 'w' uses rounded lips with no contact. Hindi 'व' sits between the two sounds.",
        explanation_hi: "अंग्रेज़ी 'v' में ऊपर के दांत निचले होंठ को छूते हैं, जबकि 'w' में होंठ गोल रहते हैं। हिंदी का 'व' इन दोनों के बीच की ध्वनि है।",
        practice_words: &["very", "west", "vine", "wine", "vest"],
        matcher: matches_v_w,
    },
    InterferenceRule {
        kind: ErrorKind::ConsonantCluster,
        phoneme: "s-cluster",
        severity: Severity::Medium,
        explanation_en: "Words like 'school' and 'student' begin directly on the cluster. Avoid adding a helping vowel in front.",
        explanation_hi: "'school' और 'student' जैसे शब्द सीधे 's' से शुरू होते हैं। शुरुआत में 'इ' स्वर जोड़ने से बचें — 'स्कूल', 'इस्कूल' नहीं।",
        practice_words: &["school", "student", "spoon", "sky", "street"],
        matcher: matches_cluster_prothesis,
    },
    InterferenceRule {
        kind: ErrorKind::SchwaInsertion,
        phoneme: "schwa",
        severity: Severity::Low,
        explanation_en: "Keep final consonants together without an extra vowel between them, as in 'film' and 'milk'.",
        explanation_hi: "'film' और 'milk' जैसे शब्दों में व्यंजनों के बीच अतिरिक्त स्वर न जोड़ें — 'फ़िल्म', 'फ़िलम' नहीं। उच्चारण छोटा और कसा हुआ रखें।",
        practice_words: &["film", "milk", "help", "self"],
        matcher: matches_schwa_insertion,
    },
    InterferenceRule {
        kind: ErrorKind::RPronunciation,
        phoneme: "r",
        severity: Severity::Medium,
        explanation_en: "The English 'r' is softer than the rolled Hindi 'र'. Let the tongue float near the roof of the mouth without tapping it.",
        explanation_hi: "अंग्रेज़ी 'r' हिंदी के 'र' से नरम होती है। जीभ को तालू से टकराए बिना हल्के से बोलने का अभ्यास करें।",
        practice_words: &["red", "around", "mirror", "problem"],
        matcher: matches_r_coloring,
    },
    InterferenceRule {
        kind: ErrorKind::StressPattern,
        phoneme: "stress",
        severity: Severity::Low,
        explanation_en: "English words lean on one syllable. Giving every syllable equal weight flattens the rhythm listeners expect.",
        explanation_hi: "अंग्रेज़ी शब्दों में एक अक्षर पर ज़ोर रहता है। हर अक्षर पर बराबर ज़ोर देने से शब्द की लय बदल जाती है — उच्चारण की लय पर ध्यान दें।",
        practice_words: &["photography", "development", "computer", "banana"],
        matcher: matches_stress_drift,
    },
];

/// Runs the catalog over index-aligned word pairs of the normalized texts.
/// Identical pairs are skipped outright, so equal input yields no matches.
pub fn scan(spoken: &str, expected: &str) -> Vec<RuleMatch> {
    let spoken_words = words(spoken);
    let expected_words = words(expected);
    let mut matches = Vec::new();

    for (spoken_word, expected_word) in spoken_words.iter().zip(expected_words.iter()) {
        if spoken_word == expected_word {
            continue;
        }
        for rule in RULES {
            if (rule.matcher)(spoken_word, expected_word) {
                matches.push(RuleMatch {
                    kind: rule.kind,
                    phoneme: rule.phoneme,
                    severity: rule.severity,
                    explanation_en: rule.explanation_en,
                    explanation_hi: rule.explanation_hi,
                    practice_words: rule.practice_words,
                    detected: spoken_word.clone(),
                    expected: expected_word.clone(),
                });
                break;
            }
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_input_has_no_matches() {
        assert!(scan("think about this", "think about this").is_empty());
    }

    #[test]
    fn test_th_substitution_detected() {
        let matches = scan("dink about dis ding", "think about this thing");
        assert!(matches.iter().any(|m| m.kind == ErrorKind::ThSubstitution));
        let th = matches
            .iter()
            .find(|m| m.kind == ErrorKind::ThSubstitution)
            .unwrap();
        assert_eq!(th.severity, Severity::High);
        assert!(!th.explanation_hi.is_empty());
        assert!(!th.practice_words.is_empty());
    }

    #[test]
    fn test_v_w_confusion_both_directions() {
        let matches = scan("wery good", "very good");
        assert!(matches.iter().any(|m| m.kind == ErrorKind::VWConfusion));
        let matches = scan("vait here", "wait here");
        assert!(matches.iter().any(|m| m.kind == ErrorKind::VWConfusion));
    }

    #[test]
    fn test_cluster_prothesis_detected() {
        let matches = scan("ischool is closed", "school is closed");
        assert!(matches.iter().any(|m| m.kind == ErrorKind::ConsonantCluster));
    }

    #[test]
    fn test_schwa_insertion_detected() {
        let matches = scan("filam was good", "film was good");
        assert!(matches.iter().any(|m| m.kind == ErrorKind::SchwaInsertion));
    }

    #[test]
    fn test_r_drop_detected() {
        let matches = scan("poblem solved", "problem solved");
        assert!(matches.iter().any(|m| m.kind == ErrorKind::RPronunciation));
    }

    #[test]
    fn test_every_rule_is_bilingual() {
        for rule in RULES {
            assert!(!rule.explanation_en.trim().is_empty());
            assert!(!rule.explanation_hi.trim().is_empty());
            assert!(!rule.practice_words.is_empty());
        }
    }
}
