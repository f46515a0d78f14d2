//! Higher-level communicative error correction: register, idiom and
//! grammar calques, distinct from phoneme-level pronunciation errors.
//! Like the phoneme catalog, this is a fixed, auditable rule table.

use serde::{Deserialize, Serialize};

use crate::types::{clamp_unit, Localized, Severity};

struct UsageRule {
    /// Lowercase needle searched in the normalized text.
    pattern: &'static str,
    severity: Severity,
    suggestion: &'static str,
    explanation_en: &'static str,
    explanation_hi: &'static str,
    example: &'static str,
    focus_area: &'static str,
}

const USAGE_RULES: &[UsageRule] = &[
    UsageRule {
        pattern: "am knowing",
        severity: Severity::Medium,
        suggestion: "I know",
        explanation_en: "'Know' describes a state, so English skips the progressive: 'I know' rather than 'I am knowing'.",
        explanation_hi: "'Know' एक स्थिति बताता है, इसलिए अंग्रेज़ी में progressive नहीं लगता: 'I am knowing' की जगह 'I know'।",
        example: "I know the answer.",
        focus_area: "verb tenses",
    },
    UsageRule {
        pattern: "am wanting",
        severity: Severity::Medium,
        suggestion: "I want",
        explanation_en: "'Want' is a state verb: 'I want tea' sounds natural, 'I am wanting tea' does not.",
        explanation_hi: "'Want' स्थितिसूचक क्रिया है: 'I want tea' स्वाभाविक है, 'I am wanting tea' नहीं।",
        example: "I want to learn quickly.",
        focus_area: "verb tenses",
    },
    UsageRule {
        pattern: "am having",
        severity: Severity::Medium,
        suggestion: "I have",
        explanation_en: "For possession, 'have' stays simple: 'I have two brothers', not 'I am having two brothers'.",
        explanation_hi: "संबंध या स्वामित्व के लिए 'have' simple रूप में रहता है: 'I am having two brothers' नहीं, 'I have two brothers'।",
        example: "I have two brothers.",
        focus_area: "verb tenses",
    },
    UsageRule {
        pattern: "is knowing",
        severity: Severity::Medium,
        suggestion: "knows",
        explanation_en: "State verbs like 'know' stay in the simple form: 'she knows', not 'she is knowing'.",
        explanation_hi: "'Know' जैसी स्थितिसूचक क्रियाएं simple रूप में रहती हैं: 'she is knowing' नहीं, 'she knows'।",
        example: "She knows this road well.",
        focus_area: "verb tenses",
    },
    UsageRule {
        pattern: "do the needful",
        severity: Severity::Low,
        suggestion: "please take care of this",
        explanation_en: "'Do the needful' is Indian office English; most international listeners expect 'please take care of this'.",
        explanation_hi: "'Do the needful' भारतीय दफ़्तरी अंग्रेज़ी है; अंतरराष्ट्रीय श्रोता 'please take care of this' की अपेक्षा करते हैं।",
        example: "Please take care of this by Friday.",
        focus_area: "idiomatic usage",
    },
    UsageRule {
        pattern: "kindly revert",
        severity: Severity::Low,
        suggestion: "please reply",
        explanation_en: "'Revert' means to go back to a previous state; for answering, 'please reply' is the expected phrase.",
        explanation_hi: "'Revert' का अर्थ है पुरानी स्थिति में लौटना; जवाब के लिए 'please reply' सही है।",
        example: "Please reply by tomorrow.",
        focus_area: "idiomatic usage",
    },
    UsageRule {
        pattern: "discuss about",
        severity: Severity::Medium,
        suggestion: "discuss",
        explanation_en: "'Discuss' already contains 'about': 'let's discuss the plan'.",
        explanation_hi: "'Discuss' में 'about' पहले से शामिल है: 'let's discuss the plan' ही पर्याप्त है।",
        example: "Let us discuss the plan.",
        focus_area: "idiomatic usage",
    },
    UsageRule {
        pattern: "return back",
        severity: Severity::Low,
        suggestion: "return",
        explanation_en: "'Return' already means 'come back', so 'back' doubles up.",
        explanation_hi: "'Return' में 'वापस आना' शामिल है, इसलिए 'back' दोहराव है।",
        example: "I will return by evening.",
        focus_area: "idiomatic usage",
    },
    UsageRule {
        pattern: "out of station",
        severity: Severity::Low,
        suggestion: "out of town",
        explanation_en: "'Out of station' comes from colonial-era railway towns; today 'out of town' travels better.",
        explanation_hi: "'Out of station' पुराने रेलवे ज़माने का प्रयोग है; आज 'out of town' अधिक प्रचलित है।",
        example: "I will be out of town next week.",
        focus_area: "idiomatic usage",
    },
    UsageRule {
        pattern: "isn't it?",
        severity: Severity::Low,
        suggestion: "a matching tag, like 'aren't they?' or 'didn't we?'",
        explanation_en: "English question tags echo the verb: 'They left early, didn't they?'. A universal 'isn't it?' mirrors Hindi 'है ना?'.",
        explanation_hi: "अंग्रेज़ी में tag प्रश्न क्रिया के अनुसार बदलता है: 'They left early, didn't they?'। हर जगह 'isn't it?' लगाना हिंदी 'है ना?' का अनुवाद है।",
        example: "They left early, didn't they?",
        focus_area: "idiomatic usage",
    },
    UsageRule {
        pattern: "good name",
        severity: Severity::Low,
        suggestion: "your name",
        explanation_en: "'What is your good name?' is a warm Hindi calque (शुभ नाम); plain English asks 'What is your name?'.",
        explanation_hi: "'What is your good name?' हिंदी के 'शुभ नाम' का अनुवाद है; अंग्रेज़ी में सीधे 'What is your name?' पूछा जाता है।",
        example: "May I know your name?",
        focus_area: "formality",
    },
    UsageRule {
        pattern: "respected sir",
        severity: Severity::Low,
        suggestion: "dear sir",
        explanation_en: "'Respected sir' reads as very formal letter style; in speech and email, 'dear sir' or just the name fits better.",
        explanation_hi: "'Respected sir' बहुत औपचारिक पत्र-शैली है; बोलचाल और ईमेल में 'dear sir' या केवल नाम बेहतर है।",
        example: "Dear Sir, thank you for your time.",
        focus_area: "formality",
    },
    UsageRule {
        pattern: "myself ",
        severity: Severity::Medium,
        suggestion: "I am",
        explanation_en: "Introductions use 'I am Ravi', not 'Myself Ravi' — a direct calque from 'मैं ... हूं' word order.",
        explanation_hi: "परिचय में 'I am Ravi' कहें, 'Myself Ravi' नहीं — यह हिंदी वाक्य-क्रम का सीधा अनुवाद है।",
        example: "I am Ravi, from Jaipur.",
        focus_area: "formality",
    },
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionItem {
    pub detected: String,
    pub suggestion: String,
    pub severity: Severity,
    pub explanation: Localized,
    pub example: String,
    pub focus_area: String,
}

/// Full correction result for one utterance. Clean input yields an empty
/// `corrections` list but the bundle stays well-formed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    pub corrections: Vec<CorrectionItem>,
    pub encouragement: Localized,
    pub practice_exercises: Vec<Localized>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTone {
    Encouraging,
    Supportive,
    Celebratory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GentleFeedback {
    pub message: Localized,
    pub tone: FeedbackTone,
    pub focus_areas: Vec<String>,
}

/// Scans free text against the usage-rule table.
pub fn detect_and_correct(text: &str) -> Correction {
    let haystack = text.to_lowercase();
    let mut corrections = Vec::new();

    for rule in USAGE_RULES {
        if haystack.contains(rule.pattern) {
            corrections.push(CorrectionItem {
                detected: rule.pattern.trim().to_string(),
                suggestion: rule.suggestion.to_string(),
                severity: rule.severity,
                explanation: Localized::new(rule.explanation_en, rule.explanation_hi),
                example: rule.example.to_string(),
                focus_area: rule.focus_area.to_string(),
            });
        }
    }

    let encouragement = if corrections.is_empty() {
        Localized::new(
            "That phrasing sounds natural — nicely done!",
            "आपका वाक्य बिल्कुल स्वाभाविक लगा — बहुत खूब!",
        )
    } else {
        Localized::new(
            "You are communicating clearly; a couple of small polish points will make it shine.",
            "आपकी बात साफ़ समझ आ रही है; बस थोड़ी सी चमकाने वाली बातें इसे और निखार देंगी।",
        )
    };

    let practice_exercises = if corrections.is_empty() {
        vec![Localized::new(
            "Try the same idea in a longer sentence to stretch your range.",
            "यही बात एक लंबे वाक्य में कहकर अपनी पकड़ बढ़ाएं।",
        )]
    } else {
        corrections
            .iter()
            .map(|c| {
                Localized::new(
                    format!("Say the corrected version aloud twice: \"{}\"", c.example),
                    format!("सुधरा हुआ वाक्य दो बार ज़ोर से बोलें: \"{}\"", c.example),
                )
            })
            .collect()
    };

    Correction {
        corrections,
        encouragement,
        practice_exercises,
    }
}

/// Tone escalates as error count falls and confidence rises; the wording
/// stays supportive at every level.
pub fn gentle_feedback(corrections: &[CorrectionItem], confidence: f64) -> GentleFeedback {
    let confidence = clamp_unit(confidence);
    let mut focus_areas: Vec<String> = Vec::new();
    for item in corrections {
        if !focus_areas.contains(&item.focus_area) {
            focus_areas.push(item.focus_area.clone());
        }
    }

    let (tone, message) = if corrections.is_empty() && confidence >= 0.8 {
        (
            FeedbackTone::Celebratory,
            Localized::new(
                "Wonderful! You spoke naturally and confidently — that was a real conversation.",
                "कमाल कर दिया! आप स्वाभाविक और आत्मविश्वास से बोले — यह एक असली बातचीत थी।",
            ),
        )
    } else if corrections.len() <= 2 && confidence >= 0.5 {
        (
            FeedbackTone::Supportive,
            Localized::new(
                "You are expressing yourself well — keep that flow and the polish will follow.",
                "आप अपनी बात अच्छे से रख रहे हैं — यही प्रवाह बनाए रखें, निखार अपने आप आएगा।",
            ),
        )
    } else {
        (
            FeedbackTone::Encouraging,
            Localized::new(
                "Every sentence you speak is a step forward — let's keep practicing together.",
                "आपका बोला हर वाक्य एक कदम आगे है — चलिए साथ मिलकर अभ्यास जारी रखें।",
            ),
        )
    };

    GentleFeedback {
        message,
        tone,
        focus_areas,
    }
}
