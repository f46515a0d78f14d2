use serde::{Deserialize, Serialize};

use crate::speech::DetectedError;
use crate::types::{clamp_score, ErrorKind, Localized};

/// Bilingual, UI-ready rendering of one attempt. Derived deterministically
/// from the score and error set; the en/hi tip pairing is structural.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackBundle {
    pub message: Localized,
    pub emoji: String,
    pub color: String,
    pub tips: Vec<Localized>,
}

struct ToneBand {
    min_accuracy: f64,
    message_en: &'static str,
    message_hi: &'static str,
    emoji: &'static str,
    color: &'static str,
    tip_en: &'static str,
    tip_hi: &'static str,
}

const TONE_BANDS: &[ToneBand] = &[
    ToneBand {
        min_accuracy: 90.0,
        message_en: "Excellent! Your pronunciation is nearly perfect.",
        message_hi: "शानदार! आपका उच्चारण लगभग एकदम सही है।",
        emoji: "🌟",
        color: "#22c55e",
        tip_en: "Try a slightly longer sentence next time to stretch yourself.",
        tip_hi: "अगली बार थोड़ा लंबा वाक्य बोलकर खुद को चुनौती दें।",
    },
    ToneBand {
        min_accuracy: 75.0,
        message_en: "Great work! That sounded really good.",
        message_hi: "बहुत बढ़िया! यह सुनने में बहुत अच्छा लगा।",
        emoji: "😊",
        color: "#84cc16",
        tip_en: "Repeat the sentence once more, a little slower, to lock it in.",
        tip_hi: "वाक्य को एक बार फिर थोड़ा धीरे बोलें, इससे उच्चारण पक्का होगा।",
    },
    ToneBand {
        min_accuracy: 60.0,
        message_en: "Good effort, keep going!",
        message_hi: "अच्छा प्रयास, ऐसे ही आगे बढ़ते रहें!",
        emoji: "💪",
        color: "#eab308",
        tip_en: "Listen to the sample once, then speak along with it.",
        tip_hi: "पहले नमूना ध्यान से सुनें, फिर उसके साथ-साथ बोलें।",
    },
    ToneBand {
        min_accuracy: 0.0,
        message_en: "Keep trying, you are getting closer with every attempt!",
        message_hi: "कोशिश जारी रखें, आप हर प्रयास के साथ और करीब पहुंच रहे हैं!",
        emoji: "🙂",
        color: "#f97316",
        tip_en: "Break the sentence into two or three small pieces and practice each one.",
        tip_hi: "वाक्य को दो-तीन छोटे हिस्सों में बांटकर हर हिस्से का अभ्यास करें।",
    },
];

fn error_tip(kind: ErrorKind) -> Localized {
    match kind {
        ErrorKind::ThSubstitution => Localized::new(
            "For the 'th' sound, place your tongue between your teeth and blow gently.",
            "'th' ध्वनि के लिए जीभ को दांतों के बीच रखकर हल्की हवा छोड़ें — यह उच्चारण अभ्यास से आता है।",
        ),
        ErrorKind::VWConfusion => Localized::new(
            "Practice 'v' with your teeth on your lip, and 'w' with rounded lips.",
            "'v' ध्वनि में दांत होंठ पर रखें और 'w' में होंठ गोल करें — दोनों का उच्चारण अलग-अलग दोहराएं।",
        ),
        ErrorKind::RPronunciation => Localized::new(
            "Soften the 'r': keep the tongue close to the roof of the mouth without rolling.",
            "'r' ध्वनि को नरम रखें — जीभ को तालू के पास रखें पर रोल न करें। रोज़ थोड़ा उच्चारण अभ्यास करें।",
        ),
        ErrorKind::ConsonantCluster => Localized::new(
            "Start cluster words like 'school' directly on the 's', with no vowel before it.",
            "'school' जैसे शब्दों का उच्चारण सीधे 's' ध्वनि से शुरू करें, पहले कोई स्वर न जोड़ें।",
        ),
        ErrorKind::SchwaInsertion => Localized::new(
            "Say the final consonants together, as one tight sound.",
            "अंत के व्यंजनों को एक साथ कसकर बोलें — बीच में स्वर ध्वनि न जोड़ें।",
        ),
        ErrorKind::StressPattern => Localized::new(
            "Clap on the stressed syllable while you say the word.",
            "शब्द बोलते समय ज़ोर वाले अक्षर पर ताली बजाएं — इससे उच्चारण की लय बैठती है।",
        ),
    }
}

/// Maps accuracy into one of four tone bands and appends one tip per
/// distinct error kind. The band tip is always present, so `tips` is never
/// empty.
pub fn feedback_for(accuracy: f64, errors: &[DetectedError]) -> FeedbackBundle {
    let accuracy = clamp_score(accuracy);
    let band = TONE_BANDS
        .iter()
        .find(|band| accuracy >= band.min_accuracy)
        .unwrap_or(&TONE_BANDS[TONE_BANDS.len() - 1]);

    let mut tips = vec![Localized::new(band.tip_en, band.tip_hi)];
    let mut seen: Vec<ErrorKind> = Vec::new();
    for error in errors {
        if seen.contains(&error.kind) {
            continue;
        }
        seen.push(error.kind);
        tips.push(error_tip(error.kind));
    }

    FeedbackBundle {
        message: Localized::new(band.message_en, band.message_hi),
        emoji: band.emoji.to_string(),
        color: band.color.to_string(),
        tips,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::detect_common_errors;

    #[test]
    fn test_tone_bands_match_thresholds() {
        assert!(feedback_for(95.0, &[]).message.en.contains("Excellent"));
        assert!(feedback_for(90.0, &[]).message.en.contains("Excellent"));
        assert!(feedback_for(80.0, &[]).message.en.contains("Great"));
        assert!(feedback_for(65.0, &[]).message.en.contains("Good effort"));
        assert!(feedback_for(30.0, &[]).message.en.contains("Keep trying"));
    }

    #[test]
    fn test_tips_never_empty_and_bilingual() {
        for accuracy in [0.0, 59.9, 60.0, 74.9, 75.0, 89.9, 90.0, 100.0] {
            let bundle = feedback_for(accuracy, &[]);
            assert!(!bundle.tips.is_empty());
            for tip in &bundle.tips {
                assert!(tip.is_complete());
            }
            assert!(bundle.message.is_complete());
        }
    }

    #[test]
    fn test_th_error_adds_matching_tip() {
        let errors = detect_common_errors("dink about dis", "think about this");
        let bundle = feedback_for(50.0, &errors);
        assert!(bundle.tips.iter().any(|t| t.en.contains("th")));
        assert!(bundle
            .tips
            .iter()
            .any(|t| t.hi.contains("ध्वनि") || t.hi.contains("उच्चारण")));
    }

    #[test]
    fn test_duplicate_error_kinds_tip_once() {
        let errors = detect_common_errors("dink dis ding", "think this thing");
        let bundle = feedback_for(50.0, &errors);
        let th_tips = bundle.tips.iter().filter(|t| t.en.contains("'th'")).count();
        assert_eq!(th_tips, 1);
    }

    #[test]
    fn test_out_of_range_accuracy_is_clamped() {
        let bundle = feedback_for(250.0, &[]);
        assert!(bundle.message.en.contains("Excellent"));
        let bundle = feedback_for(-10.0, &[]);
        assert!(bundle.message.en.contains("Keep trying"));
    }
}
