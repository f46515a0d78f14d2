use serde::{Deserialize, Serialize};

use crate::coaching::weak_areas::WeakArea;
use crate::types::{ErrorKind, Localized, Severity};

/// Targeted practice plan for one weak area.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeRecommendation {
    pub area: String,
    pub priority: Severity,
    pub exercises: Vec<Localized>,
    /// What must be observed before the weak area counts as resolved.
    pub success_metrics: Vec<Localized>,
}

fn exercises_for(kind: ErrorKind) -> Vec<Localized> {
    match kind {
        ErrorKind::ThSubstitution => vec![
            Localized::new(
                "Read aloud: 'I think thirty-three thirsty things'.",
                "ज़ोर से पढ़ें: 'I think thirty-three thirsty things'।",
            ),
            Localized::new(
                "Record yourself saying ten 'th' words and compare with the sample.",
                "दस 'th' शब्द बोलकर रिकॉर्ड करें और नमूने से मिलाएं।",
            ),
        ],
        ErrorKind::VWConfusion => vec![
            Localized::new(
                "Alternate drill: say 'vest, west, vest, west' five times slowly.",
                "बारी-बारी अभ्यास: 'vest, west, vest, west' पांच बार धीरे-धीरे बोलें।",
            ),
            Localized::new(
                "Read a sentence mixing both sounds: 'We visited a very wide valley'.",
                "दोनों ध्वनियों वाला वाक्य पढ़ें: 'We visited a very wide valley'।",
            ),
        ],
        ErrorKind::RPronunciation => vec![
            Localized::new(
                "Echo practice: listen to 'around the river' and repeat with a soft 'r'.",
                "इको अभ्यास: 'around the river' सुनें और नरम 'r' के साथ दोहराएं।",
            ),
        ],
        ErrorKind::ConsonantCluster => vec![
            Localized::new(
                "Start from the cluster: say 'school, street, spoon' without a starting vowel.",
                "सीधे व्यंजन समूह से बोलें: 'school, street, spoon' — शुरुआत में स्वर न जोड़ें।",
            ),
        ],
        ErrorKind::SchwaInsertion => vec![
            Localized::new(
                "One-beat words: say 'film', 'milk', 'help' as a single beat each.",
                "एक-ताल शब्द: 'film', 'milk', 'help' को एक ही ताल में बोलें।",
            ),
        ],
        ErrorKind::StressPattern => vec![
            Localized::new(
                "Tap the table on the stressed syllable of 'computer' and 'banana'.",
                "'computer' और 'banana' के ज़ोर वाले अक्षर पर मेज़ थपथपाएं।",
            ),
        ],
    }
}

fn success_metrics_for(kind: ErrorKind) -> Vec<Localized> {
    let label = kind.area_label().replace('_', " ");
    vec![
        Localized::new(
            format!("Three sessions in a row with no {label} errors detected."),
            format!("लगातार तीन सत्र जिनमें {label} से जुड़ी कोई त्रुटि न मिले।"),
        ),
        Localized::new(
            "Score 85% or higher on a focused drill for this sound.",
            "इस ध्वनि के केंद्रित अभ्यास में 85% या अधिक अंक प्राप्त करें।",
        ),
    ]
}

/// One recommendation per weak area; priority mirrors the area's severity.
pub fn targeted_recommendations(weak_areas: &[WeakArea]) -> Vec<PracticeRecommendation> {
    weak_areas
        .iter()
        .map(|area| PracticeRecommendation {
            area: area.area.clone(),
            priority: area.severity,
            exercises: exercises_for(area.kind),
            success_metrics: success_metrics_for(area.kind),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Trend;

    fn weak_area(kind: ErrorKind, severity: Severity) -> WeakArea {
        WeakArea {
            area: kind.area_label().to_string(),
            kind,
            severity,
            frequency: 0.5,
            improvement_trend: Trend::Stable,
            recommended_practice_minutes: 10,
            resources: vec![],
        }
    }

    #[test]
    fn test_one_recommendation_per_area() {
        let areas = vec![
            weak_area(ErrorKind::ThSubstitution, Severity::High),
            weak_area(ErrorKind::VWConfusion, Severity::Medium),
        ];
        let recs = targeted_recommendations(&areas);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].priority, Severity::High);
        assert_eq!(recs[1].priority, Severity::Medium);
    }

    #[test]
    fn test_recommendations_are_complete() {
        for kind in ErrorKind::all() {
            let recs = targeted_recommendations(&[weak_area(*kind, Severity::Low)]);
            let rec = &recs[0];
            assert!(!rec.exercises.is_empty());
            assert!(!rec.success_metrics.is_empty());
            for text in rec.exercises.iter().chain(rec.success_metrics.iter()) {
                assert!(text.is_complete());
            }
        }
    }

    #[test]
    fn test_no_areas_no_recommendations() {
        assert!(targeted_recommendations(&[]).is_empty());
    }
}
