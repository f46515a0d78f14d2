use serde::{Deserialize, Serialize};

use crate::coaching::profile::{average_overall, error_frequency, PerformanceProfile};
use crate::config::WeakAreaParams;
use crate::types::{ErrorKind, Localized, Severity, Trend};

/// A recurring error category derived from session history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakArea {
    pub area: String,
    pub kind: ErrorKind,
    pub severity: Severity,
    /// Share of sessions containing this error kind, in [0, 1].
    pub frequency: f64,
    pub improvement_trend: Trend,
    pub recommended_practice_minutes: u32,
    pub resources: Vec<Localized>,
}

fn escalate(severity: Severity) -> Severity {
    match severity {
        Severity::Low => Severity::Medium,
        _ => Severity::High,
    }
}

fn resources_for(kind: ErrorKind) -> Vec<Localized> {
    match kind {
        ErrorKind::ThSubstitution => vec![
            Localized::new(
                "Minimal pair drill: think/tink, three/tree, thank/tank.",
                "मिनिमल पेयर अभ्यास: think/tink, three/tree, thank/tank।",
            ),
            Localized::new(
                "Mirror practice: watch your tongue touch your teeth on each 'th'.",
                "आईने के सामने अभ्यास: हर 'th' पर जीभ को दांतों से छूते हुए देखें।",
            ),
        ],
        ErrorKind::VWConfusion => vec![
            Localized::new(
                "Contrast drill: vest/west, vine/wine, vow/wow.",
                "विपरीत ध्वनि अभ्यास: vest/west, vine/wine, vow/wow।",
            ),
            Localized::new(
                "Hold a finger to your lips: it should feel air on 'v' but not touch teeth on 'w'.",
                "होंठों पर उंगली रखें: 'v' पर हवा महसूस होगी, 'w' पर दांत नहीं छूने चाहिए।",
            ),
        ],
        ErrorKind::RPronunciation => vec![Localized::new(
            "Slow reading with soft 'r': red, around, mirror, rural.",
            "नरम 'r' के साथ धीमा वाचन: red, around, mirror, rural।",
        )],
        ErrorKind::ConsonantCluster => vec![Localized::new(
            "Whisper the 's' first, then glide into the word: s-chool, s-tudent.",
            "पहले 's' फुसफुसाएं, फिर शब्द में जाएं: s-chool, s-tudent।",
        )],
        ErrorKind::SchwaInsertion => vec![Localized::new(
            "Clap once per syllable: film (one clap), milk (one clap).",
            "हर अक्षर पर एक ताली: film (एक ताली), milk (एक ताली)।",
        )],
        ErrorKind::StressPattern => vec![Localized::new(
            "Mark the stressed syllable, then exaggerate it: phoTOgraphy, deVELopment.",
            "ज़ोर वाले अक्षर को चिह्नित करें, फिर बढ़ा-चढ़ाकर बोलें: phoTOgraphy, deVELopment।",
        )],
    }
}

/// Aggregates phoneme errors across the session window. Sorted by severity
/// descending, then frequency descending, so the UI can render top-down.
pub fn identify_weak_areas(
    profile: &PerformanceProfile,
    params: &WeakAreaParams,
) -> Vec<WeakArea> {
    let history = &profile.session_history;
    if history.is_empty() {
        return vec![];
    }

    let overall_average = average_overall(history);
    let mut areas: Vec<WeakArea> = Vec::new();

    for kind in ErrorKind::all() {
        let frequency = error_frequency(history, *kind);
        if frequency <= 0.0 {
            continue;
        }

        let mut severity = if frequency >= params.high_frequency {
            Severity::High
        } else if frequency >= params.medium_frequency {
            Severity::Medium
        } else {
            Severity::Low
        };
        if overall_average < params.impact_accuracy {
            severity = escalate(severity);
        }

        let improvement_trend = trend_for(history, *kind, params.trend_delta);
        let recommended_practice_minutes = match severity {
            Severity::High => params.practice_minutes_high,
            Severity::Medium => params.practice_minutes_medium,
            Severity::Low => params.practice_minutes_low,
        };

        areas.push(WeakArea {
            area: kind.area_label().to_string(),
            kind: *kind,
            severity,
            frequency,
            improvement_trend,
            recommended_practice_minutes,
            resources: resources_for(*kind),
        });
    }

    areas.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| b.frequency.total_cmp(&a.frequency))
            .then_with(|| a.area.cmp(&b.area))
    });

    areas
}

/// Compares error frequency between the earlier and later half of the
/// window; short windows read as stable.
fn trend_for(history: &[crate::store::SessionRecord], kind: ErrorKind, delta: f64) -> Trend {
    if history.len() < 4 {
        return Trend::Stable;
    }
    let mid = history.len() / 2;
    let earlier = error_frequency(&history[..mid], kind);
    let later = error_frequency(&history[mid..], kind);

    if later < earlier - delta {
        Trend::Improving
    } else if later > earlier + delta {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoachingConfig;
    use crate::store::SessionRecord;
    use crate::types::{DifficultyLevel, SessionMetrics, SessionType};
    use chrono::{Duration, Utc};

    fn record(score: f64, errors: Vec<ErrorKind>, age: i64) -> SessionRecord {
        SessionRecord {
            session_id: format!("s{age}"),
            session_type: SessionType::Pronunciation,
            metrics: SessionMetrics {
                overall_score: score,
                pronunciation_score: score,
                fluency_score: score,
                confidence_score: score,
                vocabulary_usage: score,
                cultural_appropriateness_score: score,
            },
            phoneme_errors: errors,
            duration_minutes: 10.0,
            completed_at: Utc::now() - Duration::days(age),
        }
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
    fn test_sorted_by_severity_then_frequency() {
        let records = vec![
            record(70.0, vec![ErrorKind::ThSubstitution, ErrorKind::VWConfusion], 4),
            record(70.0, vec![ErrorKind::ThSubstitution, ErrorKind::VWConfusion], 3),
            record(70.0, vec![ErrorKind::ThSubstitution, ErrorKind::SchwaInsertion], 2),
            record(70.0, vec![ErrorKind::ThSubstitution], 1),
        ];
        let areas = identify_weak_areas(&profile_of(records), &WeakAreaParams::default());

        for pair in areas.windows(2) {
            let ordered = pair[0].severity > pair[1].severity
                || (pair[0].severity == pair[1].severity
                    && pair[0].frequency >= pair[1].frequency);
            assert!(ordered, "areas not sorted: {pair:?}");
        }
        assert_eq!(areas[0].kind, ErrorKind::ThSubstitution);
        assert_eq!(areas[0].severity, Severity::High);
    }

    #[test]
    fn test_low_scores_escalate_severity() {
        // One error in five sessions is low frequency, but failing scores
        // raise the stakes one step.
        let records = vec![
            record(40.0, vec![ErrorKind::SchwaInsertion], 5),
            record(40.0, vec![], 4),
            record(40.0, vec![], 3),
            record(40.0, vec![], 2),
            record(40.0, vec![], 1),
        ];
        let areas = identify_weak_areas(&profile_of(records), &WeakAreaParams::default());
        assert_eq!(areas[0].severity, Severity::Medium);
    }

    #[test]
    fn test_trend_improving_when_errors_fade() {
        let records = vec![
            record(70.0, vec![ErrorKind::VWConfusion], 6),
            record(70.0, vec![ErrorKind::VWConfusion], 5),
            record(70.0, vec![ErrorKind::VWConfusion], 4),
            record(70.0, vec![], 3),
            record(70.0, vec![], 2),
            record(70.0, vec![ErrorKind::VWConfusion], 1),
        ];
        let areas = identify_weak_areas(&profile_of(records), &WeakAreaParams::default());
        let vw = areas.iter().find(|a| a.kind == ErrorKind::VWConfusion).unwrap();
        assert_eq!(vw.improvement_trend, Trend::Improving);
    }

    #[test]
    fn test_empty_history_yields_no_areas() {
        let areas = identify_weak_areas(&profile_of(vec![]), &WeakAreaParams::default());
        assert!(areas.is_empty());
    }

    #[test]
    fn test_every_area_has_resources() {
        let records = vec![record(
            70.0,
            ErrorKind::all().to_vec(),
            1,
        )];
        let areas = identify_weak_areas(&profile_of(records), &WeakAreaParams::default());
        assert_eq!(areas.len(), ErrorKind::all().len());
        for area in &areas {
            assert!(!area.resources.is_empty());
            for resource in &area.resources {
                assert!(resource.is_complete());
            }
        }
    }
}
