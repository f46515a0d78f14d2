//! Weekly progress report: aggregates the trailing practice window from the
//! metrics store into bilingual narrative plus chart-ready series. Pure
//! heuristics over the session log, deterministic for a given history.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ReportParams;
use crate::store::{MetricsStore, SessionRecord};
use crate::types::{ErrorKind, Localized, SessionType};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetrics {
    pub session_count: usize,
    pub total_practice_minutes: f64,
    pub average_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTypeShare {
    pub session_type: SessionType,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhonemeProgress {
    pub area: String,
    pub kind: ErrorKind,
    /// Share of this week's sessions the error appeared in.
    pub frequency: f64,
}

/// Chart-ready series for the report screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualData {
    pub score_history: Vec<DataPoint>,
    pub session_type_distribution: Vec<SessionTypeShare>,
    pub phoneme_progress: Vec<PhonemeProgress>,
    pub daily_practice_minutes: Vec<DataPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub user_id: String,
    pub week_start: DateTime<Utc>,
    pub week_end: DateTime<Utc>,
    pub summary: Localized,
    pub achievements: Vec<Localized>,
    pub improvements: Vec<Localized>,
    pub next_week_goals: Vec<Localized>,
    pub metrics: ReportMetrics,
    pub visual_data: VisualData,
}

pub fn generate_weekly_report(
    store: &dyn MetricsStore,
    params: &ReportParams,
    user_id: &str,
    now: DateTime<Utc>,
) -> WeeklyReport {
    let week_start = now - Duration::days(params.window_days);
    let records = store.history_since(user_id, week_start);
    tracing::debug!(user_id, sessions = records.len(), "generating weekly report");

    if records.is_empty() {
        return empty_week_report(user_id, params, week_start, now);
    }

    let session_count = records.len();
    let total_practice_minutes: f64 = records.iter().map(|r| r.duration_minutes).sum();
    let average_score = records
        .iter()
        .map(|r| r.metrics.overall_score)
        .sum::<f64>()
        / session_count as f64;

    let metrics = ReportMetrics {
        session_count,
        total_practice_minutes,
        average_score,
    };
    let visual_data = build_visual_data(&records);

    WeeklyReport {
        user_id: user_id.to_string(),
        week_start,
        week_end: now,
        summary: summary_for(&metrics),
        achievements: achievements_for(&metrics, &records, params),
        improvements: improvements_for(&records, &visual_data.phoneme_progress),
        next_week_goals: goals_for(&metrics, &visual_data, params),
        metrics,
        visual_data,
    }
}

fn empty_week_report(
    user_id: &str,
    params: &ReportParams,
    week_start: DateTime<Utc>,
    week_end: DateTime<Utc>,
) -> WeeklyReport {
    WeeklyReport {
        user_id: user_id.to_string(),
        week_start,
        week_end,
        summary: Localized::new(
            "No practice sessions this week. A fresh week is a fresh start, and even five minutes a day adds up quickly.",
            "इस हफ्ते कोई अभ्यास सत्र नहीं हुआ। नया हफ्ता एक नई शुरुआत है, और रोज़ पांच मिनट भी जल्दी रंग लाते हैं।",
        ),
        achievements: vec![],
        improvements: vec![],
        next_week_goals: vec![
            Localized::new(
                format!(
                    "Try one short session to get going, and aim for {} practice minutes this week.",
                    params.goal_practice_minutes as u32
                ),
                format!(
                    "शुरुआत के लिए एक छोटा सत्र आज़माएं, और इस हफ्ते {} मिनट अभ्यास का लक्ष्य रखें।",
                    params.goal_practice_minutes as u32
                ),
            ),
        ],
        metrics: ReportMetrics {
            session_count: 0,
            total_practice_minutes: 0.0,
            average_score: 0.0,
        },
        visual_data: VisualData::default(),
    }
}

fn build_visual_data(records: &[SessionRecord]) -> VisualData {
    let score_history = records
        .iter()
        .map(|r| DataPoint {
            date: r.completed_at.format("%Y-%m-%d").to_string(),
            value: r.metrics.overall_score,
        })
        .collect();

    let mut session_type_distribution: Vec<SessionTypeShare> = Vec::new();
    for record in records {
        match session_type_distribution
            .iter_mut()
            .find(|share| share.session_type == record.session_type)
        {
            Some(share) => share.count += 1,
            None => session_type_distribution.push(SessionTypeShare {
                session_type: record.session_type,
                count: 1,
            }),
        }
    }

    let mut phoneme_progress: Vec<PhonemeProgress> = ErrorKind::all()
        .iter()
        .filter_map(|&kind| {
            let hits = records
                .iter()
                .filter(|r| r.phoneme_errors.contains(&kind))
                .count();
            (hits > 0).then(|| PhonemeProgress {
                area: kind.area_label().to_string(),
                kind,
                frequency: hits as f64 / records.len() as f64,
            })
        })
        .collect();
    phoneme_progress.sort_by(|a, b| b.frequency.total_cmp(&a.frequency));

    let mut daily_practice_minutes: Vec<DataPoint> = Vec::new();
    for record in records {
        let date = record.completed_at.format("%Y-%m-%d").to_string();
        match daily_practice_minutes.iter_mut().find(|p| p.date == date) {
            Some(point) => point.value += record.duration_minutes,
            None => daily_practice_minutes.push(DataPoint {
                date,
                value: record.duration_minutes,
            }),
        }
    }

    VisualData {
        score_history,
        session_type_distribution,
        phoneme_progress,
        daily_practice_minutes,
    }
}

fn summary_for(metrics: &ReportMetrics) -> Localized {
    Localized::new(
        format!(
            "You completed {} session(s) and {:.0} practice minutes this week, averaging {:.0} points. Keep the momentum going!",
            metrics.session_count, metrics.total_practice_minutes, metrics.average_score
        ),
        format!(
            "इस हफ्ते आपने {} सत्र और {:.0} मिनट अभ्यास पूरा किया, औसत {:.0} अंक रहे। यही रफ्तार बनाए रखें!",
            metrics.session_count, metrics.total_practice_minutes, metrics.average_score
        ),
    )
}

fn achievements_for(
    metrics: &ReportMetrics,
    records: &[SessionRecord],
    params: &ReportParams,
) -> Vec<Localized> {
    let mut achievements = Vec::new();

    if metrics.session_count >= params.achievement_session_count {
        achievements.push(Localized::new(
            format!(
                "Consistency star: {} sessions completed this week.",
                metrics.session_count
            ),
            format!(
                "निरंतरता के सितारे: इस हफ्ते {} सत्र पूरे किए।",
                metrics.session_count
            ),
        ));
    }
    if metrics.average_score >= params.achievement_average_score {
        achievements.push(Localized::new(
            format!("High scorer: weekly average of {:.0} points.", metrics.average_score),
            format!("शानदार स्कोर: साप्ताहिक औसत {:.0} अंक।", metrics.average_score),
        ));
    }
    if let Some(delta) = score_improvement(records) {
        if delta >= 5.0 {
            achievements.push(Localized::new(
                format!("On the rise: scores improved by {:.0} points within the week.", delta),
                format!("बढ़ती उड़ान: हफ्ते के भीतर स्कोर {:.0} अंक बेहतर हुआ।", delta),
            ));
        }
    }

    achievements
}

/// Average of the later half minus the earlier half, `None` under four
/// sessions.
fn score_improvement(records: &[SessionRecord]) -> Option<f64> {
    if records.len() < 4 {
        return None;
    }
    let mid = records.len() / 2;
    let earlier = records[..mid]
        .iter()
        .map(|r| r.metrics.overall_score)
        .sum::<f64>()
        / mid as f64;
    let later = records[mid..]
        .iter()
        .map(|r| r.metrics.overall_score)
        .sum::<f64>()
        / (records.len() - mid) as f64;
    Some(later - earlier)
}

fn improvements_for(
    records: &[SessionRecord],
    phoneme_progress: &[PhonemeProgress],
) -> Vec<Localized> {
    let mut improvements = Vec::new();

    // Error kinds present in the earlier half but gone from the later half.
    if records.len() >= 4 {
        let mid = records.len() / 2;
        for &kind in ErrorKind::all() {
            let early = records[..mid].iter().any(|r| r.phoneme_errors.contains(&kind));
            let late = records[mid..].iter().any(|r| r.phoneme_errors.contains(&kind));
            if early && !late {
                improvements.push(Localized::new(
                    format!("Your {} practice is paying off; it stopped showing up late in the week.", kind.area_label().replace('_', " ")),
                    "आपकी मेहनत रंग ला रही है; हफ्ते के आखिर में यह गलती दिखनी बंद हो गई।".to_string(),
                ));
            }
        }
    }

    if improvements.is_empty() {
        if let Some(top) = phoneme_progress.first() {
            improvements.push(Localized::new(
                format!(
                    "Focused reps on {} will unlock the biggest gains next.",
                    top.area.replace('_', " ")
                ),
                "इस क्षेत्र पर केंद्रित अभ्यास से अगली सबसे बड़ी प्रगति मिलेगी।".to_string(),
            ));
        }
    }

    improvements
}

fn goals_for(metrics: &ReportMetrics, visual: &VisualData, params: &ReportParams) -> Vec<Localized> {
    let mut goals = Vec::new();

    if metrics.total_practice_minutes < params.goal_practice_minutes {
        goals.push(Localized::new(
            format!(
                "Reach {} practice minutes next week (this week: {:.0}).",
                params.goal_practice_minutes as u32, metrics.total_practice_minutes
            ),
            format!(
                "अगले हफ्ते {} मिनट अभ्यास तक पहुंचें (इस हफ्ते: {:.0})।",
                params.goal_practice_minutes as u32, metrics.total_practice_minutes
            ),
        ));
    } else {
        goals.push(Localized::new(
            format!(
                "Keep your streak: another {} minutes of practice next week.",
                params.goal_practice_minutes as u32
            ),
            format!(
                "अपनी लय बनाए रखें: अगले हफ्ते फिर {} मिनट अभ्यास करें।",
                params.goal_practice_minutes as u32
            ),
        ));
    }

    if let Some(top) = visual.phoneme_progress.first() {
        goals.push(Localized::new(
            format!(
                "Spend a few minutes each day on {} drills.",
                top.area.replace('_', " ")
            ),
            "हर दिन कुछ मिनट इस ध्वनि के अभ्यास पर लगाएं।".to_string(),
        ));
    }

    if visual.session_type_distribution.len() < 2 {
        goals.push(Localized::new(
            "Mix it up: try a different session type, like a roleplay scenario.",
            "कुछ नया आज़माएं: किसी और तरह का सत्र करें, जैसे रोलप्ले परिदृश्य।",
        ));
    }

    goals
}
