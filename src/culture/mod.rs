//! Cultural Scenario & Error-Correction Service: roleplay scenario
//! selection over a fixed catalog, plus communicative-error correction
//! for register, idiom and grammar calques.

pub mod corrections;
pub mod scenarios;

pub use corrections::{
    detect_and_correct, gentle_feedback, Correction, CorrectionItem, FeedbackTone, GentleFeedback,
};
pub use scenarios::{Scenario, ScenarioCatalog, ScenarioCategory};
