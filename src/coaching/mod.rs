//! Personalized Coaching Service: difficulty policy, weak-area analysis,
//! targeted practice plans and progress-based unlocks. Everything here is a
//! pure read over the persisted session log via `PerformanceProfile`.

pub mod difficulty;
pub mod profile;
pub mod recommendations;
pub mod unlocks;
pub mod weak_areas;

pub use difficulty::{adjust_difficulty, AdjustmentType, DifficultyAdjustment};
pub use profile::PerformanceProfile;
pub use recommendations::{targeted_recommendations, PracticeRecommendation};
pub use unlocks::{default_rules, progress_unlocks, ContentType, Requirement, Unlock, UnlockRule};
pub use weak_areas::{identify_weak_areas, WeakArea};
