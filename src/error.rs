use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("session {0} not found or already completed")]
    SessionNotFound(String),

    #[error("session {session_id} already completed all {total_stages} stages")]
    StageLimitReached {
        session_id: String,
        total_stages: u32,
    },

    #[error("could not capture audio: {0}")]
    AudioCapture(String),
}
