//! Browser sessions
//!
//! Per-session key-value state and the feedback record stored in it.
//! Nothing here touches durable storage.

pub mod feedback;
pub mod store;

pub use feedback::{
    clamp_duration, clamp_quality, Feedback, DEFAULT_QUALITY, DURATION_STEP, MAX_DURATION,
    MAX_QUALITY, MIN_DURATION,
};
pub use store::{SessionError, SessionId, SessionState, SessionStore, LAST_FEEDBACK_KEY};
