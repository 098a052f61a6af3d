//! Sleep feedback record
//!
//! What the feedback form writes into the session under `last_feedback`.

use chrono::{DateTime, Local, SecondsFormat};
use serde::{Deserialize, Serialize};

/// Slider default for sleep quality
pub const DEFAULT_QUALITY: u8 = 72;
/// Slider upper bound (lower bound is 0)
pub const MAX_QUALITY: u8 = 100;
/// Duration field bounds in hours
pub const MIN_DURATION: f64 = 0.0;
pub const MAX_DURATION: f64 = 24.0;
/// Duration field step in hours
pub const DURATION_STEP: f64 = 0.25;

/// Feedback submitted by the user about last night's sleep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Self-rated quality, 0..=100
    pub quality: u8,
    /// Hours slept, 0.0..=24.0
    pub duration: f64,
    /// Free text, may be empty
    pub notes: String,
    /// ISO 8601 submission time
    pub timestamp: String,
}

impl Feedback {
    /// Build a feedback record stamped with the current local time
    ///
    /// Values are clamped to the form widgets' ranges.
    pub fn new(quality: i64, duration: f64, notes: impl Into<String>) -> Self {
        Self::at(quality, duration, notes, Local::now())
    }

    /// Build a feedback record stamped with a given time
    pub fn at(
        quality: i64,
        duration: f64,
        notes: impl Into<String>,
        submitted_at: DateTime<Local>,
    ) -> Self {
        Self {
            quality: clamp_quality(quality),
            duration: clamp_duration(duration),
            notes: notes.into(),
            timestamp: submitted_at.to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }

    /// Notes are only shown back when they contain more than whitespace
    pub fn has_notes(&self) -> bool {
        !self.notes.trim().is_empty()
    }

    /// Parse the stored timestamp
    pub fn submitted_at(&self) -> Option<DateTime<chrono::FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.timestamp).ok()
    }
}

/// Clamp a quality rating to the slider range
pub fn clamp_quality(quality: i64) -> u8 {
    quality.clamp(0, i64::from(MAX_QUALITY)) as u8
}

/// Clamp a duration to the number field range
///
/// Non-finite values must be rejected by the caller; NaN passes through.
pub fn clamp_duration(duration: f64) -> f64 {
    duration.clamp(MIN_DURATION, MAX_DURATION)
}
