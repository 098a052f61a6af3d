//! Data Transfer Objects
//!
//! Request and response types for the form and JSON endpoints.

use serde::{Deserialize, Serialize};

use crate::session::Feedback;

// ============================================
// FEEDBACK DTOs
// ============================================

/// Form-encoded feedback submission from the dashboard
///
/// Fields arrive as raw strings: an emptied number input submits
/// `duration=` and must fall back to the widget default rather than
/// failing the whole form.
#[derive(Debug, Default, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl FeedbackForm {
    /// Parsed quality, if present and an integer
    pub fn quality(&self) -> Option<i64> {
        self.quality.as_deref().and_then(|s| s.trim().parse().ok())
    }

    /// Parsed duration, if present and finite
    pub fn duration(&self) -> Option<f64> {
        self.duration
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|d| d.is_finite())
    }

    pub fn notes(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }
}

/// JSON feedback submission
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub quality: i64,
    pub duration: f64,
    #[serde(default)]
    pub notes: String,
}

/// JSON feedback response
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackResponse {
    /// Status: "ok"
    pub status: String,
    pub feedback: Feedback,
}

// ============================================
// METRICS DTOs
// ============================================

/// Query string for the metrics endpoint
#[derive(Debug, Default, Deserialize)]
pub struct MetricsQuery {
    /// Seed to derive metrics from; random when omitted
    #[serde(default)]
    pub seed: Option<u64>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: "healthy"
    pub status: String,
    /// Number of live sessions
    pub sessions: usize,
    /// Seconds since server start
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}
