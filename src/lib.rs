//! # Neurowake
//!
//! A mock AI sleep dashboard served over local HTTP. Every render draws a
//! fresh random seed, derives a set of nightly sleep metrics from it, and
//! shows them next to a feedback form whose submissions live only in the
//! browser session's in-memory state.
//!
//! ## Modules
//!
//! - [`metrics`]: Seeded generator for nightly sleep metrics
//! - [`session`]: Per-browser session store and the feedback record
//! - [`ui`]: Style sheet and HTML page rendering
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use neurowake::{serve, AppState, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default().config;
//!     let state = AppState::from_config(&config);
//!
//!     // Serves http://127.0.0.1:8501 until Ctrl+C
//!     serve(state, &config.server).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod metrics;
pub mod session;
pub mod ui;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiError, ApiResult, AppState};

pub use config::{Config, ConfigError, ConfigLoad, LoggingConfig, ServerConfig, SessionConfig};

pub use metrics::{draw_seed, generate, NightlyMetrics, SleepStage, StageHours, LUNAR_LABELS};

pub use session::{Feedback, SessionError, SessionId, SessionState, SessionStore};

pub use ui::{render_page, FormValues, PageView, APP_CSS};
