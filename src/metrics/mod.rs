//! Nightly sleep metrics
//!
//! Mock "AI predictions" for last night's sleep. Every render draws a fresh
//! seed and derives a [`NightlyMetrics`] record from it; nothing is cached
//! between renders.

pub mod generator;

pub use generator::{
    draw_metrics, draw_seed, generate, round_tenth, NightlyMetrics, SleepStage, StageHours,
    LUNAR_LABELS, MAX_SEED,
};
