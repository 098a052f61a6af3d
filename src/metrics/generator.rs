//! Seeded generator for nightly sleep metrics
//!
//! Draws are consumed from a seeded `StdRng` in a fixed order (score, total,
//! deep, REM, latency, awake, score delta, label), so the same seed always
//! yields the same record.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest seed handed out by [`draw_seed`]
pub const MAX_SEED: u64 = 999_999;

/// Poetic, moon-themed names for tonight
pub const LUNAR_LABELS: [&str; 10] = [
    "Lunar Drift",
    "Moonthread",
    "Silver Tide",
    "Nocturne Veil",
    "Selenic Whisper",
    "Quiet Crescent",
    "Midnight Lattice",
    "Celestial Sigh",
    "Indigo Hush",
    "Tide of Stars",
];

/// Stage of a night's sleep, in the order the breakdown table shows them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SleepStage {
    Light,
    Deep,
    #[serde(rename = "REM")]
    Rem,
    Awake,
}

impl SleepStage {
    pub const ALL: [SleepStage; 4] = [
        SleepStage::Light,
        SleepStage::Deep,
        SleepStage::Rem,
        SleepStage::Awake,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SleepStage::Light => "Light",
            SleepStage::Deep => "Deep",
            SleepStage::Rem => "REM",
            SleepStage::Awake => "Awake",
        }
    }
}

impl fmt::Display for SleepStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the stage breakdown table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageHours {
    pub stage: SleepStage,
    pub hours: f64,
}

/// Ephemeral sleep statistics for one render
///
/// Deep and REM hours are independent fractions of the total and nothing
/// ties their sum to `total_sleep_hours`. With the current fraction ranges
/// (at most 0.28 and 0.35) the sum stays below the total; records built by
/// hand or deserialized may not, see [`NightlyMetrics::stage_overflow`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightlyMetrics {
    /// Seed the record was derived from
    pub seed: u64,
    /// Overall score, 45..=98
    pub sleep_score: u32,
    /// Change against a jittered baseline of 50
    pub score_delta: i32,
    /// Hours asleep, 4.0..=9.5 in steps of 0.1
    pub total_sleep_hours: f64,
    pub deep_sleep_hours: f64,
    pub rem_sleep_hours: f64,
    /// Minutes until falling asleep, 5..=40
    pub sleep_latency_minutes: u32,
    /// Light, Deep, REM, Awake
    pub stage_breakdown: Vec<StageHours>,
    pub lunar_label: String,
}

impl NightlyMetrics {
    /// Score as a fraction for the progress bar
    pub fn progress_fraction(&self) -> f64 {
        (f64::from(self.sleep_score) / 100.0).clamp(0.0, 1.0)
    }

    /// Hours recorded for a stage
    pub fn stage_hours(&self, stage: SleepStage) -> Option<f64> {
        self.stage_breakdown
            .iter()
            .find(|row| row.stage == stage)
            .map(|row| row.hours)
    }

    /// Whether deep + REM exceed the total, leaving a negative Light row
    pub fn stage_overflow(&self) -> bool {
        self.deep_sleep_hours + self.rem_sleep_hours > self.total_sleep_hours
    }
}

/// Draw a fresh seed from the thread-local RNG
pub fn draw_seed() -> u64 {
    rand::thread_rng().gen_range(0..=MAX_SEED)
}

/// Draw a seed and derive one render's metrics
pub fn draw_metrics() -> NightlyMetrics {
    let metrics = generate(draw_seed());
    if metrics.stage_overflow() {
        tracing::debug!(
            seed = metrics.seed,
            "Deep + REM exceed total sleep, Light row is negative"
        );
    }
    metrics
}

/// Round to one decimal place
pub fn round_tenth(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    // Avoid rendering "-0.0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Derive the nightly metrics for a seed
pub fn generate(seed: u64) -> NightlyMetrics {
    let mut rng = StdRng::seed_from_u64(seed);

    let sleep_score = rng.gen_range(45.0..98.0_f64) as u32;
    let total_sleep_hours = round_tenth(rng.gen_range(4.0..9.5));
    let deep_sleep_hours = round_tenth(total_sleep_hours * rng.gen_range(0.12..0.28));
    let rem_sleep_hours = round_tenth(total_sleep_hours * rng.gen_range(0.18..0.35));
    let sleep_latency_minutes = rng.gen_range(5.0..40.0_f64) as u32;
    let awake_hours = round_tenth(rng.gen_range(0.05..0.4));

    // Truncates toward zero
    let baseline = 50.0 + rng.gen_range(-5.0..5.0);
    let score_delta = (f64::from(sleep_score) - baseline) as i32;

    let lunar_label = LUNAR_LABELS[rng.gen_range(0..LUNAR_LABELS.len())].to_string();

    let stage_breakdown = vec![
        StageHours {
            stage: SleepStage::Light,
            hours: round_tenth(total_sleep_hours - deep_sleep_hours - rem_sleep_hours),
        },
        StageHours {
            stage: SleepStage::Deep,
            hours: deep_sleep_hours,
        },
        StageHours {
            stage: SleepStage::Rem,
            hours: rem_sleep_hours,
        },
        StageHours {
            stage: SleepStage::Awake,
            hours: awake_hours,
        },
    ];

    NightlyMetrics {
        seed,
        sleep_score,
        score_delta,
        total_sleep_hours,
        deep_sleep_hours,
        rem_sleep_hours,
        sleep_latency_minutes,
        stage_breakdown,
        lunar_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_one_decimal(value: f64) -> bool {
        ((value * 10.0).round() - value * 10.0).abs() < 1e-9
    }

    #[test]
    fn test_score_in_range() {
        for seed in 0..2_000 {
            let m = generate(seed);
            assert!((45..=98).contains(&m.sleep_score), "seed {}: {}", seed, m.sleep_score);
        }
    }

    #[test]
    fn test_total_hours_in_range_and_rounded() {
        for seed in 0..2_000 {
            let m = generate(seed);
            assert!(
                (4.0..=9.5).contains(&m.total_sleep_hours),
                "seed {}: {}",
                seed,
                m.total_sleep_hours
            );
            assert!(is_one_decimal(m.total_sleep_hours));
        }
    }

    #[test]
    fn test_deep_and_rem_bounded_by_total() {
        for seed in 0..2_000 {
            let m = generate(seed);
            // 0.05 allows for rounding to one decimal
            let bound = m.total_sleep_hours * 0.35 + 0.05 + 1e-9;

            assert!(m.deep_sleep_hours >= 0.0);
            assert!(m.rem_sleep_hours >= 0.0);
            assert!(m.deep_sleep_hours <= bound, "seed {}: deep {}", seed, m.deep_sleep_hours);
            assert!(m.rem_sleep_hours <= bound, "seed {}: rem {}", seed, m.rem_sleep_hours);
            assert!(is_one_decimal(m.deep_sleep_hours));
            assert!(is_one_decimal(m.rem_sleep_hours));
        }
    }

    #[test]
    fn test_latency_and_awake_in_range() {
        for seed in 0..2_000 {
            let m = generate(seed);
            assert!((5..=40).contains(&m.sleep_latency_minutes));

            let awake = m.stage_hours(SleepStage::Awake).unwrap();
            assert!((0.0..=0.4).contains(&awake), "seed {}: awake {}", seed, awake);
        }
    }

    #[test]
    fn test_lunar_label_from_fixed_list() {
        for seed in 0..500 {
            let m = generate(seed);
            assert!(LUNAR_LABELS.contains(&m.lunar_label.as_str()));
        }
    }

    #[test]
    fn test_breakdown_order_and_light_hours() {
        let m = generate(42);
        let stages: Vec<SleepStage> = m.stage_breakdown.iter().map(|r| r.stage).collect();
        assert_eq!(stages, SleepStage::ALL.to_vec());

        let light = m.stage_hours(SleepStage::Light).unwrap();
        let expected = round_tenth(m.total_sleep_hours - m.deep_sleep_hours - m.rem_sleep_hours);
        assert_eq!(light, expected);
        assert_eq!(m.stage_hours(SleepStage::Deep), Some(m.deep_sleep_hours));
        assert_eq!(m.stage_hours(SleepStage::Rem), Some(m.rem_sleep_hours));
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        assert_eq!(generate(123_456), generate(123_456));
    }

    #[test]
    fn test_different_seeds_differ() {
        let distinct = (0..50)
            .map(generate)
            .map(|m| (m.sleep_score, (m.total_sleep_hours * 10.0) as i64))
            .collect::<std::collections::HashSet<_>>();
        assert!(distinct.len() > 1);
    }

    fn hand_built(total: f64, deep: f64, rem: f64) -> NightlyMetrics {
        NightlyMetrics {
            seed: 0,
            sleep_score: 60,
            score_delta: 10,
            total_sleep_hours: total,
            deep_sleep_hours: deep,
            rem_sleep_hours: rem,
            sleep_latency_minutes: 12,
            stage_breakdown: vec![
                StageHours {
                    stage: SleepStage::Light,
                    hours: round_tenth(total - deep - rem),
                },
                StageHours {
                    stage: SleepStage::Deep,
                    hours: deep,
                },
                StageHours {
                    stage: SleepStage::Rem,
                    hours: rem,
                },
                StageHours {
                    stage: SleepStage::Awake,
                    hours: 0.2,
                },
            ],
            lunar_label: LUNAR_LABELS[0].to_string(),
        }
    }

    #[test]
    fn test_stage_overflow() {
        let m = hand_built(5.0, 2.8, 2.6);
        assert!(m.stage_overflow());
        assert_eq!(m.stage_hours(SleepStage::Light), Some(-0.4));

        let m = hand_built(5.0, 1.2, 1.5);
        assert!(!m.stage_overflow());
        assert_eq!(m.stage_hours(SleepStage::Light), Some(2.3));

        // Exactly full is not an overflow
        let m = hand_built(4.0, 2.0, 2.0);
        assert!(!m.stage_overflow());
    }

    #[test]
    fn test_generated_records_never_overflow() {
        for seed in 0..2_000 {
            let m = generate(seed);
            assert!(!m.stage_overflow(), "seed {}", seed);
            assert!(m.stage_hours(SleepStage::Light).unwrap() > 0.0);
        }
    }

    #[test]
    fn test_progress_fraction() {
        let m = generate(7);
        assert!((m.progress_fraction() - f64::from(m.sleep_score) / 100.0).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&m.progress_fraction()));
    }

    #[test]
    fn test_draw_seed_in_range() {
        for _ in 0..100 {
            assert!(draw_seed() <= MAX_SEED);
        }
    }

    #[test]
    fn test_round_tenth() {
        assert_eq!(round_tenth(7.46), 7.5);
        assert_eq!(round_tenth(4.04), 4.0);
        assert_eq!(round_tenth(-0.04).to_string(), "0");
    }

    #[test]
    fn test_stage_serializes_as_display_name() {
        let json = serde_json::to_string(&SleepStage::Rem).unwrap();
        assert_eq!(json, "\"REM\"");
        assert_eq!(SleepStage::Light.to_string(), "Light");
    }
}
