use crate::config::{CandidateOrder, DetectorConfig};
use crate::core::dominance::reduce_dominant;
use crate::core::extrema::find_local_extrema;
use crate::core::minority::cut_minor;
use crate::core::similarity::count_similar;
use crate::core::window::truncate;
use crate::models::{Candidate, Detection, DetectionTrace, ExtremumKind, Sample, StageTrace};
use crate::Result;
use std::cmp::Reverse;
use tracing::{debug, info, warn};

/// Support/resistance detector over a single price series
#[derive(Debug, Clone)]
pub struct SrDetector {
    config: DetectorConfig,
}

impl SrDetector {
    /// Creates a detector, rejecting configurations the pipeline cannot run with
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Identify resistance and support levels in `series`
    pub fn detect(&self, series: &[Sample]) -> Detection {
        self.trace(series).into_detection()
    }

    /// Run both pipelines and keep every intermediate list.
    ///
    /// The two extremum kinds share nothing but the truncated window.
    pub fn trace<'s>(&self, series: &'s [Sample]) -> DetectionTrace<'s> {
        let window = truncate(series, self.config.sample_window);
        if window.len() < self.config.sample_window {
            warn!(
                "Series has {} samples, fewer than the configured window of {}",
                window.len(),
                self.config.sample_window
            );
        }
        debug!("Analysing {} of {} samples", window.len(), series.len());

        let resistance = self.run_stages(window, ExtremumKind::High);
        let support = self.run_stages(window, ExtremumKind::Low);

        info!(
            "Detected {} resistance and {} support levels",
            resistance.filtered.len(),
            support.filtered.len()
        );

        DetectionTrace {
            window,
            resistance,
            support,
        }
    }

    fn run_stages<'s>(&self, window: &'s [Sample], kind: ExtremumKind) -> StageTrace<'s> {
        let tolerance = self.config.similarity_tolerance;

        let mut candidates = find_local_extrema(window, kind, self.config.local_window_radius);
        if self.config.candidate_order == CandidateOrder::Ranked {
            candidates.sort_by_key(|c| Reverse(c.price()));
        }
        debug!("{:?}: {} local extrema", kind, candidates.len());

        let mut counted = count_similar(&candidates, tolerance);
        if self.config.candidate_order == CandidateOrder::Ranked {
            counted.sort_by_key(|c| Reverse(c.recurrence_count));
        }
        debug!(
            "{:?}: strongest recurrence count {}",
            kind,
            counted.iter().map(|c| c.recurrence_count).max().unwrap_or(0)
        );

        let reduced = reduce_dominant(&counted, tolerance);
        debug!("{:?}: {} dominant levels", kind, reduced.len());

        let filtered = cut_minor(&reduced, self.config.minority_threshold);
        debug!(
            "{:?}: {} levels with at least {} recurrences",
            kind,
            filtered.len(),
            self.config.minority_threshold
        );

        StageTrace {
            kind,
            candidates,
            counted,
            reduced,
            filtered,
        }
    }
}

/// Identify support and resistance levels with a one-off detector
pub fn identify_support_resistance(
    series: &[Sample],
    config: DetectorConfig,
) -> Result<Detection> {
    Ok(SrDetector::new(config)?.detect(series))
}

/// Prices of a candidate list, mostly useful for logging and tests
pub fn candidate_prices(candidates: &[Candidate<'_>]) -> Vec<i64> {
    candidates.iter().map(|c| c.price()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LevelType;
    use crate::testing::series;

    fn config(radius: usize, threshold: usize) -> DetectorConfig {
        DetectorConfig {
            sample_window: 300,
            local_window_radius: radius,
            similarity_tolerance: 0.05,
            minority_threshold: threshold,
            candidate_order: CandidateOrder::Series,
        }
    }

    #[test]
    fn detects_the_double_top() {
        let s = series(&[100, 105, 100, 95, 100, 105, 100]);
        let detection = SrDetector::new(config(1, 2)).unwrap().detect(&s);

        assert_eq!(detection.resistance.len(), 1);
        let level = &detection.resistance[0];
        assert_eq!(level.price, 105);
        assert_eq!(level.strength, 2);
        assert_eq!(level.level_type, LevelType::Resistance);
        assert_eq!(level.date, s[1].date);
    }

    #[test]
    fn double_top_is_minor_above_its_count() {
        let s = series(&[100, 105, 100, 95, 100, 105, 100]);
        let detection = SrDetector::new(config(1, 3)).unwrap().detect(&s);
        assert!(detection.resistance.is_empty());
    }

    #[test]
    fn support_levels_come_from_minima() {
        let s = series(&[100, 105, 100, 95, 100, 105, 100]);
        let trace = SrDetector::new(config(1, 1)).unwrap().trace(&s);

        assert_eq!(candidate_prices(&trace.support.candidates), vec![100, 95, 100]);
        // 95 reaches 99.75 -> 99, so it only sees itself; 100 sees all three
        assert_eq!(
            trace
                .support
                .counted
                .iter()
                .map(|c| c.recurrence_count)
                .collect::<Vec<_>>(),
            vec![3, 1, 3]
        );
        assert_eq!(candidate_prices(&trace.support.reduced), vec![100]);

        let detection = trace.into_detection();
        assert_eq!(detection.support.len(), 1);
        assert_eq!(detection.support[0].level_type, LevelType::Support);
        assert_eq!(detection.support[0].strength, 3);
    }

    #[test]
    fn empty_series_gives_empty_levels() {
        let trace = SrDetector::new(config(3, 5)).unwrap().trace(&[]);
        assert!(trace.window.is_empty());
        for stage in [&trace.resistance, &trace.support] {
            assert!(stage.candidates.is_empty());
            assert!(stage.counted.is_empty());
            assert!(stage.reduced.is_empty());
            assert!(stage.filtered.is_empty());
        }
        assert!(trace.into_detection().is_empty());
    }

    #[test]
    fn only_the_recent_window_is_analysed() {
        // the old 500 spike falls outside a 5 sample window
        let s = series(&[500, 10, 10, 12, 11, 13, 11]);
        let detector = SrDetector::new(DetectorConfig {
            sample_window: 5,
            ..config(1, 1)
        })
        .unwrap();
        let trace = detector.trace(&s);
        assert_eq!(trace.window.len(), 5);
        assert!(!candidate_prices(&trace.resistance.candidates).contains(&500));
    }

    #[test]
    fn ranked_order_keeps_the_strongest_representative() {
        // in series order 100 comes first and absorbs the stronger 104 cluster
        let s = series(&[100, 80, 104, 80, 104, 80, 108, 80, 108]);
        let series_order = SrDetector::new(config(0, 1)).unwrap().trace(&s);
        assert_eq!(candidate_prices(&series_order.resistance.reduced), vec![100, 80, 108]);

        let ranked = SrDetector::new(DetectorConfig {
            candidate_order: CandidateOrder::Ranked,
            ..config(0, 1)
        })
        .unwrap()
        .trace(&s);
        assert_eq!(
            candidate_prices(&ranked.resistance.candidates),
            vec![108, 108, 104, 104, 100, 80, 80, 80, 80]
        );
        assert_eq!(candidate_prices(&ranked.resistance.reduced), vec![104, 80]);
        let top = ranked.resistance.reduced[0];
        assert_eq!(top.index, 2);
        assert_eq!(top.recurrence_count, 5);
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let result = SrDetector::new(DetectorConfig {
            similarity_tolerance: 0.0,
            ..config(1, 1)
        });
        assert!(result.is_err());

        let result = identify_support_resistance(
            &[],
            DetectorConfig {
                sample_window: 0,
                ..config(1, 1)
            },
        );
        assert!(result.is_err());
    }
}
