use crate::models::{Candidate, ExtremumKind, Sample};

/// Find every sample that is the maximum (`High`) or minimum (`Low`) of the
/// window `[i - radius, i + radius]` around it, clamped to the series bounds.
///
/// Ties are inclusive: every index holding the extreme price of its own window
/// is emitted, so flat tops and bottoms produce several candidates. Output is
/// in series order.
pub fn find_local_extrema(
    samples: &[Sample],
    kind: ExtremumKind,
    radius: usize,
) -> Vec<Candidate<'_>> {
    let len = samples.len();

    (0..len)
        .filter(|&i| {
            let lower = i.saturating_sub(radius);
            let upper = i.saturating_add(radius).min(len - 1);
            let prices = samples[lower..=upper].iter().map(|s| s.price);
            let extreme = match kind {
                ExtremumKind::High => prices.max(),
                ExtremumKind::Low => prices.min(),
            };
            extreme == Some(samples[i].price)
        })
        .map(|i| Candidate::new(i, &samples[i]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::series;

    fn prices(candidates: &[Candidate]) -> Vec<i64> {
        candidates.iter().map(|c| c.price()).collect()
    }

    fn indices(candidates: &[Candidate]) -> Vec<usize> {
        candidates.iter().map(|c| c.index).collect()
    }

    #[test]
    fn finds_peaks_and_troughs() {
        let s = series(&[100, 105, 100, 95, 100, 105, 100]);

        let highs = find_local_extrema(&s, ExtremumKind::High, 1);
        assert_eq!(indices(&highs), vec![1, 5]);
        assert_eq!(prices(&highs), vec![105, 105]);

        let lows = find_local_extrema(&s, ExtremumKind::Low, 1);
        assert_eq!(indices(&lows), vec![0, 3, 6]);
    }

    #[test]
    fn new_candidates_start_uncounted() {
        let s = series(&[1, 3, 2]);
        let highs = find_local_extrema(&s, ExtremumKind::High, 1);
        assert!(highs.iter().all(|c| c.recurrence_count == 0));
    }

    #[test]
    fn ties_emit_every_index() {
        let s = series(&[1, 5, 5, 5, 1]);
        let highs = find_local_extrema(&s, ExtremumKind::High, 1);
        assert_eq!(indices(&highs), vec![1, 2, 3]);
    }

    #[test]
    fn edge_windows_are_clamped() {
        let s = series(&[9, 1, 2, 3, 10]);
        let highs = find_local_extrema(&s, ExtremumKind::High, 2);
        assert_eq!(indices(&highs), vec![0, 4]);
        let lows = find_local_extrema(&s, ExtremumKind::Low, 2);
        assert_eq!(indices(&lows), vec![1]);
    }

    #[test]
    fn increasing_series_has_one_maximum() {
        let s = series(&[1, 2, 3, 4, 5, 6, 7, 8]);
        for radius in 1..12 {
            let highs = find_local_extrema(&s, ExtremumKind::High, radius);
            assert_eq!(indices(&highs), vec![7], "radius {}", radius);
            let lows = find_local_extrema(&s, ExtremumKind::Low, radius);
            assert_eq!(indices(&lows), vec![0], "radius {}", radius);
        }
    }

    #[test]
    fn zero_radius_marks_everything() {
        let s = series(&[3, 1, 2]);
        assert_eq!(find_local_extrema(&s, ExtremumKind::High, 0).len(), 3);
        assert_eq!(find_local_extrema(&s, ExtremumKind::Low, 0).len(), 3);
    }

    #[test]
    fn huge_radius_does_not_overflow() {
        let s = series(&[3, 1, 2]);
        let highs = find_local_extrema(&s, ExtremumKind::High, usize::MAX);
        assert_eq!(indices(&highs), vec![0]);
    }

    #[test]
    fn empty_series_has_no_extrema() {
        assert!(find_local_extrema(&[], ExtremumKind::High, 3).is_empty());
        assert!(find_local_extrema(&[], ExtremumKind::Low, 3).is_empty());
    }

    #[test]
    fn extrema_dominate_their_window() {
        let s = series(&[
            12, 15, 11, 18, 18, 9, 14, 20, 7, 7, 13, 16, 10, 19, 8, 12, 17,
        ]);
        for radius in 0..5 {
            for c in find_local_extrema(&s, ExtremumKind::High, radius) {
                let lower = c.index.saturating_sub(radius);
                let upper = (c.index + radius).min(s.len() - 1);
                assert!(s[lower..=upper].iter().all(|x| c.price() >= x.price));
            }
            for c in find_local_extrema(&s, ExtremumKind::Low, radius) {
                let lower = c.index.saturating_sub(radius);
                let upper = (c.index + radius).min(s.len() - 1);
                assert!(s[lower..=upper].iter().all(|x| c.price() <= x.price));
            }
        }
    }
}
