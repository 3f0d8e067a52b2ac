use crate::models::Sample;

/// Keep only the last `sample_window` samples, in their original order
pub fn truncate(series: &[Sample], sample_window: usize) -> &[Sample] {
    let len = series.len();
    if len > sample_window {
        &series[len - sample_window..]
    } else {
        series
    }
}
