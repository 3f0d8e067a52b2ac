use crate::models::Candidate;
use crate::utils::similarity_band;

/// Collapse each price neighbourhood to a single representative.
///
/// Candidates are visited in list order. A candidate that still has a
/// non-zero count claims its band: every other candidate with a non-zero
/// count whose price lies in that band is suppressed (count forced to 0).
/// Suppressed candidates are dropped and survivors keep their clustering
/// count, so the result depends on the order of the input list.
pub fn reduce_dominant<'s>(candidates: &[Candidate<'s>], tolerance: f64) -> Vec<Candidate<'s>> {
    let mut counts: Vec<usize> = candidates.iter().map(|c| c.recurrence_count).collect();

    for (i, candidate) in candidates.iter().enumerate() {
        if counts[i] == 0 {
            continue;
        }

        let band = similarity_band(candidate.price(), tolerance);
        for (j, other) in candidates.iter().enumerate() {
            if i != j && counts[j] > 0 && band.contains(other.price()) {
                counts[j] = 0;
            }
        }
    }

    candidates
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(candidate, _)| *candidate)
        .collect()
}
