use crate::models::Candidate;
use crate::utils::similarity_band;

/// Annotate every candidate with the number of candidates in the list
/// (itself included) whose price falls inside its similarity band.
///
/// All-pairs over the candidate list; the input is left untouched.
pub fn count_similar<'s>(candidates: &[Candidate<'s>], tolerance: f64) -> Vec<Candidate<'s>> {
    candidates
        .iter()
        .map(|candidate| {
            let band = similarity_band(candidate.price(), tolerance);
            let count = candidates
                .iter()
                .filter(|other| band.contains(other.price()))
                .count();
            candidate.with_recurrence_count(count)
        })
        .collect()
}
