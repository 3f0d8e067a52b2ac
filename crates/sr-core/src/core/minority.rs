use crate::models::Candidate;

/// Drop every candidate whose recurrence count is below `threshold`
pub fn cut_minor<'s>(candidates: &[Candidate<'s>], threshold: usize) -> Vec<Candidate<'s>> {
    candidates
        .iter()
        .filter(|c| c.recurrence_count >= threshold)
        .copied()
        .collect()
}
