//! The level detection pipeline.
//!
//! Each stage is a pure function from one candidate list to the next:
//! [`window::truncate`] → [`extrema::find_local_extrema`] →
//! [`similarity::count_similar`] → [`dominance::reduce_dominant`] →
//! [`minority::cut_minor`]. [`support_resistance::SrDetector`] wires them
//! together for both extremum kinds.

pub mod dominance;
pub mod extrema;
pub mod minority;
pub mod similarity;
pub mod support_resistance;
pub mod window;
