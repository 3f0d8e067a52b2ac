use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single observation of the input series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub date: NaiveDate,
    /// Price in integer currency units
    pub price: i64,
}

impl Sample {
    pub fn new(date: NaiveDate, price: i64) -> Self {
        Self { date, price }
    }
}

/// Which side of the market an extremum belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtremumKind {
    /// Local maxima, the resistance candidates
    High,
    /// Local minima, the support candidates
    Low,
}

impl ExtremumKind {
    pub fn level_type(self) -> LevelType {
        match self {
            ExtremumKind::High => LevelType::Resistance,
            ExtremumKind::Low => LevelType::Support,
        }
    }
}

/// A local extremum of the analysed window.
///
/// Candidates are plain values: every pipeline stage returns a new list and
/// never touches the list it was given. `index` points into the window the
/// candidate was detected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'s> {
    pub index: usize,
    pub sample: &'s Sample,
    pub recurrence_count: usize,
}

impl<'s> Candidate<'s> {
    pub fn new(index: usize, sample: &'s Sample) -> Self {
        Self {
            index,
            sample,
            recurrence_count: 0,
        }
    }

    pub fn price(&self) -> i64 {
        self.sample.price
    }

    pub fn date(&self) -> NaiveDate {
        self.sample.date
    }

    pub fn with_recurrence_count(self, recurrence_count: usize) -> Self {
        Self {
            recurrence_count,
            ..self
        }
    }

    pub fn to_level(&self, level_type: LevelType) -> SupportResistanceLevel {
        SupportResistanceLevel {
            date: self.date(),
            price: self.price(),
            strength: self.recurrence_count,
            level_type,
        }
    }
}

/// Represents a detected support/resistance level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportResistanceLevel {
    /// Date of the extremum that represents the level
    pub date: NaiveDate,
    pub price: i64,
    /// Number of similar extrema the level absorbed
    pub strength: usize,
    pub level_type: LevelType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelType {
    Support,
    Resistance,
}

/// Final output of a detection run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub resistance: Vec<SupportResistanceLevel>,
    pub support: Vec<SupportResistanceLevel>,
}

impl Detection {
    pub fn is_empty(&self) -> bool {
        self.resistance.is_empty() && self.support.is_empty()
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Every intermediate list produced for one extremum kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTrace<'s> {
    pub kind: ExtremumKind,
    /// Local extrema, before any counting
    pub candidates: Vec<Candidate<'s>>,
    /// Extrema annotated with their recurrence counts
    pub counted: Vec<Candidate<'s>>,
    /// One representative per price neighbourhood
    pub reduced: Vec<Candidate<'s>>,
    /// Representatives that passed the minority filter
    pub filtered: Vec<Candidate<'s>>,
}

impl<'s> StageTrace<'s> {
    pub fn levels(&self) -> Vec<SupportResistanceLevel> {
        let level_type = self.kind.level_type();
        self.filtered
            .iter()
            .map(|c| c.to_level(level_type))
            .collect()
    }
}

/// Stage outputs of both pipelines over one window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionTrace<'s> {
    /// The truncated series both pipelines ran on
    pub window: &'s [Sample],
    pub resistance: StageTrace<'s>,
    pub support: StageTrace<'s>,
}

impl<'s> DetectionTrace<'s> {
    pub fn into_detection(self) -> Detection {
        Detection {
            resistance: self.resistance.levels(),
            support: self.support.levels(),
        }
    }
}
