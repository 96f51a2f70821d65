//! Completion records and scoring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base points for solving any level.
pub const BASE_POINTS: u32 = 100;
/// Extra points per level number.
pub const POINTS_PER_LEVEL: u32 = 50;

/// Points awarded for solving `level`: `100 + level * 50`.
pub fn completion_bonus(level: u32) -> u32 {
    BASE_POINTS.saturating_add(level.saturating_mul(POINTS_PER_LEVEL))
}

/// One solved level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRecord {
    /// Level number.
    pub level: u32,
    /// Scenario title at the time it was solved.
    pub title: String,
    /// Points awarded.
    pub points: u32,
    /// When the level was solved.
    pub completed_at: DateTime<Utc>,
}

impl LevelRecord {
    /// Record `level` as solved now.
    pub fn now(level: u32, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            points: completion_bonus(level),
            completed_at: Utc::now(),
        }
    }
}

/// Chronological list of solved levels for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    records: Vec<LevelRecord>,
}

impl Scorecard {
    /// Create an empty scorecard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a solved level.
    pub fn push(&mut self, record: LevelRecord) {
        self.records.push(record);
    }

    /// All records, in the order the levels were solved.
    pub fn records(&self) -> &[LevelRecord] {
        &self.records
    }

    /// Sum of awarded points.
    pub fn total(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.points)).sum()
    }

    /// Number of solved levels.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no level has been solved.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
