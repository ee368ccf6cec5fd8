//! # Calculation History
//!
//! Append-only log of successful calculations, newest first, capped at the
//! configured limit (50 by default). The log belongs to the session, not to
//! any project, so it survives "new project" and imports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{CalculationInput, CalculationResult};
use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::units::UnitSystem;

/// The figures worth keeping from a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub occupant_load: u32,
    pub stair_width_in: u32,
    pub other_width_in: u32,
    pub door_width_in: Option<u32>,
    pub total_exit_width_in: Option<u32>,
}

impl From<&CalculationResult> for ResultSummary {
    fn from(result: &CalculationResult) -> Self {
        ResultSummary {
            occupant_load: result.occupant_load,
            stair_width_in: result.stair_width_in,
            other_width_in: result.other_width_in,
            door_width_in: result.door_width_in,
            total_exit_width_in: result.total_exit_width_in,
        }
    }
}

/// One logged calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub project_name: String,
    /// 1-based building position at the time of the calculation
    pub building_ordinal: usize,
    pub input: CalculationInput,
    pub summary: ResultSummary,
    /// Unit system in effect when the entry was made
    pub units: UnitSystem,
}

impl HistoryEntry {
    /// Build an entry stamped with the current time.
    pub fn new(project_name: impl Into<String>, building_ordinal: usize, result: &CalculationResult) -> Self {
        HistoryEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            project_name: project_name.into(),
            building_ordinal,
            input: result.input.clone(),
            summary: ResultSummary::from(result),
            units: result.input.units,
        }
    }

    /// "Campus - Building 2 (2025-03-01 14:05)"
    pub fn title(&self) -> String {
        format!(
            "{} - Building {} ({})",
            self.project_name,
            self.building_ordinal,
            self.timestamp.format("%Y-%m-%d %H:%M")
        )
    }
}

/// Newest-first, bounded history log.
///
/// Persisted as a plain list of entries; the limit comes from config.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationHistory {
    entries: Vec<HistoryEntry>,
    limit: usize,
}

impl CalculationHistory {
    pub fn new(limit: usize) -> Self {
        CalculationHistory {
            entries: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Wrap stored entries, trimming anything past the limit.
    pub fn from_entries(mut entries: Vec<HistoryEntry>, limit: usize) -> Self {
        let limit = limit.max(1);
        entries.truncate(limit);
        CalculationHistory { entries, limit }
    }

    /// Put an entry at the front, evicting the oldest past the limit.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.limit);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries, newest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Up to `n` newest entries
    pub fn recent(&self, n: usize) -> &[HistoryEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the cap, trimming immediately if it shrank.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.entries.truncate(self.limit);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CalculationHistory {
    fn default() -> Self {
        CalculationHistory::new(DEFAULT_HISTORY_LIMIT)
    }
}
