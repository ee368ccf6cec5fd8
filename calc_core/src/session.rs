//! # Session
//!
//! The application state container: the open [`Project`], the session-wide
//! [`CalculationHistory`] and the [`CalculatorConfig`] in effect.
//!
//! Front ends drive everything through the named transitions here and then
//! persist with [`crate::file_io::save_session`].
//!
//! ## Calculating
//!
//! [`Session::run_calculation`] validates the current building's draft,
//! calculates, stores the result on the building and logs it to history.
//! When the floor area trips the plausibility ceiling the caller's
//! `decide` callback chooses whether to go ahead; a cancel leaves the
//! project and history untouched.
//!
//! ```rust
//! use calc_core::code_tables::{CodeVersion, OccupancyClass};
//! use calc_core::config::CalculatorConfig;
//! use calc_core::session::{CalculationOutcome, SanityDecision, Session};
//! use calc_core::validation::InputDraft;
//!
//! let mut session = Session::new(CalculatorConfig::default());
//! session.edit_inputs(&InputDraft {
//!     state: Some("Texas".to_string()),
//!     code_version: Some(CodeVersion::Ibc2021),
//!     occupancy: Some(OccupancyClass::Business),
//!     floor_area: Some(10_000.0),
//!     sprinklered: Some(true),
//!     ..InputDraft::default()
//! });
//!
//! let outcome = session.run_calculation(|_| SanityDecision::Proceed).unwrap();
//! match outcome {
//!     CalculationOutcome::Completed(result) => assert_eq!(result.occupant_load, 67),
//!     CalculationOutcome::Cancelled(_) => unreachable!(),
//! }
//! assert_eq!(session.history.len(), 1);
//! ```

use chrono::Utc;
use tracing::info;

use crate::calculations::{calculate_with_table, CalculationResult};
use crate::code_tables::CodeTable;
use crate::config::CalculatorConfig;
use crate::errors::CalcResult;
use crate::file_io;
use crate::history::{CalculationHistory, HistoryEntry};
use crate::project::Project;
use crate::report::generate_calculation_summary;
use crate::validation::{validate_with_table, InputDraft, SanityWarning, Validated};

/// Caller's answer to a [`SanityWarning`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanityDecision {
    Proceed,
    Cancel,
}

/// What [`Session::run_calculation`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationOutcome {
    /// Result stored on the current building and logged to history
    Completed(CalculationResult),
    /// The user declined the warning; nothing changed
    Cancelled(SanityWarning),
}

/// Open project, history and configuration.
#[derive(Debug, Clone)]
pub struct Session {
    pub project: Project,
    pub history: CalculationHistory,
    config: CalculatorConfig,
}

impl Session {
    /// Fresh session: untitled project, empty history
    pub fn new(config: CalculatorConfig) -> Self {
        Session {
            project: Project::default(),
            history: CalculationHistory::new(config.history_limit),
            config,
        }
    }

    pub fn from_parts(project: Project, history: CalculationHistory, config: CalculatorConfig) -> Self {
        Session { project, history, config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Swap configuration, re-applying the history cap.
    pub fn set_config(&mut self, config: CalculatorConfig) {
        self.history.set_limit(config.history_limit);
        self.config = config;
    }

    /// Merge form edits into the current building.
    pub fn edit_inputs(&mut self, changes: &InputDraft) {
        self.project.edit_inputs(changes);
    }

    /// Validate the current building's draft without calculating.
    pub fn validate_current(&self) -> CalcResult<Validated> {
        self.validate_current_with_table(CodeTable::standard())
    }

    fn validate_current_with_table(&self, table: &CodeTable) -> CalcResult<Validated> {
        validate_with_table(
            &self.project.current_building().inputs,
            self.project.units,
            self.project.show_advanced,
            &self.config,
            table,
        )
    }

    /// Validate, calculate, store on the current building, log to history.
    pub fn run_calculation(&mut self, decide: impl FnOnce(&SanityWarning) -> SanityDecision) -> CalcResult<CalculationOutcome> {
        self.run_calculation_with_table(CodeTable::standard(), decide)
    }

    /// [`Session::run_calculation`] against a specific factor table.
    pub fn run_calculation_with_table(
        &mut self,
        table: &CodeTable,
        decide: impl FnOnce(&SanityWarning) -> SanityDecision,
    ) -> CalcResult<CalculationOutcome> {
        let validated = self.validate_current_with_table(table)?;

        if let Some(warning) = validated.sanity_warning {
            if decide(&warning) == SanityDecision::Cancel {
                info!(floor_area = warning.floor_area, "calculation cancelled at sanity warning");
                return Ok(CalculationOutcome::Cancelled(warning));
            }
        }

        let result = calculate_with_table(&validated.input, table)?;

        self.project.record_result(result.clone());
        self.history.record(HistoryEntry::new(
            self.project.display_name(),
            self.project.current_building_ordinal(),
            &result,
        ));

        info!(
            building = self.project.current_building_ordinal(),
            occupant_load = result.occupant_load,
            "calculation recorded"
        );
        Ok(CalculationOutcome::Completed(result))
    }

    /// Start over with a single empty building. Unit system, advanced mode
    /// and history carry over.
    pub fn new_project(&mut self, name: impl Into<String>) {
        let mut project = Project::new(name);
        project.units = self.project.units;
        project.show_advanced = self.project.show_advanced;
        self.project = project;
    }

    /// Make `project` the open project.
    pub fn replace_project(&mut self, project: Project) {
        info!(name = %project.display_name(), buildings = project.building_count(), "project opened");
        self.project = project;
    }

    /// Import an export document. The open project is only replaced when
    /// the whole document is valid.
    pub fn import_project(&mut self, json: &str) -> CalcResult<()> {
        let project = file_io::import_project(json, self.project.units, self.project.show_advanced)?;
        self.replace_project(project);
        Ok(())
    }

    /// Serialize the open project as an export document.
    pub fn export_project(&self) -> CalcResult<String> {
        file_io::export_project(&self.project)
    }

    /// Summary for the current building's stored result, if any.
    pub fn summary(&self) -> Option<String> {
        self.project
            .current_building()
            .results
            .as_ref()
            .map(|result| generate_calculation_summary(&self.project, result, Utc::now()))
    }

    /// Most recent history entries, up to the configured display count
    pub fn recent_history(&self) -> &[HistoryEntry] {
        self.history.recent(self.config.recent_history_display)
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(CalculatorConfig::default())
    }
}
