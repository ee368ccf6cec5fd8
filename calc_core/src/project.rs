//! # Project Data Structures
//!
//! A `Project` is an ordered list of buildings, one of which is current,
//! plus the unit system and advanced-mode flag the user is working in.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── name, created, modified
//! ├── units: UnitSystem
//! ├── show_advanced: bool
//! ├── current_building_index
//! └── buildings: Vec<Building>
//!     ├── id, name
//!     ├── inputs: InputDraft        (what the user has typed)
//!     └── results: Option<CalculationResult>
//! ```
//!
//! All mutation goes through the named transitions below. A project always
//! holds at least one building and `current_building_index` always points
//! at one of them.
//!
//! ## Building Lifecycle
//!
//! ```text
//! Empty --edit_inputs--> HasInputs --record_result--> HasResult
//!                                                    (edits keep the stale result
//!                                                     until the next calculation)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::project::{BuildingState, Project};
//! use calc_core::validation::InputDraft;
//!
//! let mut project = Project::new("Campus Expansion");
//! assert_eq!(project.current_building().name, "Building 1");
//!
//! project.edit_inputs(&InputDraft { floor_area: Some(8_000.0), ..InputDraft::default() });
//! assert_eq!(project.current_building().state(), BuildingState::HasInputs);
//!
//! project.add_building();
//! assert_eq!(project.current_building_index(), 1);
//! assert_eq!(project.current_building().state(), BuildingState::Empty);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::CalculationResult;
use crate::errors::{CalcError, CalcResult};
use crate::units::UnitSystem;
use crate::validation::InputDraft;

/// Name shown when the user has not named the project
pub const UNTITLED_PROJECT: &str = "Untitled Project";

/// Where a building is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingState {
    Empty,
    HasInputs,
    HasResult,
}

/// One building within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: Uuid,

    pub name: String,

    /// Stored form values
    #[serde(default)]
    pub inputs: InputDraft,

    /// Most recent successful calculation
    #[serde(default)]
    pub results: Option<CalculationResult>,
}

impl Building {
    /// Create an empty building
    pub fn new(name: impl Into<String>) -> Self {
        Building {
            id: Uuid::new_v4(),
            name: name.into(),
            inputs: InputDraft::default(),
            results: None,
        }
    }

    /// Derived lifecycle state
    pub fn state(&self) -> BuildingState {
        if self.results.is_some() {
            BuildingState::HasResult
        } else if !self.inputs.is_empty() {
            BuildingState::HasInputs
        } else {
            BuildingState::Empty
        }
    }
}

/// Root project container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProjectRecord")]
pub struct Project {
    /// User-entered project name (may be empty)
    pub name: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,

    /// Unit system for entry and display
    pub units: UnitSystem,

    /// Advanced mode (door width, total exit width)
    pub show_advanced: bool,

    current_building_index: usize,

    buildings: Vec<Building>,
}

impl Project {
    /// Create a project with a single empty building.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            name: name.into(),
            created: now,
            modified: now,
            units: UnitSystem::default(),
            show_advanced: false,
            current_building_index: 0,
            buildings: vec![Building::new("Building 1")],
        }
    }

    /// Rebuild a project from stored parts, repairing an out-of-range index
    /// and an empty building list.
    pub fn from_parts(
        name: impl Into<String>,
        buildings: Vec<Building>,
        current_building_index: usize,
        units: UnitSystem,
        show_advanced: bool,
    ) -> Self {
        let mut project = Project::new(name);
        if !buildings.is_empty() {
            project.current_building_index = current_building_index.min(buildings.len() - 1);
            project.buildings = buildings;
        }
        project.units = units;
        project.show_advanced = show_advanced;
        project
    }

    /// Name for display, falling back to "Untitled Project"
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNTITLED_PROJECT
        } else {
            &self.name
        }
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }

    pub fn current_building_index(&self) -> usize {
        self.current_building_index
    }

    /// 1-based position of the current building
    pub fn current_building_ordinal(&self) -> usize {
        self.current_building_index + 1
    }

    pub fn current_building(&self) -> &Building {
        &self.buildings[self.current_building_index]
    }

    fn current_building_mut(&mut self) -> &mut Building {
        &mut self.buildings[self.current_building_index]
    }

    /// Append an empty building and make it current. Returns its index.
    pub fn add_building(&mut self) -> usize {
        let name = format!("Building {}", self.buildings.len() + 1);
        self.buildings.push(Building::new(name));
        self.current_building_index = self.buildings.len() - 1;
        self.touch();
        self.current_building_index
    }

    /// Make another building current.
    ///
    /// Form edits are written to the current building as they happen, so the
    /// outgoing building's inputs are already stored; the returned building's
    /// inputs are what the form should show next.
    pub fn select_building(&mut self, index: usize) -> CalcResult<&Building> {
        if index >= self.buildings.len() {
            return Err(CalcError::BuildingNotFound {
                index,
                count: self.buildings.len(),
            });
        }
        self.current_building_index = index;
        Ok(self.current_building())
    }

    /// Move to the next building. Returns false at the end of the list.
    pub fn next_building(&mut self) -> bool {
        if self.current_building_index + 1 < self.buildings.len() {
            self.current_building_index += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous building. Returns false at the start of the list.
    pub fn previous_building(&mut self) -> bool {
        if self.current_building_index > 0 {
            self.current_building_index -= 1;
            true
        } else {
            false
        }
    }

    /// Remove a building. The last remaining building cannot be removed.
    pub fn remove_building(&mut self, index: usize) -> CalcResult<Building> {
        if index >= self.buildings.len() {
            return Err(CalcError::BuildingNotFound {
                index,
                count: self.buildings.len(),
            });
        }
        if self.buildings.len() == 1 {
            return Err(CalcError::invalid_input(
                "building",
                index.to_string(),
                "A project must keep at least one building",
            ));
        }

        let removed = self.buildings.remove(index);
        if index < self.current_building_index || self.current_building_index >= self.buildings.len() {
            self.current_building_index -= 1;
        }
        self.touch();
        Ok(removed)
    }

    /// Overlay user edits onto the current building's inputs.
    ///
    /// A stored result is left in place until the next calculation.
    pub fn edit_inputs(&mut self, changes: &InputDraft) {
        self.current_building_mut().inputs.merge(changes);
        self.touch();
    }

    /// Store a successful calculation on the current building, replacing
    /// any previous result.
    pub fn record_result(&mut self, result: CalculationResult) {
        self.current_building_mut().results = Some(result);
        self.touch();
    }

    /// Rename a building by index
    pub fn rename_building(&mut self, index: usize, name: impl Into<String>) -> CalcResult<()> {
        let count = self.buildings.len();
        let building = self
            .buildings
            .get_mut(index)
            .ok_or(CalcError::BuildingNotFound { index, count })?;
        building.name = name.into();
        self.touch();
        Ok(())
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn set_units(&mut self, units: UnitSystem) {
        self.units = units;
        self.touch();
    }

    /// Flip between imperial and metric. Returns the new system.
    pub fn toggle_units(&mut self) -> UnitSystem {
        self.set_units(self.units.toggled());
        self.units
    }

    pub fn set_show_advanced(&mut self, show: bool) {
        self.show_advanced = show;
        self.touch();
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("")
    }
}

/// Serialized form of a `Project`, checked before it becomes one.
#[derive(Deserialize)]
struct ProjectRecord {
    name: String,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
    #[serde(default)]
    units: UnitSystem,
    #[serde(default)]
    show_advanced: bool,
    #[serde(default)]
    current_building_index: usize,
    #[serde(default)]
    buildings: Vec<Building>,
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        let mut project = Project::from_parts(
            record.name,
            record.buildings,
            record.current_building_index,
            record.units,
            record.show_advanced,
        );
        project.created = record.created;
        project.modified = record.modified;
        project
    }
}
