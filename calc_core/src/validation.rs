//! # Input Validation
//!
//! Turns an [`InputDraft`] (whatever the user has typed so far) into a
//! [`CalculationInput`] the engine can run.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. jurisdiction selected
//! 2. code version selected
//! 3. occupancy selected
//! 4. floor area positive and finite
//! 5. sprinkler status answered yes or no
//! 6. advanced mode: at least one exit door
//! 7. travel distance, if given, positive and finite
//! 8. the code version defines a factor for the occupancy
//!
//! A floor area above the plausibility ceiling is not a rejection. It comes
//! back as a [`SanityWarning`] on [`Validated`] and the caller decides whether
//! to ask the user before calculating.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::CalculationInput;
use crate::code_tables::{canonical_jurisdiction, CodeTable, CodeVersion, OccupancyClass};
use crate::config::CalculatorConfig;
use crate::errors::{CalcError, CalcResult};
use crate::units::{format_area, UnitSystem};

/// In-progress form values for one building. Every field may be unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputDraft {
    pub state: Option<String>,
    pub code_version: Option<CodeVersion>,
    pub occupancy: Option<OccupancyClass>,
    pub floor_area: Option<f64>,
    pub sprinklered: Option<bool>,
    pub travel_distance: Option<f64>,
    pub exit_doors: Option<u32>,
}

impl InputDraft {
    /// True when no field has been entered
    pub fn is_empty(&self) -> bool {
        *self == InputDraft::default()
    }

    /// Overlay every field set in `other` onto this draft.
    pub fn merge(&mut self, other: &InputDraft) {
        if other.state.is_some() {
            self.state = other.state.clone();
        }
        if other.code_version.is_some() {
            self.code_version = other.code_version;
        }
        if other.occupancy.is_some() {
            self.occupancy = other.occupancy;
        }
        if other.floor_area.is_some() {
            self.floor_area = other.floor_area;
        }
        if other.sprinklered.is_some() {
            self.sprinklered = other.sprinklered;
        }
        if other.travel_distance.is_some() {
            self.travel_distance = other.travel_distance;
        }
        if other.exit_doors.is_some() {
            self.exit_doors = other.exit_doors;
        }
    }
}

impl From<&CalculationInput> for InputDraft {
    fn from(input: &CalculationInput) -> Self {
        InputDraft {
            state: Some(input.state.clone()),
            code_version: Some(input.code_version),
            occupancy: Some(input.occupancy),
            floor_area: Some(input.floor_area),
            sprinklered: Some(input.sprinklered),
            travel_distance: input.travel_distance,
            exit_doors: input.exit_doors,
        }
    }
}

/// Floor area above the plausibility ceiling for the unit system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SanityWarning {
    pub floor_area: f64,
    pub ceiling: f64,
    pub units: UnitSystem,
}

impl fmt::Display for SanityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Floor area of {} exceeds {}. Please verify this is correct.",
            format_area(self.floor_area, self.units),
            format_area(self.ceiling, self.units)
        )
    }
}

/// Outcome of a successful validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub input: CalculationInput,
    /// Set when the area needs explicit confirmation before calculating
    pub sanity_warning: Option<SanityWarning>,
}

/// Pure ceiling check; no prompting.
pub fn exceeds_sanity_ceiling(floor_area: f64, units: UnitSystem, config: &CalculatorConfig) -> bool {
    floor_area > config.sanity_ceiling(units)
}

/// Validate a draft against the built-in IBC table.
pub fn validate(
    draft: &InputDraft,
    units: UnitSystem,
    advanced: bool,
    config: &CalculatorConfig,
) -> CalcResult<Validated> {
    validate_with_table(draft, units, advanced, config, CodeTable::standard())
}

/// Validate a draft against a specific factor table.
pub fn validate_with_table(
    draft: &InputDraft,
    units: UnitSystem,
    advanced: bool,
    config: &CalculatorConfig,
    table: &CodeTable,
) -> CalcResult<Validated> {
    let state = match draft.state.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => canonical_jurisdiction(s).map(str::to_string).unwrap_or_else(|| s.to_string()),
        _ => {
            return Err(CalcError::missing_field(
                "state",
                "Select the state or jurisdiction for code compliance",
            ))
        }
    };

    let code_version = draft
        .code_version
        .ok_or_else(|| CalcError::missing_field("code_version", "Select an IBC code version"))?;

    let occupancy = draft
        .occupancy
        .ok_or_else(|| CalcError::missing_field("occupancy", "Select an occupancy classification"))?;

    let floor_area = match draft.floor_area {
        Some(area) if area.is_finite() && area > 0.0 => area,
        Some(area) => {
            return Err(CalcError::invalid_input(
                "floor_area",
                area.to_string(),
                "Floor area must be greater than zero",
            ))
        }
        None => {
            return Err(CalcError::missing_field(
                "floor_area",
                format!("Enter the floor area in {}", units.area_label()),
            ))
        }
    };

    let sprinklered = draft.sprinklered.ok_or_else(|| {
        CalcError::missing_field(
            "sprinklered",
            "Specify whether the building has an automatic sprinkler system",
        )
    })?;

    if advanced {
        match draft.exit_doors {
            Some(doors) if doors >= 1 => {}
            other => {
                return Err(CalcError::invalid_input(
                    "exit_doors",
                    other.map(|d| d.to_string()).unwrap_or_else(|| "none".to_string()),
                    "Advanced mode needs at least one exit door",
                ))
            }
        }
    }

    // Zero means "not entered"
    let travel_distance = match draft.travel_distance {
        Some(d) if d == 0.0 => None,
        Some(d) if d.is_finite() && d > 0.0 => Some(d),
        Some(d) => {
            return Err(CalcError::invalid_input(
                "travel_distance",
                d.to_string(),
                "Travel distance must be a positive number",
            ))
        }
        None => None,
    };

    if !table.contains(code_version, occupancy) {
        return Err(CalcError::unsupported_combination(
            code_version.to_string(),
            occupancy.display_name(),
        ));
    }

    let sanity_warning = exceeds_sanity_ceiling(floor_area, units, config).then(|| SanityWarning {
        floor_area,
        ceiling: config.sanity_ceiling(units),
        units,
    });

    Ok(Validated {
        input: CalculationInput {
            state,
            code_version,
            occupancy,
            floor_area,
            sprinklered,
            travel_distance,
            exit_doors: if advanced { draft.exit_doors } else { None },
            units,
            advanced,
        },
        sanity_warning,
    })
}
