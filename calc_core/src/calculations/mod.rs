//! # Egress Calculations
//!
//! Every calculation follows the same pattern:
//!
//! - [`CalculationInput`] - validated inputs (JSON-serializable)
//! - [`CalculationResult`] - derived figures plus a snapshot of the input
//! - [`calculate`] - pure function from one to the other
//!
//! The building-block formulas live in [`occupant_load`] and [`egress`] and
//! can be called on their own.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{calculate, CalculationInput};
//! use calc_core::code_tables::{CodeVersion, OccupancyClass};
//! use calc_core::units::UnitSystem;
//!
//! let input = CalculationInput {
//!     state: "Texas".to_string(),
//!     code_version: CodeVersion::Ibc2021,
//!     occupancy: OccupancyClass::Business,
//!     floor_area: 10_000.0,
//!     sprinklered: true,
//!     travel_distance: None,
//!     exit_doors: None,
//!     units: UnitSystem::Imperial,
//!     advanced: false,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.occupant_load, 67);
//! assert_eq!(result.stair_width_in, 14);
//! assert_eq!(result.other_width_in, 11);
//! assert!(result.door_width_in.is_none());
//! ```

pub mod egress;
pub mod occupant_load;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::code_tables::{AreaType, CodeTable, CodeVersion, OccupancyClass};
use crate::errors::CalcResult;
use crate::units::UnitSystem;

pub use egress::{door_width, egress_widths, total_exit_width, EgressWidths, MIN_DOOR_WIDTH_IN};
pub use occupant_load::occupant_load;

/// Validated calculation inputs.
///
/// `floor_area` and `travel_distance` are in the units named by `units`.
///
/// ## JSON Example
///
/// ```json
/// {
///   "state": "Texas",
///   "code_version": "2021",
///   "occupancy": "Business",
///   "floor_area": 10000.0,
///   "sprinklered": true,
///   "travel_distance": null,
///   "exit_doors": 2,
///   "units": "imperial",
///   "advanced": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// State or jurisdiction
    pub state: String,

    /// IBC edition
    pub code_version: CodeVersion,

    /// Occupancy classification
    pub occupancy: OccupancyClass,

    /// Floor area (sq. ft. or sq. m)
    pub floor_area: f64,

    /// Automatic sprinkler system present
    pub sprinklered: bool,

    /// Maximum exit access travel distance (ft or m), reported only
    #[serde(default)]
    pub travel_distance: Option<f64>,

    /// Number of exit doors, used in advanced mode
    #[serde(default)]
    pub exit_doors: Option<u32>,

    /// Unit system the area and distance were entered in
    #[serde(default)]
    pub units: UnitSystem,

    /// Advanced mode (door width and total exit width)
    #[serde(default)]
    pub advanced: bool,
}

/// Calculation results.
///
/// Widths are whole inches regardless of `input.units`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Design occupant load (persons)
    pub occupant_load: u32,

    /// Required stair width (in)
    pub stair_width_in: u32,

    /// Required width of other egress components (in)
    pub other_width_in: u32,

    /// Minimum width of each exit door (in); advanced mode only
    pub door_width_in: Option<u32>,

    /// Total required exit width (in); advanced mode only
    pub total_exit_width_in: Option<u32>,

    /// Area per occupant actually used, in `input.units`
    pub occupant_load_factor: f64,

    /// Whether the factor applies to gross or net area
    pub area_type: AreaType,

    /// The inputs this result was derived from
    pub input: CalculationInput,
}

/// Run a calculation against the built-in IBC table.
pub fn calculate(input: &CalculationInput) -> CalcResult<CalculationResult> {
    calculate_with_table(input, CodeTable::standard())
}

/// Run a calculation against a specific factor table.
///
/// Door width and total exit width are only produced when `input.advanced`
/// is set and at least one exit door is given; otherwise both are `None`.
pub fn calculate_with_table(input: &CalculationInput, table: &CodeTable) -> CalcResult<CalculationResult> {
    let (factor, area_type) = table.load_factor_for_units(input.code_version, input.occupancy, input.units)?;

    let load = occupant_load(input.floor_area, factor)?;
    let widths = egress_widths(load, input.sprinklered);

    let (door_width_in, total_exit_width_in) = match input.exit_doors {
        Some(doors) if input.advanced && doors >= 1 => (
            Some(door_width(load, doors, input.sprinklered)?),
            Some(total_exit_width(load, input.sprinklered)),
        ),
        _ => (None, None),
    };

    debug!(
        code_version = %input.code_version,
        occupancy = %input.occupancy,
        occupant_load = load,
        ?door_width_in,
        "calculation complete"
    );

    Ok(CalculationResult {
        occupant_load: load,
        stair_width_in: widths.stair_in,
        other_width_in: widths.other_in,
        door_width_in,
        total_exit_width_in,
        occupant_load_factor: factor,
        area_type,
        input: input.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn business_input() -> CalculationInput {
        CalculationInput {
            state: "Texas".to_string(),
            code_version: CodeVersion::Ibc2021,
            occupancy: OccupancyClass::Business,
            floor_area: 10_000.0,
            sprinklered: true,
            travel_distance: None,
            exit_doors: None,
            units: UnitSystem::Imperial,
            advanced: false,
        }
    }

    #[test]
    fn test_business_sprinklered() {
        let result = calculate(&business_input()).unwrap();
        assert_eq!(result.occupant_load, 67);
        assert_eq!(result.stair_width_in, 14);
        assert_eq!(result.other_width_in, 11);
        assert_eq!(result.occupant_load_factor, 150.0);
        assert_eq!(result.area_type, AreaType::Gross);
    }

    #[test]
    fn test_business_unsprinklered() {
        let mut input = business_input();
        input.sprinklered = false;
        let result = calculate(&input).unwrap();
        assert_eq!(result.occupant_load, 67);
        assert_eq!(result.stair_width_in, 21);
        assert_eq!(result.other_width_in, 14);
    }

    #[test]
    fn test_advanced_mode_door_width() {
        let mut input = business_input();
        input.advanced = true;
        input.exit_doors = Some(2);
        let result = calculate(&input).unwrap();
        assert_eq!(result.door_width_in, Some(32));
        assert_eq!(result.total_exit_width_in, Some(11));
    }

    #[test]
    fn test_door_count_ignored_outside_advanced_mode() {
        let mut input = business_input();
        input.exit_doors = Some(2);
        let result = calculate(&input).unwrap();
        assert_eq!(result.door_width_in, None);
        assert_eq!(result.total_exit_width_in, None);
    }

    #[test]
    fn test_advanced_mode_without_doors_reports_absent() {
        let mut input = business_input();
        input.advanced = true;
        let result = calculate(&input).unwrap();
        assert_eq!(result.door_width_in, None);
        assert_eq!(result.total_exit_width_in, None);
    }

    #[test]
    fn test_metric_area() {
        // 929.03 m² is 10,000 ft² under the legacy factor
        let mut input = business_input();
        input.units = UnitSystem::Metric;
        input.floor_area = 929.03;
        let result = calculate(&input).unwrap();
        assert_eq!(result.occupant_load, 67);
        assert!((result.occupant_load_factor - 13.93545).abs() < 1e-9);
        // widths stay in inches
        assert_eq!(result.stair_width_in, 14);
    }

    #[test]
    fn test_result_keeps_input_snapshot() {
        let input = business_input();
        let result = calculate(&input).unwrap();
        assert_eq!(result.input, input);
    }

    #[test]
    fn test_unsupported_combination() {
        let table = CodeTable::from_entries(std::iter::empty());
        let err = calculate_with_table(&business_input(), &table).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_COMBINATION");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let result = calculate(&business_input()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("\"code_version\": \"2021\""));
        let roundtrip: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, result);
    }
}
