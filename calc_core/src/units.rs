//! # Unit Types and Conversion
//!
//! Imperial/metric handling for the three quantity kinds the calculator
//! deals with: floor area, travel distance (length) and egress width.
//!
//! ## Internal Units
//!
//! Load factors are stored in square feet per occupant and every width is
//! computed in whole inches. Metric only exists at the edges: the floor area
//! a user types in square meters, a load factor converted on lookup, and
//! widths rendered as millimeters for display.
//!
//! ## Conversion Constants
//!
//! Each quantity kind carries a forward and an inverse factor. The pairs are
//! the legacy values used by earlier releases of the calculator and are NOT
//! exact reciprocals (`0.092903 * 10.7639 = 0.99999...`). They are kept
//! verbatim so stored results and printed reports stay bit-for-bit
//! reproducible; a round trip lands within 0.01% of the starting value.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{convert, format_width, Direction, QuantityKind, UnitSystem};
//!
//! let m2 = convert(150.0, QuantityKind::Area, Direction::ToMetric);
//! assert!((m2 - 13.93545).abs() < 1e-9);
//!
//! assert_eq!(format_width(32, UnitSystem::Metric), "813 mm");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Unit System
// ============================================================================

/// Measurement system in effect for user-entered values and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

impl UnitSystem {
    /// The other system
    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Imperial => UnitSystem::Metric,
            UnitSystem::Metric => UnitSystem::Imperial,
        }
    }

    /// Label for floor areas ("sq. ft." / "sq. m")
    pub fn area_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "sq. ft.",
            UnitSystem::Metric => "sq. m",
        }
    }

    /// Label for travel distances ("ft" / "m")
    pub fn distance_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "ft",
            UnitSystem::Metric => "m",
        }
    }

    /// Label for egress widths ("inches" / "mm")
    pub fn width_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "inches",
            UnitSystem::Metric => "mm",
        }
    }

    /// Parse "imperial"/"metric" (and common abbreviations)
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "imperial" | "us" | "ft" | "i" => Ok(UnitSystem::Imperial),
            "metric" | "si" | "m" => Ok(UnitSystem::Metric),
            other => Err(CalcError::invalid_input(
                "units",
                other,
                "Units must be 'imperial' or 'metric'",
            )),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Imperial => write!(f, "Imperial"),
            UnitSystem::Metric => write!(f, "Metric"),
        }
    }
}

// ============================================================================
// Scalar Conversion
// ============================================================================

/// The physical quantity a scalar represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityKind {
    /// ft² <-> m²
    Area,
    /// ft <-> m
    Length,
    /// in <-> mm
    Width,
}

/// Conversion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    ToMetric,
    ToImperial,
}

/// ft² to m²
pub const SQFT_TO_SQM: f64 = 0.092903;
/// m² to ft²
pub const SQM_TO_SQFT: f64 = 10.7639;
/// ft to m
pub const FT_TO_M: f64 = 0.3048;
/// m to ft
pub const M_TO_FT: f64 = 3.28084;
/// in to mm
pub const IN_TO_MM: f64 = 25.4;
/// mm to in
pub const MM_TO_IN: f64 = 0.0393701;

impl QuantityKind {
    /// Multiplicative factor for a direction
    pub fn factor(self, direction: Direction) -> f64 {
        match (self, direction) {
            (QuantityKind::Area, Direction::ToMetric) => SQFT_TO_SQM,
            (QuantityKind::Area, Direction::ToImperial) => SQM_TO_SQFT,
            (QuantityKind::Length, Direction::ToMetric) => FT_TO_M,
            (QuantityKind::Length, Direction::ToImperial) => M_TO_FT,
            (QuantityKind::Width, Direction::ToMetric) => IN_TO_MM,
            (QuantityKind::Width, Direction::ToImperial) => MM_TO_IN,
        }
    }
}

/// Convert a scalar between imperial and metric.
///
/// A plain multiply by the stored factor; no rounding is applied.
pub fn convert(value: f64, kind: QuantityKind, direction: Direction) -> f64 {
    value * kind.factor(direction)
}

// ============================================================================
// Display Formatting
// ============================================================================

/// Insert thousands separators into the integer part of a formatted number.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, rest) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match rest.find('.') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}{}", sign, grouped, frac_part)
}

/// Format a computed width (always whole inches) in the active system.
///
/// Metric output rounds to the nearest millimeter.
pub fn format_width(width_in: u32, units: UnitSystem) -> String {
    match units {
        UnitSystem::Imperial => format!("{} inches", width_in),
        UnitSystem::Metric => {
            let mm = convert(f64::from(width_in), QuantityKind::Width, Direction::ToMetric).round();
            format!("{} mm", group_thousands(&format!("{:.0}", mm)))
        }
    }
}

/// Format a floor area, already expressed in the active system.
pub fn format_area(value: f64, units: UnitSystem) -> String {
    format!("{} {}", group_thousands(&format!("{:.2}", value)), units.area_label())
}
