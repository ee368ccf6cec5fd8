//! # Egress Width
//!
//! Required clear widths for means-of-egress components (IBC 1005.3) and
//! the per-door split used in advanced mode (IBC 1010.1.1).
//!
//! All widths are whole inches, each rounded up independently. Metric is a
//! display concern handled by [`crate::units::format_width`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::egress_factors::lookup_egress_factors;
use crate::errors::{CalcError, CalcResult};

/// Minimum clear door width in inches (IBC 1010.1.1).
pub const MIN_DOOR_WIDTH_IN: u32 = 32;

/// Required widths for stairs and for all other egress components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EgressWidths {
    /// Stairway width (in)
    pub stair_in: u32,
    /// Width of doors, ramps, corridors and other components (in)
    pub other_in: u32,
}

fn ceil_width(occupant_load: u32, in_per_occupant: f64) -> u32 {
    (f64::from(occupant_load) * in_per_occupant).ceil() as u32
}

/// Widths = ceil(load × factor) for the stair and other factor.
///
/// # Example
///
/// ```rust
/// use calc_core::calculations::egress::egress_widths;
///
/// let widths = egress_widths(67, true);
/// assert_eq!(widths.stair_in, 14);
/// assert_eq!(widths.other_in, 11);
/// ```
pub fn egress_widths(occupant_load: u32, sprinklered: bool) -> EgressWidths {
    let factors = lookup_egress_factors(sprinklered);
    let widths = EgressWidths {
        stair_in: ceil_width(occupant_load, factors.stair_in_per_occupant),
        other_in: ceil_width(occupant_load, factors.other_in_per_occupant),
    };
    debug!(occupant_load, sprinklered, stair_in = widths.stair_in, other_in = widths.other_in, "egress widths");
    widths
}

/// Total required exit width: the "other components" width.
pub fn total_exit_width(occupant_load: u32, sprinklered: bool) -> u32 {
    egress_widths(occupant_load, sprinklered).other_in
}

/// Minimum width of each exit door.
///
/// The total exit width is split evenly across `exit_doors`, rounded up,
/// then raised to [`MIN_DOOR_WIDTH_IN`].
///
/// # Errors
///
/// `InvalidInput` when `exit_doors` is zero.
///
/// # Example
///
/// ```rust
/// use calc_core::calculations::egress::door_width;
///
/// // 11 in total over 2 doors = 6 in each, raised to the 32 in minimum
/// assert_eq!(door_width(67, 2, true).unwrap(), 32);
/// ```
pub fn door_width(occupant_load: u32, exit_doors: u32, sprinklered: bool) -> CalcResult<u32> {
    if exit_doors < 1 {
        return Err(CalcError::invalid_input(
            "exit_doors",
            exit_doors.to_string(),
            "At least one exit door is required",
        ));
    }

    let total = total_exit_width(occupant_load, sprinklered);
    let per_door = total.div_ceil(exit_doors);
    Ok(per_door.max(MIN_DOOR_WIDTH_IN))
}
