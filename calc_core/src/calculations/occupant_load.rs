//! # Occupant Load
//!
//! IBC 1004.5: the design occupant load is the floor area divided by the
//! tabulated area per occupant, rounded up.

use tracing::debug;

use crate::errors::{CalcError, CalcResult};

/// Occupant load = ceil(area / load_factor).
///
/// `area` and `load_factor` must be in the same unit system (both sq. ft.
/// or both sq. m). Always rounds up, so a fractional person counts as one.
///
/// # Errors
///
/// `InvalidInput` if either argument is non-positive or non-finite, or if
/// the load does not fit in a `u32`.
///
/// # Example
///
/// ```rust
/// use calc_core::calculations::occupant_load::occupant_load;
///
/// assert_eq!(occupant_load(10_000.0, 150.0).unwrap(), 67);
/// assert_eq!(occupant_load(150.0, 150.0).unwrap(), 1);
/// assert!(occupant_load(0.0, 150.0).is_err());
/// ```
pub fn occupant_load(area: f64, load_factor: f64) -> CalcResult<u32> {
    if !area.is_finite() || area <= 0.0 {
        return Err(CalcError::invalid_input(
            "floor_area",
            area.to_string(),
            "Floor area must be a positive number",
        ));
    }
    if !load_factor.is_finite() || load_factor <= 0.0 {
        return Err(CalcError::invalid_input(
            "occupant_load_factor",
            load_factor.to_string(),
            "Load factor must be a positive number",
        ));
    }

    let load = (area / load_factor).ceil();
    if load > f64::from(u32::MAX) {
        return Err(CalcError::invalid_input(
            "floor_area",
            area.to_string(),
            "Occupant load is too large to represent",
        ));
    }

    debug!(area, load_factor, load, "occupant load");
    Ok(load as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_up() {
        assert_eq!(occupant_load(10_000.0, 150.0).unwrap(), 67);
        assert_eq!(occupant_load(151.0, 150.0).unwrap(), 2);
        assert_eq!(occupant_load(0.5, 150.0).unwrap(), 1);
    }

    #[test]
    fn test_exact_division() {
        assert_eq!(occupant_load(300.0, 15.0).unwrap(), 20);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(occupant_load(0.0, 150.0).is_err());
        assert!(occupant_load(-10.0, 150.0).is_err());
        assert!(occupant_load(100.0, 0.0).is_err());
        assert!(occupant_load(100.0, -1.0).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(occupant_load(f64::NAN, 150.0).is_err());
        assert!(occupant_load(f64::INFINITY, 150.0).is_err());
        assert!(occupant_load(100.0, f64::NAN).is_err());
    }
}
