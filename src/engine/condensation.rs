use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ensure_finite, EnvelopeError};

/// Interior surface resistance used for the surface temperature (m²K/W)
pub const INTERIOR_SURFACE_RESISTANCE: f64 = 0.13;
/// Magnus coefficient b (dimensionless)
pub const MAGNUS_B: f64 = 17.62;
/// Magnus coefficient c (°C)
pub const MAGNUS_C: f64 = 243.12;

/// Normative interior design conditions for the surface check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CondensationDefaults {
    /// Interior air temperature (°C)
    pub interior_temp_c: f64,
    /// Interior relative humidity (%)
    pub interior_rh_percent: f64,
}

impl Default for CondensationDefaults {
    fn default() -> Self {
        Self {
            interior_temp_c: 19.0,
            interior_rh_percent: 75.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CondensationReading {
    /// Interior surface temperature Tsi (°C)
    pub interior_surface_temp_c: f64,
    /// Dew point of the interior air (°C)
    pub dew_point_temp_c: f64,
    /// Tsi - Tdp; negative or zero means condensation
    pub margin_c: f64,
    pub risk: bool,
}

impl CondensationReading {
    pub fn recommendation(&self) -> Option<&'static str> {
        self.risk.then_some(
            "increase the element insulation or reduce thermal bridges",
        )
    }
}

/// Dew point of air at `temp_c` and relative humidity `rh_percent` (Magnus).
///
/// `rh_percent` must lie in (0, 100].
pub fn dew_point(temp_c: f64, rh_percent: f64) -> Result<f64, EnvelopeError> {
    ensure_finite("interior_temp_c", temp_c)?;
    ensure_finite("interior_rh_percent", rh_percent)?;
    if rh_percent <= 0.0 || rh_percent > 100.0 {
        return Err(EnvelopeError::Domain(format!(
            "relative humidity must be in (0, 100], got {}",
            rh_percent
        )));
    }
    if temp_c <= -MAGNUS_C {
        return Err(EnvelopeError::Domain(format!(
            "temperature {} °C is below the Magnus formula range",
            temp_c
        )));
    }

    let gamma = MAGNUS_B * temp_c / (MAGNUS_C + temp_c) + (rh_percent / 100.0).ln();
    Ok(MAGNUS_C * gamma / (MAGNUS_B - gamma))
}

/// Tsi = Ti - U·Rsi·(Ti - Te)
pub fn interior_surface_temperature(
    interior_temp_c: f64,
    exterior_temp_c: f64,
    element_u: f64,
) -> f64 {
    interior_temp_c - element_u * INTERIOR_SURFACE_RESISTANCE * (interior_temp_c - exterior_temp_c)
}

/// Surface condensation check of one element.
pub fn analyze(
    interior_temp_c: f64,
    interior_rh_percent: f64,
    exterior_temp_c: f64,
    element_u: f64,
) -> Result<CondensationReading, EnvelopeError> {
    ensure_finite("exterior_temp_c", exterior_temp_c)?;
    ensure_finite("element_u", element_u)?;
    if element_u < 0.0 {
        return Err(EnvelopeError::InvalidInput(format!(
            "element U must not be negative, got {}",
            element_u
        )));
    }
    let dew_point_temp_c = dew_point(interior_temp_c, interior_rh_percent)?;
    let interior_surface_temp_c =
        interior_surface_temperature(interior_temp_c, exterior_temp_c, element_u);
    let margin_c = interior_surface_temp_c - dew_point_temp_c;
    let risk = interior_surface_temp_c <= dew_point_temp_c;

    debug!(
        interior_temp_c,
        interior_rh_percent,
        exterior_temp_c,
        element_u,
        interior_surface_temp_c,
        dew_point_temp_c,
        risk,
        "analyzed surface condensation"
    );

    Ok(CondensationReading {
        interior_surface_temp_c,
        dew_point_temp_c,
        margin_c,
        risk,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_reference_scenario() {
        let reading = analyze(20.0, 75.0, 5.0, 1.8).unwrap();
        assert!((reading.interior_surface_temp_c - 16.49).abs() < 1e-9);
        assert!((reading.dew_point_temp_c - 15.4).abs() < 0.1);
        assert!(reading.margin_c > 0.0);
        assert!(!reading.risk);
        assert_eq!(reading.recommendation(), None);
    }

    #[test]
    fn test_poor_element_condenses() {
        let reading = analyze(19.0, 75.0, 0.0, 5.8).unwrap();
        assert!(reading.risk);
        assert!(reading.margin_c <= 0.0);
        assert!(reading.recommendation().is_some());
    }

    #[test]
    fn test_saturated_air_dew_point_equals_air_temperature() {
        for temp in [-10.0, 0.0, 19.0, 35.0] {
            let tdp = dew_point(temp, 100.0).unwrap();
            assert!((tdp - temp).abs() < 1e-9, "temp {}", temp);
        }
    }

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    #[case(100.5)]
    #[case(f64::NAN)]
    fn test_humidity_outside_domain(#[case] rh: f64) {
        assert!(analyze(20.0, rh, 5.0, 1.0).is_err());
    }

    #[test]
    fn test_humidity_domain_error_kind() {
        assert!(matches!(analyze(20.0, 0.0, 5.0, 1.0), Err(EnvelopeError::Domain(_))));
        assert!(matches!(analyze(20.0, 101.0, 5.0, 1.0), Err(EnvelopeError::Domain(_))));
    }

    #[test]
    fn test_zero_u_keeps_surface_at_air_temperature() {
        assert_eq!(interior_surface_temperature(19.0, -5.0, 0.0), 19.0);
    }

    #[test]
    fn test_defaults() {
        let defaults = CondensationDefaults::default();
        assert_eq!(defaults.interior_temp_c, 19.0);
        assert_eq!(defaults.interior_rh_percent, 75.0);
    }

    proptest! {
        #[test]
        fn prop_dew_point_not_above_air_temperature(temp in -30.0f64..40.0, rh in 1.0f64..100.0) {
            let tdp = dew_point(temp, rh).unwrap();
            prop_assert!(tdp <= temp + 1e-9);
        }
    }
}
