//! Vapor pressure and absolute humidity.
//!
//! Saturation vapor pressure uses the Tetens form (kPa) for VPD and the
//! Magnus form (hPa) for absolute humidity. Both results are rounded to
//! two decimals.

// Tetens coefficients, saturation pressure in kPa.
const SVP_A_KPA: f64 = 0.61078;
const SVP_B: f64 = 17.27;
const SVP_C: f64 = 237.3;

// Magnus coefficients, saturation pressure in hPa.
const MAGNUS_A_HPA: f64 = 6.112;
const MAGNUS_B: f64 = 17.67;
const MAGNUS_C: f64 = 243.5;

/// Water-vapor gas constant folded with the hPa→Pa and kg→g conversions.
const AH_FACTOR: f64 = 2.1674;
const KELVIN_OFFSET: f64 = 273.15;

/// Temperature (°C) at which the Tetens denominator is zero.
pub const SVP_POLE_C: f64 = -SVP_C;
/// Temperature (°C) at which the Magnus denominator is zero.
pub const AH_POLE_C: f64 = -MAGNUS_C;

/// Round half away from zero to two decimals.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Saturation vapor pressure (kPa), unrounded.
pub fn saturation_vapor_pressure_kpa(temperature_c: f64) -> f64 {
    SVP_A_KPA * ((SVP_B * temperature_c) / (temperature_c + SVP_C)).exp()
}

/// Vapor-pressure deficit (kPa), rounded to 2 decimals.
///
/// Undefined at [`SVP_POLE_C`]; callers validate samples first.
pub fn vpd_kpa(temperature_c: f64, humidity_pct: f64) -> f64 {
    let svp = saturation_vapor_pressure_kpa(temperature_c);
    round2(svp * (1.0 - humidity_pct / 100.0))
}

/// Absolute humidity (g/m³), rounded to 2 decimals.
///
/// Undefined at [`AH_POLE_C`].
pub fn absolute_humidity_g_m3(temperature_c: f64, humidity_pct: f64) -> f64 {
    let e_sat = MAGNUS_A_HPA * ((MAGNUS_B * temperature_c) / (temperature_c + MAGNUS_C)).exp();
    round2((e_sat * humidity_pct * AH_FACTOR) / (KELVIN_OFFSET + temperature_c))
}
