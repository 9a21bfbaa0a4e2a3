//! Process-wide immutable constants (spec §6, §9 "Global state").
//!
//! Generalizes the teacher's `core.rs`/`common.rs` module constants, dropping the IP
//! branch (see DESIGN.md Open Questions) and keeping the altitude correlations from
//! `atmosphere.rs` as supplemented ambient functionality (SPEC_FULL §10.6).

/// Standard atmospheric pressure, Pa.
pub const STANDARD_ATMOSPHERE_PA: f64 = 101_325.0;

/// Standard dry-bulb temperature used when a caller doesn't supply one, °C.
pub const STANDARD_TEMPERATURE_C: f64 = 20.0;

/// Offset between 0 °C and absolute zero, K.
pub const ZERO_CELSIUS_AS_KELVIN: f64 = 273.15;

/// Ratio of the molecular mass of water vapour to dry air (dimensionless).
pub const MASS_RATIO_WATER_DRY_AIR: f64 = 0.621945;

/// Latent heat of vaporization of water at 0 °C, kJ/kg — the `r` term in specific
/// enthalpy of humid air (spec §3).
pub const LATENT_HEAT_VAPORIZATION_0C: f64 = 2501.0;

/// Specific gas constant for dry air, J/(kg·K).
pub const R_DA: f64 = 287.042;

/// Specific gas constant for water vapour, J/(kg·K).
pub const R_WV: f64 = 461.524;

/// Minimum humidity ratio any correlation will treat as nonzero (spec treats x ≥ 0,
/// but division by an exact zero blows up partial-pressure formulas).
pub const MIN_HUMIDITY_RATIO: f64 = 1e-7;

/// Default Brent accuracy (spec §4.2).
pub const DEFAULT_BRENT_ACCURACY: f64 = 1e-7;

/// Default Brent iteration cap (spec §4.2).
pub const DEFAULT_BRENT_MAX_ITER: usize = 100;

/// Default bracket-widening step (spec §4.2 "evaluation-diff").
pub const DEFAULT_BRENT_EVAL_DIFF: f64 = 1.0;

/// Default cap on bracket-widening attempts (spec §4.2 "max counter").
pub const DEFAULT_BRENT_MAX_COUNTER: usize = 100;

/// Validated temperature domain for dry air / water vapour / humid air, °C.
pub const T_MIN_C: f64 = -150.0;
pub const T_MAX_C: f64 = 1000.0;

/// Validated temperature domain for humid air dry-bulb, °C (spec §3, narrower window).
pub const T_HUMID_AIR_MIN_C: f64 = -150.0;
pub const T_HUMID_AIR_MAX_C: f64 = 200.0;

/// Validated temperature domain for liquid water, °C.
pub const T_LIQUID_WATER_MIN_C: f64 = 0.0;
pub const T_LIQUID_WATER_MAX_C: f64 = 200.0;

/// Minimum total pressure accepted for a HumidAir state, Pa (spec §3: P > 50 kPa).
pub const P_HUMID_AIR_MIN_PA: f64 = 50_000.0;

/// Gravitational acceleration, m/s^2 (U.S. Standard Atmosphere 1976).
const GRAVITY: f64 = 9.80665;
/// Molar mass of Earth's air, kg/mol (U.S. Standard Atmosphere 1976).
const MOLAR_MASS_AIR: f64 = 0.0289644;
/// Universal gas constant, J/(mol*K).
const GAS_CONSTANT: f64 = 8.31447;

/// Atmosphere temperature at a given altitude per U.S. Standard Atmosphere 1976, Eq (23).
///
/// Returns `NaN` outside the model's valid range (0-84852 m) rather than clamping,
/// consistent with the equation layer's error policy (spec §4.1).
pub fn atmosphere_temperature(altitude_m: f64) -> f64 {
    if !(0.0..=84852.0).contains(&altitude_m) {
        return f64::NAN;
    }
    match altitude_m {
        h if h <= 11000.0 => 15.0 - 0.0065 * h,
        h if h <= 20000.0 => -56.5,
        h if h <= 32000.0 => -56.5 + 0.001 * (h - 20000.0),
        h if h <= 47000.0 => -44.5 + 0.0028 * (h - 32000.0),
        h if h <= 51000.0 => -2.5,
        h if h <= 71000.0 => -2.5 - 0.0028 * (h - 51000.0),
        _ => -58.5,
    }
}

/// Atmospheric pressure at a given altitude per U.S. Standard Atmosphere 1976, Eq (33a, 33b).
pub fn atmosphere_pressure(altitude_m: f64) -> f64 {
    if !(0.0..=84852.0).contains(&altitude_m) {
        return f64::NAN;
    }
    match altitude_m {
        h if h <= 11000.0 => p_layer(h, 0.0, -0.0065, 15.0, STANDARD_ATMOSPHERE_PA),
        h if h <= 20000.0 => p_isothermal(h, 11000.0, -56.5, p_layer(11000.0, 0.0, -0.0065, 15.0, STANDARD_ATMOSPHERE_PA)),
        h if h <= 32000.0 => {
            let p_b = p_isothermal(11000.0, 11000.0, -56.5, p_layer(11000.0, 0.0, -0.0065, 15.0, STANDARD_ATMOSPHERE_PA));
            p_layer(h, 20000.0, 0.001, -56.5, p_b)
        }
        h if h <= 47000.0 => {
            let p_20 = p_isothermal(11000.0, 11000.0, -56.5, p_layer(11000.0, 0.0, -0.0065, 15.0, STANDARD_ATMOSPHERE_PA));
            let p_32 = p_layer(32000.0, 20000.0, 0.001, -56.5, p_20);
            p_layer(h, 32000.0, 0.0028, -44.5, p_32)
        }
        h if h <= 51000.0 => {
            let p_20 = p_isothermal(11000.0, 11000.0, -56.5, p_layer(11000.0, 0.0, -0.0065, 15.0, STANDARD_ATMOSPHERE_PA));
            let p_32 = p_layer(32000.0, 20000.0, 0.001, -56.5, p_20);
            let p_47 = p_layer(47000.0, 32000.0, 0.0028, -44.5, p_32);
            p_isothermal(h, 47000.0, -2.5, p_47)
        }
        h if h <= 71000.0 => {
            let p_20 = p_isothermal(11000.0, 11000.0, -56.5, p_layer(11000.0, 0.0, -0.0065, 15.0, STANDARD_ATMOSPHERE_PA));
            let p_32 = p_layer(32000.0, 20000.0, 0.001, -56.5, p_20);
            let p_47 = p_layer(47000.0, 32000.0, 0.0028, -44.5, p_32);
            let p_51 = p_isothermal(51000.0, 47000.0, -2.5, p_47);
            p_layer(h, 51000.0, -0.0028, -2.5, p_51)
        }
        h => {
            let p_20 = p_isothermal(11000.0, 11000.0, -56.5, p_layer(11000.0, 0.0, -0.0065, 15.0, STANDARD_ATMOSPHERE_PA));
            let p_32 = p_layer(32000.0, 20000.0, 0.001, -56.5, p_20);
            let p_47 = p_layer(47000.0, 32000.0, 0.0028, -44.5, p_32);
            let p_51 = p_isothermal(51000.0, 47000.0, -2.5, p_47);
            let p_71 = p_layer(71000.0, 51000.0, -0.0028, -2.5, p_51);
            p_isothermal(h, 71000.0, -58.5, p_71)
        }
    }
}

fn p_layer(altitude: f64, h_b: f64, lapse_rate: f64, t_base_c: f64, p_base: f64) -> f64 {
    let t_mb = t_base_c + ZERO_CELSIUS_AS_KELVIN;
    p_base
        * (t_mb / (t_mb + lapse_rate * (altitude - h_b)))
            .powf(GRAVITY * MOLAR_MASS_AIR / (GAS_CONSTANT * lapse_rate))
}

fn p_isothermal(altitude: f64, h_b: f64, t_base_c: f64, p_base: f64) -> f64 {
    let t_mb = t_base_c + ZERO_CELSIUS_AS_KELVIN;
    p_base * (-GRAVITY * MOLAR_MASS_AIR * (altitude - h_b) / (GAS_CONSTANT * t_mb)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn temperature_matches_reference_points() {
        assert_eq!(atmosphere_temperature(0.0), 15.0);
        assert_eq!(atmosphere_temperature(1000.0), 8.5);
        assert_eq!(atmosphere_temperature(11000.0), -56.5);
        assert!(atmosphere_temperature(-1.0).is_nan());
        assert!(atmosphere_temperature(84853.0).is_nan());
    }

    #[test]
    fn pressure_matches_reference_points() {
        assert_eq!(atmosphere_pressure(0.0), STANDARD_ATMOSPHERE_PA);
        assert_abs_diff_eq!(atmosphere_pressure(1000.0), 89.875e3, epsilon = 1.0);
        assert_abs_diff_eq!(atmosphere_pressure(11000.0), 22.632e3, epsilon = 1.0);
    }
}
