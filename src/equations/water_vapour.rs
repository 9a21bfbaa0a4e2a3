//! `WaterVapourEquations` — saturation pressure and derived properties of water vapour.
//!
//! The piecewise Hyland-Wexler fit is carried over verbatim (SI branch only) from the
//! teacher's `saturated_water_vapor.rs`; the IP branch and the near-duplicate copy the
//! teacher also keeps in `saturated_water.rs` are dropped (spec §9 Design Notes:
//! "Repository duplication... Implement the newest generation only").

use crate::equations::shared::t_celsius_to_kelvin;

const C1: f64 = -5.6745359e+03;
const C2: f64 = 6.3925247e+00;
const C3: f64 = -9.677843e-03;
const C4: f64 = 6.2215701e-07;
const C5: f64 = 2.0747825e-09;
const C6: f64 = -9.4840240e-13;
const C7: f64 = 4.1635019e+00;

const C8: f64 = -5.8002206e+03;
const C9: f64 = 1.3914993e+00;
const C10: f64 = -4.8640239e-02;
const C11: f64 = 4.1764768e-05;
const C12: f64 = -1.4452093e-08;
const C13: f64 = 6.5459673e+00;

/// Triple point of water, °C.
const TRIPLE_POINT_WATER_C: f64 = 0.01;

/// Saturation pressure of water vapour over ice/water, Pa.
///
/// Piecewise Hyland-Wexler correlation (ASHRAE Fundamentals Handbook 2017, Ch. 1, Eq.
/// 5 and 6): ice branch for `t < 0.01 °C`, water branch otherwise. The two branches
/// agree to within about 1 Pa at the triple point (spec §4.1).
pub fn saturation_pressure_pa(t_dry_bulb_c: f64) -> f64 {
    f64::exp(ln_saturation_pressure(t_dry_bulb_c))
}

/// `d(Ps)/dt`, Pa/°C — used by the wet-bulb and dew-point Brent solves.
pub fn deriv_saturation_pressure_pa(t_dry_bulb_c: f64) -> f64 {
    f64::exp(ln_saturation_pressure(t_dry_bulb_c)) * deriv_ln_saturation_pressure(t_dry_bulb_c)
}

fn ln_saturation_pressure(t_dry_bulb_c: f64) -> f64 {
    let t_k = t_celsius_to_kelvin(t_dry_bulb_c);
    if t_dry_bulb_c < TRIPLE_POINT_WATER_C {
        C1 / t_k + C2 + C3 * t_k + C4 * t_k.powi(2) + C5 * t_k.powi(3) + C6 * t_k.powi(4) + C7 * t_k.ln()
    } else {
        C8 / t_k + C9 + C10 * t_k + C11 * t_k.powi(2) + C12 * t_k.powi(3) + C13 * t_k.ln()
    }
}

fn deriv_ln_saturation_pressure(t_dry_bulb_c: f64) -> f64 {
    let t_k = t_celsius_to_kelvin(t_dry_bulb_c);
    if t_dry_bulb_c < TRIPLE_POINT_WATER_C {
        -C1 / t_k.powi(2) + C3 + 2.0 * C4 * t_k + 3.0 * C5 * t_k.powi(2) + 4.0 * C6 * t_k.powi(3) + C7 / t_k
    } else {
        -C8 / t_k.powi(2) + C10 + 2.0 * C11 * t_k + 3.0 * C12 * t_k.powi(2) + C13 / t_k
    }
}

/// Specific heat of water vapour at low pressure, kJ/(kg·K) — the coefficient of `t`
/// in the enthalpy correlation below (ASHRAE Fundamentals Handbook 2017, Ch. 1).
pub const SPECIFIC_HEAT_KJ_PER_KGK: f64 = 1.860;

/// Specific enthalpy of saturated water vapour, kJ/kg, zero datum at 0 °C.
pub fn specific_enthalpy_kj_per_kg(t_dry_bulb_c: f64) -> f64 {
    crate::constants::LATENT_HEAT_VAPORIZATION_0C + SPECIFIC_HEAT_KJ_PER_KGK * t_dry_bulb_c
}

/// Density of water vapour at its own partial pressure, via the ideal gas law.
pub fn density_kg_per_m3(t_dry_bulb_c: f64, partial_pressure_pa: f64) -> f64 {
    let t_k = t_celsius_to_kelvin(t_dry_bulb_c);
    partial_pressure_pa / (crate::constants::R_WV * t_k)
}

/// Dynamic viscosity of water vapour, Pa·s — linear fit valid roughly 0-200 °C
/// (ASHRAE Fundamentals Handbook 2017, Ch. 33, transport properties table).
pub fn dynamic_viscosity_pa_s(t_dry_bulb_c: f64) -> f64 {
    let t_k = t_celsius_to_kelvin(t_dry_bulb_c);
    (0.0 + 3.64e-8) * t_k + 0.80e-5
}

/// Thermal conductivity of water vapour, W/(m·K) — linear fit, same source as the
/// viscosity correlation above.
pub fn thermal_conductivity_w_per_mk(t_dry_bulb_c: f64) -> f64 {
    let t_k = t_celsius_to_kelvin(t_dry_bulb_c);
    7.341e-5 * t_k - 0.00393
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn saturation_pressure_matches_ashrae_table() {
        assert_relative_eq!(saturation_pressure_pa(-20.0), 103.24, max_relative = 0.0003);
        assert_relative_eq!(saturation_pressure_pa(-5.0), 401.74, max_relative = 0.0003);
        assert_relative_eq!(saturation_pressure_pa(5.0), 872.6, max_relative = 0.0003);
        assert_relative_eq!(saturation_pressure_pa(25.0), 3169.7, max_relative = 0.0003);
        assert_relative_eq!(saturation_pressure_pa(100.0), 101418.0, max_relative = 0.0003);
    }

    #[test]
    fn continuous_across_triple_point() {
        let below = saturation_pressure_pa(-0.001);
        let above = saturation_pressure_pa(0.001);
        assert!((below - above).abs() < 1.0, "branches disagree by {}", (below - above).abs());
    }

    #[test]
    fn zero_celsius_reference() {
        assert_relative_eq!(saturation_pressure_pa(0.0), 611.15, max_relative = 0.01);
    }

    #[test]
    fn brent_inverts_saturation_pressure() {
        let mut solver = crate::solver::BrentSolver::with_bracket(50.0, 120.0);
        let t = solver
            .calc_for_function(|t| saturation_pressure_pa(t) - 80_000.0)
            .unwrap();
        assert_relative_eq!(t, 93.352, epsilon = 1e-3);
    }
}
