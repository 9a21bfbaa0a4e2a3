//! `HumidAirEquations` — the core psychrometric correlations (spec §3, §4.1).
//!
//! Generalizes the teacher's `moist_air.rs` free functions. Every inversion that the
//! teacher solved with `roots::find_root_newton_raphson` (needing a hand-differentiated
//! companion function per call site) is re-expressed here over
//! [`crate::solver::BrentSolver`], which only needs the forward function — the
//! `deriv_*` helpers the teacher carried alongside `wet_bulb`/`dew_point`/etc. are
//! dropped as dead weight once nothing calls them for a derivative.

use crate::constants::{
    LATENT_HEAT_VAPORIZATION_0C, MASS_RATIO_WATER_DRY_AIR, MIN_HUMIDITY_RATIO, R_DA, R_WV,
    T_HUMID_AIR_MAX_C, T_HUMID_AIR_MIN_C,
};
use crate::equations::shared::t_celsius_to_kelvin;
use crate::equations::{dry_air, water_vapour};
use crate::error::PsychroError;
use crate::solver::BrentSolver;

pub use water_vapour::saturation_pressure_pa;

/// Maximum humidity ratio at saturation, kg/kg_da (spec §3: `Xmax(t, P)`).
pub fn max_humidity_ratio(saturation_pressure_pa: f64, pressure_pa: f64) -> f64 {
    MASS_RATIO_WATER_DRY_AIR * saturation_pressure_pa / (pressure_pa - saturation_pressure_pa)
}

/// Humidity ratio from relative humidity (fraction, not percent).
pub fn humidity_ratio_from_relative_humidity(
    t_dry_bulb_c: f64,
    relative_humidity: f64,
    pressure_pa: f64,
) -> f64 {
    let pw = relative_humidity * saturation_pressure_pa(t_dry_bulb_c);
    MASS_RATIO_WATER_DRY_AIR * pw / (pressure_pa - pw)
}

/// Partial pressure of water vapour at the given humidity ratio, Pa.
pub fn partial_vapour_pressure_pa(humidity_ratio: f64, pressure_pa: f64) -> f64 {
    pressure_pa * humidity_ratio / (MASS_RATIO_WATER_DRY_AIR + humidity_ratio)
}

/// Relative humidity as a fraction (not clamped to `[0, 1]` — humid air states with
/// `x > Xmax`, i.e. fog, legitimately report RH > 1; see [`crate::fluids::humid_air::VapourState`]).
pub fn relative_humidity(t_dry_bulb_c: f64, humidity_ratio: f64, pressure_pa: f64) -> f64 {
    let pw = partial_vapour_pressure_pa(humidity_ratio, pressure_pa);
    pw / saturation_pressure_pa(t_dry_bulb_c)
}

/// Specific enthalpy of humid air, kJ/kg dry air, zero datum at 0 °C dry air with zero
/// humidity (spec §3): `i = cp_da*t + x*(r + cp_wv*t)`.
pub fn specific_enthalpy_kj_per_kg(t_dry_bulb_c: f64, humidity_ratio: f64) -> f64 {
    dry_air::SPECIFIC_HEAT_KJ_PER_KGK * t_dry_bulb_c
        + humidity_ratio
            * (LATENT_HEAT_VAPORIZATION_0C + water_vapour::SPECIFIC_HEAT_KJ_PER_KGK * t_dry_bulb_c)
}

/// Inverts [`specific_enthalpy_kj_per_kg`] for dry-bulb temperature via Brent, per the
/// spec's explicit instruction that this inversion be solver-based (§4.1) even though
/// the forward formula is linear in `t` and admits a closed form — the solver path
/// keeps this call site uniform with the genuinely-nonlinear wet-bulb/dew-point
/// inversions below.
pub fn dry_bulb_temperature_from_enthalpy(
    specific_enthalpy_kj_per_kg_target: f64,
    humidity_ratio: f64,
) -> Result<f64, PsychroError> {
    let mut solver = BrentSolver::with_bracket(T_HUMID_AIR_MIN_C, T_HUMID_AIR_MAX_C);
    let root = solver.calc_for_function(|t| {
        specific_enthalpy_kj_per_kg(t, humidity_ratio) - specific_enthalpy_kj_per_kg_target
    })?;
    Ok(root)
}

/// Dry-bulb temperature at which a humid-air state of the given humidity ratio reaches
/// a target relative humidity (fraction), at fixed pressure. Used by
/// [`crate::processes::heating`]'s FROM_HUMIDITY mode.
pub fn dry_bulb_temperature_for_relative_humidity(
    humidity_ratio: f64,
    relative_humidity_target: f64,
    pressure_pa: f64,
) -> Result<f64, PsychroError> {
    let mut solver = BrentSolver::with_bracket(T_HUMID_AIR_MIN_C, T_HUMID_AIR_MAX_C);
    let root = solver.calc_for_function(|t| {
        relative_humidity(t, humidity_ratio, pressure_pa) - relative_humidity_target
    })?;
    Ok(root)
}

/// Dew-point temperature: the temperature at which `Ps(Tdp)` equals the current
/// partial pressure of water vapour (spec §3, Brent-based per §4.1).
pub fn dew_point_temperature(
    humidity_ratio: f64,
    pressure_pa: f64,
) -> Result<f64, PsychroError> {
    if humidity_ratio <= MIN_HUMIDITY_RATIO {
        return Err(PsychroError::Numerical(
            "dew point undefined for zero humidity ratio".to_string(),
        ));
    }
    let target_pw = partial_vapour_pressure_pa(humidity_ratio, pressure_pa);
    let mut solver = BrentSolver::with_bracket(T_HUMID_AIR_MIN_C, T_HUMID_AIR_MAX_C);
    let root = solver.calc_for_function(|t| saturation_pressure_pa(t) - target_pw)?;
    Ok(root)
}

/// Wet-bulb temperature from the adiabatic-saturation energy balance at pressure `P`
/// (spec §3, §4.1). Carries the teacher's ASHRAE Ch.1 Eq. (33)/(35) balance equation,
/// re-expressed for Brent instead of Newton-Raphson.
pub fn wet_bulb_temperature(
    t_dry_bulb_c: f64,
    humidity_ratio: f64,
    pressure_pa: f64,
) -> Result<f64, PsychroError> {
    let f = |t_wet_bulb: f64| {
        let saturation_pressure = saturation_pressure_pa(t_wet_bulb);
        let saturation_humidity_ratio =
            MASS_RATIO_WATER_DRY_AIR * saturation_pressure / (pressure_pa - saturation_pressure);
        if t_wet_bulb >= 0.0 {
            humidity_ratio * (2501.0 + 1.860 * t_dry_bulb_c - 4.186 * t_wet_bulb)
                - (2501.0 - 2.326 * t_wet_bulb) * saturation_humidity_ratio
                + 1.006 * (t_dry_bulb_c - t_wet_bulb)
        } else {
            humidity_ratio * (2830.0 + 1.860 * t_dry_bulb_c - 2.100 * t_wet_bulb)
                - (2830.0 - 0.240 * t_wet_bulb) * saturation_humidity_ratio
                + 1.006 * (t_dry_bulb_c - t_wet_bulb)
        }
    };
    let mut solver = BrentSolver::new();
    let root = solver.calc_for_function_with_bracket(f, T_HUMID_AIR_MIN_C, t_dry_bulb_c)?;
    Ok(root)
}

/// Density of humid air, kg/m^3, via the ideal-gas mixture rule (spec §3).
pub fn density_kg_per_m3(t_dry_bulb_c: f64, humidity_ratio: f64, pressure_pa: f64) -> f64 {
    let t_k = t_celsius_to_kelvin(t_dry_bulb_c);
    let specific_volume_moist =
        R_DA * t_k * (1.0 + (R_WV / R_DA) * humidity_ratio) / pressure_pa;
    (1.0 + humidity_ratio) / specific_volume_moist
}

/// Mass fraction of dry air in the mixture, `1 / (1 + x)`.
fn dry_air_mass_fraction(humidity_ratio: f64) -> f64 {
    1.0 / (1.0 + humidity_ratio)
}

/// Dynamic viscosity of humid air, Pa·s — mass-fraction-weighted blend of the
/// component transport properties (simple mixing rule; ASHRAE does not give a
/// closed-form humid-air viscosity correlation, so this is the standard
/// engineering approximation, same spirit as the teacher's linear empirical fits).
pub fn dynamic_viscosity_pa_s(t_dry_bulb_c: f64, humidity_ratio: f64) -> f64 {
    let w_da = dry_air_mass_fraction(humidity_ratio);
    w_da * dry_air::dynamic_viscosity_pa_s(t_dry_bulb_c)
        + (1.0 - w_da) * water_vapour::dynamic_viscosity_pa_s(t_dry_bulb_c)
}

pub fn kinematic_viscosity_m2_per_s(
    t_dry_bulb_c: f64,
    humidity_ratio: f64,
    pressure_pa: f64,
) -> f64 {
    dynamic_viscosity_pa_s(t_dry_bulb_c, humidity_ratio)
        / density_kg_per_m3(t_dry_bulb_c, humidity_ratio, pressure_pa)
}

pub fn thermal_conductivity_w_per_mk(t_dry_bulb_c: f64, humidity_ratio: f64) -> f64 {
    let w_da = dry_air_mass_fraction(humidity_ratio);
    w_da * dry_air::thermal_conductivity_w_per_mk(t_dry_bulb_c)
        + (1.0 - w_da) * water_vapour::thermal_conductivity_w_per_mk(t_dry_bulb_c)
}

/// Specific heat of humid air, kJ/(kg_da·K) — `cp_da + x*cp_wv`.
pub fn specific_heat_kj_per_kgk(humidity_ratio: f64) -> f64 {
    dry_air::SPECIFIC_HEAT_KJ_PER_KGK + humidity_ratio * water_vapour::SPECIFIC_HEAT_KJ_PER_KGK
}

pub fn thermal_diffusivity_m2_per_s(
    t_dry_bulb_c: f64,
    humidity_ratio: f64,
    pressure_pa: f64,
) -> f64 {
    let k = thermal_conductivity_w_per_mk(t_dry_bulb_c, humidity_ratio);
    let rho = density_kg_per_m3(t_dry_bulb_c, humidity_ratio, pressure_pa);
    let cp = specific_heat_kj_per_kgk(humidity_ratio);
    k / (rho * cp * 1000.0)
}

pub fn prandtl_number(t_dry_bulb_c: f64, humidity_ratio: f64, pressure_pa: f64) -> f64 {
    kinematic_viscosity_m2_per_s(t_dry_bulb_c, humidity_ratio, pressure_pa)
        / thermal_diffusivity_m2_per_s(t_dry_bulb_c, humidity_ratio, pressure_pa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn baseline_scenario_20c_50pct() {
        let t = 20.0;
        let p = 101_325.0;
        let ps = saturation_pressure_pa(t);
        assert_relative_eq!(ps, 2338.80, max_relative = 0.001);
        let x = humidity_ratio_from_relative_humidity(t, 0.5, p);
        assert_relative_eq!(x, 0.007261881, max_relative = 0.002);
        let rho = density_kg_per_m3(t, x, p);
        assert_relative_eq!(rho, 1.1992, max_relative = 0.002);
        let i = specific_enthalpy_kj_per_kg(t, x);
        assert_relative_eq!(i, 38.62, max_relative = 0.01);
    }

    #[test]
    fn enthalpy_temperature_round_trip() {
        for &t in &[-40.0, -10.0, 0.0, 20.0, 45.0, 90.0] {
            for &rh in &[0.0, 0.3, 0.7, 1.0] {
                let p = 101_325.0;
                let x = humidity_ratio_from_relative_humidity(t, rh, p);
                let i = specific_enthalpy_kj_per_kg(t, x);
                let t_back = dry_bulb_temperature_from_enthalpy(i, x).unwrap();
                assert_relative_eq!(t_back, t, max_relative = 1e-6, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn relative_humidity_round_trip_at_100_percent() {
        // Capped below 100 °C: above the boiling point at standard atmospheric
        // pressure, Ps(t) exceeds the mixture pressure and x is no longer defined.
        for t in (-80..95).step_by(5) {
            let t = t as f64;
            let p = 101_325.0;
            let x = humidity_ratio_from_relative_humidity(t, 1.0, p);
            let twb = wet_bulb_temperature(t, x, p).unwrap();
            let tdp = dew_point_temperature(x, p).unwrap();
            assert_relative_eq!(twb, t, max_relative = 1e-3, epsilon = 1e-4);
            assert_relative_eq!(tdp, t, max_relative = 1e-3, epsilon = 1e-4);
        }
    }

    #[test]
    fn wet_bulb_continuous_at_freezing() {
        let p = 101_325.0;
        let x = humidity_ratio_from_relative_humidity(0.0, 0.9, p);
        let below = wet_bulb_temperature(-0.01, x, p).unwrap();
        let above = wet_bulb_temperature(0.01, x, p).unwrap();
        assert!((below - above).abs() < 0.05, "{} vs {}", below, above);
    }

    #[test]
    fn max_humidity_ratio_matches_saturation_relationship() {
        let p = 101_325.0;
        let ps = saturation_pressure_pa(30.0);
        let xmax = max_humidity_ratio(ps, p);
        let x_at_100pct = humidity_ratio_from_relative_humidity(30.0, 1.0, p);
        assert_relative_eq!(xmax, x_at_100pct, max_relative = 1e-9);
    }
}
