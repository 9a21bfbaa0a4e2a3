//! `DryAirEquations` — ideal-gas density plus ASHRAE transport-property fits
//! (spec §3, supplemented per SPEC_FULL §10.6; the teacher has no standalone dry-air
//! module, only the density term embedded in `MoistAir::density`).

use crate::constants::R_DA;
use crate::equations::shared::t_celsius_to_kelvin;

/// Specific heat of dry air at typical HVAC conditions, kJ/(kg·K) — the coefficient of
/// `t` in the humid-air enthalpy correlation (spec §3).
pub const SPECIFIC_HEAT_KJ_PER_KGK: f64 = 1.006;

/// Density of dry air via the ideal gas law.
pub fn density_kg_per_m3(t_dry_bulb_c: f64, pressure_pa: f64) -> f64 {
    let t_k = t_celsius_to_kelvin(t_dry_bulb_c);
    pressure_pa / (R_DA * t_k)
}

/// Specific enthalpy of dry air, kJ/kg, zero datum at 0 °C.
pub fn specific_enthalpy_kj_per_kg(t_dry_bulb_c: f64) -> f64 {
    SPECIFIC_HEAT_KJ_PER_KGK * t_dry_bulb_c
}

/// Dynamic viscosity of dry air via Sutherland's law, Pa·s.
pub fn dynamic_viscosity_pa_s(t_dry_bulb_c: f64) -> f64 {
    const MU_REF: f64 = 1.716e-5; // Pa.s at T_REF
    const T_REF: f64 = 273.15; // K
    const SUTHERLAND_C: f64 = 110.4; // K
    let t_k = t_celsius_to_kelvin(t_dry_bulb_c);
    MU_REF * (T_REF + SUTHERLAND_C) / (t_k + SUTHERLAND_C) * (t_k / T_REF).powf(1.5)
}

/// Kinematic viscosity, m^2/s.
pub fn kinematic_viscosity_m2_per_s(t_dry_bulb_c: f64, pressure_pa: f64) -> f64 {
    dynamic_viscosity_pa_s(t_dry_bulb_c) / density_kg_per_m3(t_dry_bulb_c, pressure_pa)
}

/// Thermal conductivity of dry air, W/(m·K) — standard power-law fit
/// (ASHRAE Fundamentals Handbook 2017, Ch. 33).
pub fn thermal_conductivity_w_per_mk(t_dry_bulb_c: f64) -> f64 {
    let t_k = t_celsius_to_kelvin(t_dry_bulb_c);
    0.02624 * (t_k / 300.0).powf(0.8646)
}

/// Thermal diffusivity, m^2/s — `k / (rho * cp)`.
pub fn thermal_diffusivity_m2_per_s(t_dry_bulb_c: f64, pressure_pa: f64) -> f64 {
    let k = thermal_conductivity_w_per_mk(t_dry_bulb_c);
    let rho = density_kg_per_m3(t_dry_bulb_c, pressure_pa);
    k / (rho * SPECIFIC_HEAT_KJ_PER_KGK * 1000.0)
}

/// Prandtl number, dimensionless — `nu / alpha`.
pub fn prandtl_number(t_dry_bulb_c: f64, pressure_pa: f64) -> f64 {
    kinematic_viscosity_m2_per_s(t_dry_bulb_c, pressure_pa)
        / thermal_diffusivity_m2_per_s(t_dry_bulb_c, pressure_pa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn density_at_standard_conditions() {
        assert_relative_eq!(density_kg_per_m3(20.0, 101325.0), 1.2047, max_relative = 0.01);
    }

    #[test]
    fn viscosity_near_reference() {
        assert_relative_eq!(dynamic_viscosity_pa_s(0.0), 1.716e-5, max_relative = 0.01);
    }

    #[test]
    fn prandtl_number_is_near_known_air_value() {
        let pr = prandtl_number(20.0, 101325.0);
        assert!((0.6..0.8).contains(&pr), "Pr = {pr}");
    }
}
