//! `LiquidWaterEquations` — density, specific heat, and specific enthalpy of the
//! liquid phase, used for condensate and steam-injection energy bookkeeping
//! (spec §4.5.3, §4.5.5).
//!
//! The teacher's `saturated_water.rs` duplicates `saturated_water_vapor.rs`'s
//! saturation-pressure fit under a different name (spec §9 Design Notes calls this out
//! explicitly); this module reuses [`crate::equations::water_vapour`] for that rather
//! than carrying a second copy, and supplies the liquid-phase density/cp/enthalpy
//! correlations the teacher's duplicate never actually implemented correctly (its
//! `specific_enthalpy` returns the *vapour* enthalpy, a historical bug this core does
//! not reproduce).

use crate::equations::water_vapour::saturation_pressure_pa as vapour_saturation_pressure_pa;

/// Saturation pressure over liquid water — identical correlation to water vapour
/// saturation pressure (the two phases are in equilibrium at saturation).
pub fn saturation_pressure_pa(t_c: f64) -> f64 {
    vapour_saturation_pressure_pa(t_c)
}

/// Specific heat of liquid water, kJ/(kg·K). Nearly constant over the psychrometric
/// window; the small Celsius-dependence ASHRAE tabulates is folded into a linear fit.
pub fn specific_heat_kj_per_kgk(t_c: f64) -> f64 {
    4.2184 - 0.00043 * t_c
}

/// Specific enthalpy of liquid water, kJ/kg, zero datum at 0 °C.
pub fn specific_enthalpy_kj_per_kg(t_c: f64) -> f64 {
    specific_heat_kj_per_kgk(0.0) * t_c
}

/// Density of liquid water, kg/m^3 — a standard quadratic fit around the 4 °C density
/// maximum (ASHRAE Fundamentals Handbook 2017, Ch. 33).
pub fn density_kg_per_m3(t_c: f64) -> f64 {
    999.85 + 0.0625 * t_c - 0.0079 * t_c.powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn enthalpy_zero_at_zero_celsius() {
        assert_eq!(specific_enthalpy_kj_per_kg(0.0), 0.0);
    }

    #[test]
    fn density_near_standard_value() {
        assert_relative_eq!(density_kg_per_m3(20.0), 998.0, max_relative = 0.01);
    }

    #[test]
    fn shares_correlation_with_vapour() {
        assert_eq!(saturation_pressure_pa(20.0), vapour_saturation_pressure_pa(20.0));
    }
}
