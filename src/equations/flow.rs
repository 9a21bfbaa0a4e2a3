//! `FlowEquations` — conversions between dry-air mass flow, humid-air mass flow, and
//! volumetric flow (spec §3 "Flow" types, §4.1).
//!
//! The teacher keeps these as private arithmetic inline at each `FlowOf*` call site;
//! this core pulls them out into free functions so every flow type shares one
//! implementation, matching spec §4.4's requirement that a `FlowOfHumidAir` built
//! from either the humid-air or dry-air basis converge on the same derived state.

/// Dry-air mass flow from humid-air mass flow: `G_da = G_ma / (1 + x)`.
pub fn dry_air_mass_flow_kg_per_s(humid_air_mass_flow_kg_per_s: f64, humidity_ratio: f64) -> f64 {
    humid_air_mass_flow_kg_per_s / (1.0 + humidity_ratio)
}

/// Humid-air mass flow from dry-air mass flow: `G_ma = G_da * (1 + x)`.
pub fn humid_air_mass_flow_kg_per_s(dry_air_mass_flow_kg_per_s: f64, humidity_ratio: f64) -> f64 {
    dry_air_mass_flow_kg_per_s * (1.0 + humidity_ratio)
}

/// Volumetric flow from mass flow and density: `V = G / rho`.
pub fn volumetric_flow_m3_per_s(mass_flow_kg_per_s: f64, density_kg_per_m3: f64) -> f64 {
    mass_flow_kg_per_s / density_kg_per_m3
}

/// Mass flow from volumetric flow and density: `G = V * rho`.
pub fn mass_flow_kg_per_s(volumetric_flow_m3_per_s: f64, density_kg_per_m3: f64) -> f64 {
    volumetric_flow_m3_per_s * density_kg_per_m3
}

/// Mass flow of water vapour carried by a dry-air flow: `G_w = G_da * x`.
pub fn water_vapour_mass_flow_kg_per_s(
    dry_air_mass_flow_kg_per_s: f64,
    humidity_ratio: f64,
) -> f64 {
    dry_air_mass_flow_kg_per_s * humidity_ratio
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dry_and_humid_mass_flow_round_trip() {
        let g_da = 1.5;
        let x = 0.008;
        let g_ma = humid_air_mass_flow_kg_per_s(g_da, x);
        assert_relative_eq!(dry_air_mass_flow_kg_per_s(g_ma, x), g_da, max_relative = 1e-12);
    }

    #[test]
    fn volumetric_and_mass_flow_round_trip() {
        let g = 2.2;
        let rho = 1.18;
        let v = volumetric_flow_m3_per_s(g, rho);
        assert_relative_eq!(mass_flow_kg_per_s(v, rho), g, max_relative = 1e-12);
    }

    #[test]
    fn water_vapour_flow_scales_with_humidity_ratio() {
        assert_eq!(water_vapour_mass_flow_kg_per_s(1.0, 0.01), 0.01);
        assert_eq!(water_vapour_mass_flow_kg_per_s(2.0, 0.01), 0.02);
    }
}
