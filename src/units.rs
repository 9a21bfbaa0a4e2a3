//! The physical-quantities collaborator this core consumes (spec §6, §10.4).
//!
//! `uom`'s SI quantities cover everything this engine needs except two dimensionless
//! domain ratios it has no dedicated unit for — humidity ratio (kg water / kg dry air)
//! and bypass factor (dimensionless fraction) — which are defined here as thin newtypes
//! over `uom::si::f64::Ratio`.

pub use uom::si::f64::{
    AvailableEnergy as SpecificEnthalpy, MassDensity as Density, MassRate as MassFlow, Power,
    Pressure, Ratio, SpecificHeatCapacity as SpecificHeat, ThermalConductivity,
    ThermodynamicTemperature as Temperature, VolumeRate as VolumetricFlow,
};
pub use uom::si::{
    available_energy::kilojoule_per_kilogram,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    power::{kilowatt, watt},
    pressure::{kilopascal, pascal},
    ratio::{percent, ratio},
    specific_heat_capacity::kilojoule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::{degree_celsius, kelvin},
    volume_rate::cubic_meter_per_second,
};

/// Kilograms of water vapour per kilogram of dry air. Dimensionless in SI, but kept as
/// its own type so fluid/flow APIs can't accidentally swap it for a relative humidity.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct HumidityRatio(f64);

impl HumidityRatio {
    pub const ZERO: HumidityRatio = HumidityRatio(0.0);

    pub fn new(kg_per_kg: f64) -> Self {
        HumidityRatio(kg_per_kg)
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for HumidityRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6} kg/kg_da", self.0)
    }
}

impl std::ops::Add for HumidityRatio {
    type Output = HumidityRatio;
    fn add(self, rhs: HumidityRatio) -> HumidityRatio {
        HumidityRatio(self.0 + rhs.0)
    }
}

impl std::ops::Sub for HumidityRatio {
    type Output = HumidityRatio;
    fn sub(self, rhs: HumidityRatio) -> HumidityRatio {
        HumidityRatio(self.0 - rhs.0)
    }
}

/// Fraction of an air stream that bypasses a cooling coil's contact surface, in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BypassFactor(f64);

impl BypassFactor {
    pub fn new(fraction: f64) -> Self {
        BypassFactor(fraction)
    }

    pub fn clamped(fraction: f64) -> Self {
        BypassFactor(fraction.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for BypassFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// `isEqualsWithPrecision` from the spec's units collaborator (§6): attribute equality
/// within an absolute epsilon, rather than `PartialEq`'s exact-bitwise comparison.
pub trait ApproxEq {
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self - other).abs() <= epsilon
    }
}

impl ApproxEq for Temperature {
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.get::<kelvin>() - other.get::<kelvin>()).abs() <= epsilon
    }
}

impl ApproxEq for Pressure {
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.get::<pascal>() - other.get::<pascal>()).abs() <= epsilon
    }
}

impl ApproxEq for HumidityRatio {
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.0 - other.0).abs() <= epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humidity_ratio_arithmetic() {
        let a = HumidityRatio::new(0.010);
        let b = HumidityRatio::new(0.002);
        assert!(((a - b).get() - 0.008).abs() < 1e-12);
        assert!(((a + b).get() - 0.012).abs() < 1e-12);
    }

    #[test]
    fn temperature_approx_eq_uses_kelvin() {
        let a = Temperature::new::<degree_celsius>(20.0);
        let b = Temperature::new::<degree_celsius>(20.0000001);
        assert!(a.approx_eq(&b, 1e-3));
        assert!(!a.approx_eq(&b, 1e-10));
    }
}
