//! `DryAir` — an immutable, validated snapshot of dry air at a pressure and dry-bulb
//! temperature, with every derived property memoised at construction (spec §3).

use crate::constants::{T_MAX_C, T_MIN_C};
use crate::equations::dry_air as eq;
use crate::error::PsychroError;
use crate::units::{
    kilogram_per_cubic_meter, kilojoule_per_kilogram, kilojoule_per_kilogram_kelvin, pascal,
    watt_per_meter_kelvin, ApproxEq, Density, Pressure, SpecificEnthalpy, SpecificHeat,
    Temperature, ThermalConductivity,
};

#[derive(Debug, Clone, Copy)]
pub struct DryAir {
    pressure_pa: f64,
    temperature_c: f64,
    density: f64,
    specific_heat: f64,
    specific_enthalpy: f64,
    dynamic_viscosity: f64,
    kinematic_viscosity: f64,
    thermal_conductivity: f64,
}

impl DryAir {
    /// Validated entry point (spec §6: `DryAir::of`). `pressure` and `temperature` are
    /// the units-library quantities this core consumes at its API boundary.
    pub fn of(pressure: Pressure, temperature: Temperature) -> Result<Self, PsychroError> {
        Self::new(pressure.get::<pascal>(), temperature.get::<crate::units::degree_celsius>())
    }

    fn new(pressure_pa: f64, temperature_c: f64) -> Result<Self, PsychroError> {
        if pressure_pa < 0.0 {
            return Err(PsychroError::out_of_bounds(
                "pressure",
                pressure_pa,
                0.0,
                f64::INFINITY,
            ));
        }
        if !(T_MIN_C..=T_MAX_C).contains(&temperature_c) {
            return Err(PsychroError::out_of_bounds(
                "temperature",
                temperature_c,
                T_MIN_C,
                T_MAX_C,
            ));
        }
        Ok(DryAir {
            pressure_pa,
            temperature_c,
            density: eq::density_kg_per_m3(temperature_c, pressure_pa),
            specific_heat: eq::SPECIFIC_HEAT_KJ_PER_KGK,
            specific_enthalpy: eq::specific_enthalpy_kj_per_kg(temperature_c),
            dynamic_viscosity: eq::dynamic_viscosity_pa_s(temperature_c),
            kinematic_viscosity: eq::kinematic_viscosity_m2_per_s(temperature_c, pressure_pa),
            thermal_conductivity: eq::thermal_conductivity_w_per_mk(temperature_c),
        })
    }

    pub fn with_temperature(&self, temperature: Temperature) -> Result<Self, PsychroError> {
        Self::new(self.pressure_pa, temperature.get::<crate::units::degree_celsius>())
    }

    pub fn with_pressure(&self, pressure: Pressure) -> Result<Self, PsychroError> {
        Self::new(pressure.get::<pascal>(), self.temperature_c)
    }

    pub fn pressure(&self) -> Pressure {
        Pressure::new::<pascal>(self.pressure_pa)
    }

    pub fn temperature(&self) -> Temperature {
        Temperature::new::<crate::units::degree_celsius>(self.temperature_c)
    }

    pub fn density(&self) -> Density {
        Density::new::<kilogram_per_cubic_meter>(self.density)
    }

    pub fn specific_heat(&self) -> SpecificHeat {
        SpecificHeat::new::<kilojoule_per_kilogram_kelvin>(self.specific_heat)
    }

    pub fn specific_enthalpy(&self) -> SpecificEnthalpy {
        SpecificEnthalpy::new::<kilojoule_per_kilogram>(self.specific_enthalpy)
    }

    pub fn dynamic_viscosity_pa_s(&self) -> f64 {
        self.dynamic_viscosity
    }

    pub fn kinematic_viscosity_m2_per_s(&self) -> f64 {
        self.kinematic_viscosity
    }

    pub fn thermal_conductivity(&self) -> ThermalConductivity {
        ThermalConductivity::new::<watt_per_meter_kelvin>(self.thermal_conductivity)
    }

    /// `isEqualsWithPrecision` (spec §4.3).
    pub fn is_equal_with_precision(&self, other: &Self, epsilon: f64) -> bool {
        self.pressure_pa.approx_eq(&other.pressure_pa, epsilon)
            && self.temperature_c.approx_eq(&other.temperature_c, epsilon)
    }

    pub fn to_console_output(&self) -> String {
        format!(
            "DryAir(P={:.0} Pa, t={:.2} °C, ρ={:.4} kg/m³, i={:.2} kJ/kg)",
            self.pressure_pa, self.temperature_c, self.density, self.specific_enthalpy
        )
    }
}

impl std::fmt::Display for DryAir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_console_output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::degree_celsius;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_temperature_out_of_range() {
        let result = DryAir::of(
            Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(2000.0),
        );
        assert!(matches!(
            result,
            Err(PsychroError::ArgumentOutOfBounds { field: "temperature", .. })
        ));
    }

    #[test]
    fn density_matches_equation_layer() {
        let air = DryAir::of(
            Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(20.0),
        )
        .unwrap();
        assert_relative_eq!(
            air.density().get::<kilogram_per_cubic_meter>(),
            eq::density_kg_per_m3(20.0, 101_325.0)
        );
    }

    #[test]
    fn with_temperature_produces_new_snapshot() {
        let air = DryAir::of(
            Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(20.0),
        )
        .unwrap();
        let warmer = air.with_temperature(Temperature::new::<degree_celsius>(30.0)).unwrap();
        assert!(!air.is_equal_with_precision(&warmer, 1e-6));
    }
}
