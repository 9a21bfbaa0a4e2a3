//! `WaterVapour` — an immutable snapshot of water vapour at its own partial pressure
//! and temperature (spec §3). Density depends on the partial pressure the vapour
//! itself exerts, not the total mixture pressure, per the ideal-gas law applied to the
//! vapour component alone.

use crate::constants::{T_MAX_C, T_MIN_C};
use crate::equations::water_vapour as eq;
use crate::error::PsychroError;
use crate::units::{
    kilogram_per_cubic_meter, kilojoule_per_kilogram, kilojoule_per_kilogram_kelvin, pascal,
    watt_per_meter_kelvin, ApproxEq, Density, Pressure, SpecificEnthalpy, SpecificHeat,
    Temperature, ThermalConductivity,
};

#[derive(Debug, Clone, Copy)]
pub struct WaterVapour {
    partial_pressure_pa: f64,
    temperature_c: f64,
    density: f64,
    specific_heat: f64,
    specific_enthalpy: f64,
    dynamic_viscosity: f64,
    thermal_conductivity: f64,
}

impl WaterVapour {
    pub fn of(partial_pressure: Pressure, temperature: Temperature) -> Result<Self, PsychroError> {
        Self::new(
            partial_pressure.get::<pascal>(),
            temperature.get::<crate::units::degree_celsius>(),
        )
    }

    fn new(partial_pressure_pa: f64, temperature_c: f64) -> Result<Self, PsychroError> {
        if partial_pressure_pa < 0.0 {
            return Err(PsychroError::out_of_bounds(
                "partial_pressure",
                partial_pressure_pa,
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
        Ok(WaterVapour {
            partial_pressure_pa,
            temperature_c,
            density: eq::density_kg_per_m3(temperature_c, partial_pressure_pa),
            specific_heat: eq::SPECIFIC_HEAT_KJ_PER_KGK,
            specific_enthalpy: eq::specific_enthalpy_kj_per_kg(temperature_c),
            dynamic_viscosity: eq::dynamic_viscosity_pa_s(temperature_c),
            thermal_conductivity: eq::thermal_conductivity_w_per_mk(temperature_c),
        })
    }

    pub fn with_temperature(&self, temperature: Temperature) -> Result<Self, PsychroError> {
        Self::new(self.partial_pressure_pa, temperature.get::<crate::units::degree_celsius>())
    }

    pub fn partial_pressure(&self) -> Pressure {
        Pressure::new::<pascal>(self.partial_pressure_pa)
    }

    pub fn temperature(&self) -> Temperature {
        Temperature::new::<crate::units::degree_celsius>(self.temperature_c)
    }

    pub fn saturation_pressure(&self) -> Pressure {
        Pressure::new::<pascal>(eq::saturation_pressure_pa(self.temperature_c))
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

    pub fn thermal_conductivity(&self) -> ThermalConductivity {
        ThermalConductivity::new::<watt_per_meter_kelvin>(self.thermal_conductivity)
    }

    pub fn is_equal_with_precision(&self, other: &Self, epsilon: f64) -> bool {
        self.partial_pressure_pa.approx_eq(&other.partial_pressure_pa, epsilon)
            && self.temperature_c.approx_eq(&other.temperature_c, epsilon)
    }

    pub fn to_console_output(&self) -> String {
        format!(
            "WaterVapour(Pw={:.2} Pa, t={:.2} °C, ρ={:.6} kg/m³, i={:.2} kJ/kg)",
            self.partial_pressure_pa, self.temperature_c, self.density, self.specific_enthalpy
        )
    }
}

impl std::fmt::Display for WaterVapour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_console_output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::degree_celsius;

    #[test]
    fn saturation_pressure_matches_equation_layer() {
        let vapour = WaterVapour::of(
            Pressure::new::<pascal>(2338.80),
            Temperature::new::<degree_celsius>(20.0),
        )
        .unwrap();
        assert!((vapour.saturation_pressure().get::<pascal>() - 2338.80).abs() < 1.0);
    }

    #[test]
    fn rejects_negative_partial_pressure() {
        let result = WaterVapour::of(
            Pressure::new::<pascal>(-1.0),
            Temperature::new::<degree_celsius>(20.0),
        );
        assert!(result.is_err());
    }
}
