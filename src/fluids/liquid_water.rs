//! `LiquidWater` — an immutable snapshot of liquid water, used for condensate and
//! steam-injection energy bookkeeping in the process blocks (spec §3, §4.5.3, §4.5.5).

use crate::constants::{T_LIQUID_WATER_MAX_C, T_LIQUID_WATER_MIN_C};
use crate::equations::liquid_water as eq;
use crate::error::PsychroError;
use crate::units::{
    kilogram_per_cubic_meter, kilojoule_per_kilogram, kilojoule_per_kilogram_kelvin, pascal,
    ApproxEq, Density, Pressure, SpecificEnthalpy, SpecificHeat, Temperature,
};

#[derive(Debug, Clone, Copy)]
pub struct LiquidWater {
    pressure_pa: f64,
    temperature_c: f64,
    density: f64,
    specific_heat: f64,
    specific_enthalpy: f64,
}

impl LiquidWater {
    pub fn of(pressure: Pressure, temperature: Temperature) -> Result<Self, PsychroError> {
        Self::new(pressure.get::<pascal>(), temperature.get::<crate::units::degree_celsius>())
    }

    fn new(pressure_pa: f64, temperature_c: f64) -> Result<Self, PsychroError> {
        if pressure_pa <= 0.0 {
            return Err(PsychroError::out_of_bounds(
                "pressure",
                pressure_pa,
                0.0,
                f64::INFINITY,
            ));
        }
        if !(T_LIQUID_WATER_MIN_C..=T_LIQUID_WATER_MAX_C).contains(&temperature_c) {
            return Err(PsychroError::out_of_bounds(
                "temperature",
                temperature_c,
                T_LIQUID_WATER_MIN_C,
                T_LIQUID_WATER_MAX_C,
            ));
        }
        Ok(LiquidWater {
            pressure_pa,
            temperature_c,
            density: eq::density_kg_per_m3(temperature_c),
            specific_heat: eq::specific_heat_kj_per_kgk(temperature_c),
            specific_enthalpy: eq::specific_enthalpy_kj_per_kg(temperature_c),
        })
    }

    pub fn with_temperature(&self, temperature: Temperature) -> Result<Self, PsychroError> {
        Self::new(self.pressure_pa, temperature.get::<crate::units::degree_celsius>())
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

    /// Specific enthalpy in raw kJ/kg, used internally by process blocks' energy
    /// balances where wrapping/unwrapping a `uom` quantity for every term would be
    /// more friction than signal (spec §4.5.3's `i_water(t_cs)` term).
    pub fn specific_enthalpy_kj_per_kg(&self) -> f64 {
        self.specific_enthalpy
    }

    pub fn is_equal_with_precision(&self, other: &Self, epsilon: f64) -> bool {
        self.pressure_pa.approx_eq(&other.pressure_pa, epsilon)
            && self.temperature_c.approx_eq(&other.temperature_c, epsilon)
    }

    pub fn to_console_output(&self) -> String {
        format!(
            "LiquidWater(P={:.0} Pa, t={:.2} °C, ρ={:.2} kg/m³, i={:.3} kJ/kg)",
            self.pressure_pa, self.temperature_c, self.density, self.specific_enthalpy
        )
    }
}

impl std::fmt::Display for LiquidWater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_console_output())
    }
}
