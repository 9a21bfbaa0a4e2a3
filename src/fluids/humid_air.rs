//! `HumidAir` — an immutable, validated snapshot of moist air: dry-bulb temperature,
//! total pressure, and humidity ratio, plus every derived psychrometric property
//! memoised at construction (spec §3). Generalizes the teacher's `MoistAir`, dropping
//! its IP branch and its mutable `from_t_dry_bulb_*` family in favour of `with*`
//! snapshots (spec §9 Design Notes).

use crate::constants::{P_HUMID_AIR_MIN_PA, T_HUMID_AIR_MAX_C, T_HUMID_AIR_MIN_C};
use crate::equations::humid_air as eq;
use crate::error::PsychroError;
use crate::fluids::dry_air::DryAir;
use crate::units::{
    degree_celsius, kilogram_per_cubic_meter, kilojoule_per_kilogram,
    kilojoule_per_kilogram_kelvin, pascal, percent, ratio, watt_per_meter_kelvin, ApproxEq,
    Density, HumidityRatio, Pressure, Ratio, SpecificEnthalpy, SpecificHeat, Temperature,
    ThermalConductivity,
};

/// Saturation-state classification (spec §3 "VapourState").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VapourState {
    Unsaturated,
    Saturated,
    WaterFog,
    IceFog,
}

/// Epsilon used to decide `x == Xmax` (saturated vs merely close).
const SATURATION_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy)]
pub struct HumidAir {
    pressure_pa: f64,
    temperature_c: f64,
    humidity_ratio: f64,
    density: f64,
    saturation_pressure_pa: f64,
    max_humidity_ratio: f64,
    relative_humidity: f64,
    wet_bulb_c: f64,
    dew_point_c: f64,
    specific_heat: f64,
    specific_enthalpy: f64,
    dynamic_viscosity: f64,
    kinematic_viscosity: f64,
    thermal_conductivity: f64,
    thermal_diffusivity: f64,
    prandtl: f64,
    vapour_state: VapourState,
    dry_air: DryAir,
}

impl HumidAir {
    /// Validated entry point from (pressure, dry-bulb temperature, humidity ratio)
    /// (spec §6: `HumidAir::of(P, t, x)`).
    pub fn of(
        pressure: Pressure,
        temperature: Temperature,
        humidity_ratio: HumidityRatio,
    ) -> Result<Self, PsychroError> {
        Self::new(
            pressure.get::<pascal>(),
            temperature.get::<degree_celsius>(),
            humidity_ratio.get(),
        )
    }

    /// Validated entry point from (dry-bulb temperature, relative humidity) at standard
    /// atmospheric pressure (spec §6: `HumidAir::of(t, RH)`).
    pub fn from_relative_humidity_at_standard_pressure(
        temperature: Temperature,
        relative_humidity: Ratio,
    ) -> Result<Self, PsychroError> {
        Self::from_relative_humidity(
            Pressure::new::<pascal>(crate::constants::STANDARD_ATMOSPHERE_PA),
            temperature,
            relative_humidity,
        )
    }

    pub fn from_relative_humidity(
        pressure: Pressure,
        temperature: Temperature,
        relative_humidity: Ratio,
    ) -> Result<Self, PsychroError> {
        let t_c = temperature.get::<degree_celsius>();
        let p_pa = pressure.get::<pascal>();
        let rh = relative_humidity.get::<ratio>();
        let x = eq::humidity_ratio_from_relative_humidity(t_c, rh, p_pa);
        Self::new(p_pa, t_c, x)
    }

    fn new(pressure_pa: f64, temperature_c: f64, humidity_ratio: f64) -> Result<Self, PsychroError> {
        if pressure_pa <= P_HUMID_AIR_MIN_PA {
            return Err(PsychroError::out_of_bounds(
                "pressure",
                pressure_pa,
                P_HUMID_AIR_MIN_PA,
                f64::INFINITY,
            ));
        }
        if !(T_HUMID_AIR_MIN_C..=T_HUMID_AIR_MAX_C).contains(&temperature_c) {
            return Err(PsychroError::out_of_bounds(
                "temperature",
                temperature_c,
                T_HUMID_AIR_MIN_C,
                T_HUMID_AIR_MAX_C,
            ));
        }
        if humidity_ratio < 0.0 {
            return Err(PsychroError::out_of_bounds(
                "humidity_ratio",
                humidity_ratio,
                0.0,
                f64::INFINITY,
            ));
        }

        let saturation_pressure_pa = eq::saturation_pressure_pa(temperature_c);
        let max_humidity_ratio = eq::max_humidity_ratio(saturation_pressure_pa, pressure_pa);
        let relative_humidity = eq::relative_humidity(temperature_c, humidity_ratio, pressure_pa);
        let wet_bulb_c = eq::wet_bulb_temperature(temperature_c, humidity_ratio, pressure_pa)?;
        let dew_point_c = eq::dew_point_temperature(humidity_ratio, pressure_pa)?;

        let vapour_state = if humidity_ratio <= max_humidity_ratio + SATURATION_EPSILON {
            if (humidity_ratio - max_humidity_ratio).abs() <= SATURATION_EPSILON {
                VapourState::Saturated
            } else {
                VapourState::Unsaturated
            }
        } else if temperature_c > 0.0 {
            VapourState::WaterFog
        } else {
            VapourState::IceFog
        };

        let dry_air = DryAir::of(
            Pressure::new::<pascal>(pressure_pa),
            Temperature::new::<degree_celsius>(temperature_c),
        )?;

        Ok(HumidAir {
            pressure_pa,
            temperature_c,
            humidity_ratio,
            density: eq::density_kg_per_m3(temperature_c, humidity_ratio, pressure_pa),
            saturation_pressure_pa,
            max_humidity_ratio,
            relative_humidity,
            wet_bulb_c,
            dew_point_c,
            specific_heat: eq::specific_heat_kj_per_kgk(humidity_ratio),
            specific_enthalpy: eq::specific_enthalpy_kj_per_kg(temperature_c, humidity_ratio),
            dynamic_viscosity: eq::dynamic_viscosity_pa_s(temperature_c, humidity_ratio),
            kinematic_viscosity: eq::kinematic_viscosity_m2_per_s(
                temperature_c,
                humidity_ratio,
                pressure_pa,
            ),
            thermal_conductivity: eq::thermal_conductivity_w_per_mk(temperature_c, humidity_ratio),
            thermal_diffusivity: eq::thermal_diffusivity_m2_per_s(
                temperature_c,
                humidity_ratio,
                pressure_pa,
            ),
            prandtl: eq::prandtl_number(temperature_c, humidity_ratio, pressure_pa),
            vapour_state,
            dry_air,
        })
    }

    pub fn with_temperature(&self, temperature: Temperature) -> Result<Self, PsychroError> {
        Self::new(self.pressure_pa, temperature.get::<degree_celsius>(), self.humidity_ratio)
    }

    pub fn with_humidity_ratio(&self, humidity_ratio: HumidityRatio) -> Result<Self, PsychroError> {
        Self::new(self.pressure_pa, self.temperature_c, humidity_ratio.get())
    }

    pub fn with_pressure(&self, pressure: Pressure) -> Result<Self, PsychroError> {
        Self::new(pressure.get::<pascal>(), self.temperature_c, self.humidity_ratio)
    }

    pub fn pressure(&self) -> Pressure {
        Pressure::new::<pascal>(self.pressure_pa)
    }

    pub fn temperature(&self) -> Temperature {
        Temperature::new::<degree_celsius>(self.temperature_c)
    }

    pub fn humidity_ratio(&self) -> HumidityRatio {
        HumidityRatio::new(self.humidity_ratio)
    }

    pub fn density(&self) -> Density {
        Density::new::<kilogram_per_cubic_meter>(self.density)
    }

    pub fn saturation_pressure(&self) -> Pressure {
        Pressure::new::<pascal>(self.saturation_pressure_pa)
    }

    pub fn max_humidity_ratio(&self) -> HumidityRatio {
        HumidityRatio::new(self.max_humidity_ratio)
    }

    pub fn relative_humidity(&self) -> Ratio {
        Ratio::new::<ratio>(self.relative_humidity)
    }

    pub fn relative_humidity_percent(&self) -> f64 {
        Ratio::new::<ratio>(self.relative_humidity).get::<percent>()
    }

    pub fn wet_bulb_temperature(&self) -> Temperature {
        Temperature::new::<degree_celsius>(self.wet_bulb_c)
    }

    pub fn dew_point_temperature(&self) -> Temperature {
        Temperature::new::<degree_celsius>(self.dew_point_c)
    }

    pub fn specific_heat(&self) -> SpecificHeat {
        SpecificHeat::new::<kilojoule_per_kilogram_kelvin>(self.specific_heat)
    }

    pub fn specific_enthalpy(&self) -> SpecificEnthalpy {
        SpecificEnthalpy::new::<kilojoule_per_kilogram>(self.specific_enthalpy)
    }

    /// Raw kJ/kg_da, used by process blocks' energy balances (spec §4.5).
    pub fn specific_enthalpy_kj_per_kg(&self) -> f64 {
        self.specific_enthalpy
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

    pub fn thermal_diffusivity_m2_per_s(&self) -> f64 {
        self.thermal_diffusivity
    }

    pub fn prandtl_number(&self) -> f64 {
        self.prandtl
    }

    pub fn vapour_state(&self) -> VapourState {
        self.vapour_state
    }

    pub fn dry_air_component(&self) -> DryAir {
        self.dry_air
    }

    pub fn is_equal_with_precision(&self, other: &Self, epsilon: f64) -> bool {
        self.pressure_pa.approx_eq(&other.pressure_pa, epsilon)
            && self.temperature_c.approx_eq(&other.temperature_c, epsilon)
            && self.humidity_ratio.approx_eq(&other.humidity_ratio, epsilon)
    }

    pub fn to_console_output(&self) -> String {
        format!(
            "HumidAir(P={:.0} Pa, t={:.2} °C, x={:.6} kg/kg, RH={:.1}%, i={:.2} kJ/kg, {:?})",
            self.pressure_pa,
            self.temperature_c,
            self.humidity_ratio,
            self.relative_humidity * 100.0,
            self.specific_enthalpy,
            self.vapour_state
        )
    }
}

impl std::fmt::Display for HumidAir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_console_output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn baseline_scenario_matches_spec_reference_values() {
        let air = HumidAir::from_relative_humidity(
            Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(20.0),
            Ratio::new::<ratio>(0.5),
        )
        .unwrap();
        assert_relative_eq!(air.humidity_ratio().get(), 0.007261881, max_relative = 0.002);
        assert_relative_eq!(
            air.density().get::<kilogram_per_cubic_meter>(),
            1.1992,
            max_relative = 0.002
        );
        assert_relative_eq!(air.saturation_pressure().get::<pascal>(), 2338.80, max_relative = 0.001);
        assert_relative_eq!(air.specific_enthalpy_kj_per_kg(), 38.62, max_relative = 0.01);
    }

    #[test]
    fn zero_humidity_ratio_is_not_clamped() {
        let result = HumidAir::of(
            Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(20.0),
            HumidityRatio::new(0.0),
        );
        assert!(result.is_err(), "dew point is undefined at x = 0 and must surface as an error");
    }

    #[test]
    fn vapour_state_unsaturated_below_xmax() {
        let air = HumidAir::from_relative_humidity(
            Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(20.0),
            Ratio::new::<ratio>(0.5),
        )
        .unwrap();
        assert_eq!(air.vapour_state(), VapourState::Unsaturated);
    }

    #[test]
    fn vapour_state_saturated_at_100_percent_rh() {
        let air = HumidAir::from_relative_humidity(
            Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(20.0),
            Ratio::new::<ratio>(1.0),
        )
        .unwrap();
        assert_eq!(air.vapour_state(), VapourState::Saturated);
    }

    #[test]
    fn rejects_pressure_below_50_kpa() {
        let result = HumidAir::of(
            Pressure::new::<pascal>(40_000.0),
            Temperature::new::<degree_celsius>(20.0),
            HumidityRatio::new(0.008),
        );
        assert!(result.is_err());
    }

    #[test]
    fn humidity_ratio_never_exceeds_max_by_more_than_epsilon() {
        for &t in &[-30.0, 0.0, 20.0, 50.0, 90.0] {
            let air = HumidAir::from_relative_humidity(
                Pressure::new::<pascal>(101_325.0),
                Temperature::new::<degree_celsius>(t),
                Ratio::new::<ratio>(1.0),
            )
            .unwrap();
            assert!(air.humidity_ratio().get() <= air.max_humidity_ratio().get() + 1e-9);
        }
    }
}
