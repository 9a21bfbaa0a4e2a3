//! `FlowOfHumidAir` — a [`HumidAir`] snapshot paired with a mass flow, plus the
//! dry-air-basis figures every process block actually balances on (spec §3, §4.4).
//!
//! Factory constructors accept either basis; both normalise to the humid-air basis
//! internally so `mass_flow()` always means the same thing regardless of which
//! constructor a caller used.

use crate::equations::flow;
use crate::error::PsychroError;
use crate::fluids::HumidAir;
use crate::units::{
    cubic_meter_per_second, kilogram_per_cubic_meter, kilogram_per_second, MassFlow,
    VolumetricFlow,
};

#[derive(Debug, Clone, Copy)]
pub struct FlowOfHumidAir {
    fluid: HumidAir,
    mass_flow_kg_per_s: f64,
    volumetric_flow_m3_per_s: f64,
    dry_air_mass_flow_kg_per_s: f64,
    dry_air_volumetric_flow_m3_per_s: f64,
}

impl FlowOfHumidAir {
    /// Construct from a humid-air-basis mass flow (spec §6: `FlowOfHumidAir::of`).
    pub fn of(fluid: HumidAir, mass_flow: MassFlow) -> Result<Self, PsychroError> {
        Self::from_humid_air_mass_flow_kg_per_s(fluid, mass_flow.get::<kilogram_per_second>())
    }

    /// Construct from a dry-air-basis mass flow (spec §4.4: factory accepting either basis).
    pub fn of_dry_air_basis(fluid: HumidAir, dry_air_mass_flow: MassFlow) -> Result<Self, PsychroError> {
        let x = fluid.humidity_ratio().get();
        let humid_air_basis = flow::humid_air_mass_flow_kg_per_s(
            dry_air_mass_flow.get::<kilogram_per_second>(),
            x,
        );
        Self::from_humid_air_mass_flow_kg_per_s(fluid, humid_air_basis)
    }

    fn from_humid_air_mass_flow_kg_per_s(
        fluid: HumidAir,
        mass_flow_kg_per_s: f64,
    ) -> Result<Self, PsychroError> {
        if mass_flow_kg_per_s <= 0.0 {
            return Err(PsychroError::out_of_bounds(
                "mass_flow",
                mass_flow_kg_per_s,
                0.0,
                f64::INFINITY,
            ));
        }
        let x = fluid.humidity_ratio().get();
        let density = fluid.density().get::<kilogram_per_cubic_meter>();
        let dry_air_mass_flow_kg_per_s = flow::dry_air_mass_flow_kg_per_s(mass_flow_kg_per_s, x);
        let dry_air_density = fluid
            .dry_air_component()
            .density()
            .get::<kilogram_per_cubic_meter>();

        Ok(FlowOfHumidAir {
            fluid,
            mass_flow_kg_per_s,
            volumetric_flow_m3_per_s: flow::volumetric_flow_m3_per_s(mass_flow_kg_per_s, density),
            dry_air_mass_flow_kg_per_s,
            dry_air_volumetric_flow_m3_per_s: flow::volumetric_flow_m3_per_s(
                dry_air_mass_flow_kg_per_s,
                dry_air_density,
            ),
        })
    }

    pub fn with_mass_flow(&self, mass_flow: MassFlow) -> Result<Self, PsychroError> {
        Self::of(self.fluid, mass_flow)
    }

    pub fn with_fluid(&self, fluid: HumidAir) -> Result<Self, PsychroError> {
        Self::of(fluid, self.mass_flow())
    }

    pub fn fluid(&self) -> HumidAir {
        self.fluid
    }

    pub fn mass_flow(&self) -> MassFlow {
        MassFlow::new::<kilogram_per_second>(self.mass_flow_kg_per_s)
    }

    pub fn mass_flow_kg_per_s(&self) -> f64 {
        self.mass_flow_kg_per_s
    }

    pub fn volumetric_flow(&self) -> VolumetricFlow {
        VolumetricFlow::new::<cubic_meter_per_second>(self.volumetric_flow_m3_per_s)
    }

    pub fn dry_air_mass_flow(&self) -> MassFlow {
        MassFlow::new::<kilogram_per_second>(self.dry_air_mass_flow_kg_per_s)
    }

    pub fn dry_air_mass_flow_kg_per_s(&self) -> f64 {
        self.dry_air_mass_flow_kg_per_s
    }

    pub fn dry_air_volumetric_flow(&self) -> VolumetricFlow {
        VolumetricFlow::new::<cubic_meter_per_second>(self.dry_air_volumetric_flow_m3_per_s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{degree_celsius, pascal, ratio, Pressure, Ratio, Temperature};
    use approx::assert_relative_eq;

    fn sample_air() -> HumidAir {
        HumidAir::from_relative_humidity(
            Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(20.0),
            Ratio::new::<ratio>(0.5),
        )
        .unwrap()
    }

    #[test]
    fn mass_flow_basis_invariance() {
        let flow = FlowOfHumidAir::of(sample_air(), MassFlow::new::<kilogram_per_second>(1.5)).unwrap();
        let expected = flow.dry_air_mass_flow_kg_per_s() * (1.0 + flow.fluid().humidity_ratio().get());
        assert_relative_eq!(flow.mass_flow_kg_per_s(), expected, max_relative = 1e-9);
    }

    #[test]
    fn dry_air_basis_constructor_normalises_to_humid_air_basis() {
        let air = sample_air();
        let x = air.humidity_ratio().get();
        let g_da = 1.0;
        let flow = FlowOfHumidAir::of_dry_air_basis(air, MassFlow::new::<kilogram_per_second>(g_da))
            .unwrap();
        assert_relative_eq!(flow.dry_air_mass_flow_kg_per_s(), g_da, max_relative = 1e-9);
        assert_relative_eq!(flow.mass_flow_kg_per_s(), g_da * (1.0 + x), max_relative = 1e-9);
    }

    #[test]
    fn rejects_zero_mass_flow() {
        let result = FlowOfHumidAir::of(sample_air(), MassFlow::new::<kilogram_per_second>(0.0));
        assert!(result.is_err());
    }
}
