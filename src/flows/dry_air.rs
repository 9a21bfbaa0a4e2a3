//! `FlowOfDryAir` — a [`DryAir`] snapshot paired with a mass flow (spec §3, §4.4).

use crate::error::PsychroError;
use crate::fluids::DryAir;
use crate::units::{cubic_meter_per_second, kilogram_per_second, MassFlow, VolumetricFlow};

/// Mass-flow validation ceiling shared by every flow entity (spec §3: `[0, 5e9] kg/s`).
const MAX_MASS_FLOW_KG_PER_S: f64 = 5e9;

#[derive(Debug, Clone, Copy)]
pub struct FlowOfDryAir {
    fluid: DryAir,
    mass_flow_kg_per_s: f64,
    volumetric_flow_m3_per_s: f64,
}

impl FlowOfDryAir {
    pub fn of(fluid: DryAir, mass_flow: MassFlow) -> Result<Self, PsychroError> {
        let mass_flow_kg_per_s = mass_flow.get::<kilogram_per_second>();
        if !(0.0..=MAX_MASS_FLOW_KG_PER_S).contains(&mass_flow_kg_per_s) {
            return Err(PsychroError::out_of_bounds(
                "mass_flow",
                mass_flow_kg_per_s,
                0.0,
                MAX_MASS_FLOW_KG_PER_S,
            ));
        }
        let density = fluid.density().get::<crate::units::kilogram_per_cubic_meter>();
        Ok(FlowOfDryAir {
            fluid,
            mass_flow_kg_per_s,
            volumetric_flow_m3_per_s: crate::equations::flow::volumetric_flow_m3_per_s(
                mass_flow_kg_per_s,
                density,
            ),
        })
    }

    pub fn with_mass_flow(&self, mass_flow: MassFlow) -> Result<Self, PsychroError> {
        Self::of(self.fluid, mass_flow)
    }

    pub fn with_fluid(&self, fluid: DryAir) -> Result<Self, PsychroError> {
        Self::of(fluid, self.mass_flow())
    }

    pub fn fluid(&self) -> DryAir {
        self.fluid
    }

    pub fn mass_flow(&self) -> MassFlow {
        MassFlow::new::<kilogram_per_second>(self.mass_flow_kg_per_s)
    }

    pub fn volumetric_flow(&self) -> VolumetricFlow {
        VolumetricFlow::new::<cubic_meter_per_second>(self.volumetric_flow_m3_per_s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{degree_celsius, pascal};
    use crate::units::{Pressure, Temperature};
    use approx::assert_relative_eq;

    #[test]
    fn volumetric_flow_derived_from_density() {
        let fluid = DryAir::of(
            Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(20.0),
        )
        .unwrap();
        let flow = FlowOfDryAir::of(fluid, MassFlow::new::<kilogram_per_second>(1.2)).unwrap();
        let expected = 1.2 / fluid.density().get::<crate::units::kilogram_per_cubic_meter>();
        assert_relative_eq!(
            flow.volumetric_flow().get::<cubic_meter_per_second>(),
            expected
        );
    }

    #[test]
    fn rejects_negative_mass_flow() {
        let fluid = DryAir::of(
            Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(20.0),
        )
        .unwrap();
        let result = FlowOfDryAir::of(fluid, MassFlow::new::<kilogram_per_second>(-1.0));
        assert!(result.is_err());
    }
}
