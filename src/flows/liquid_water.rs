//! `FlowOfLiquidWater` — condensate or injected-steam mass flow paired with a
//! [`LiquidWater`] snapshot (spec §3, §4.4).

use crate::error::PsychroError;
use crate::fluids::LiquidWater;
use crate::units::{cubic_meter_per_second, kilogram_per_second, MassFlow, VolumetricFlow};

#[derive(Debug, Clone, Copy)]
pub struct FlowOfLiquidWater {
    fluid: LiquidWater,
    mass_flow_kg_per_s: f64,
    volumetric_flow_m3_per_s: f64,
}

impl FlowOfLiquidWater {
    pub fn of(fluid: LiquidWater, mass_flow: MassFlow) -> Result<Self, PsychroError> {
        let mass_flow_kg_per_s = mass_flow.get::<kilogram_per_second>();
        if mass_flow_kg_per_s < 0.0 {
            return Err(PsychroError::out_of_bounds(
                "mass_flow",
                mass_flow_kg_per_s,
                0.0,
                f64::INFINITY,
            ));
        }
        let density = fluid.density().get::<crate::units::kilogram_per_cubic_meter>();
        Ok(FlowOfLiquidWater {
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

    pub fn fluid(&self) -> LiquidWater {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{degree_celsius, pascal, Pressure, Temperature};

    #[test]
    fn zero_flow_is_valid() {
        let fluid = LiquidWater::of(
            Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(9.0),
        )
        .unwrap();
        let flow = FlowOfLiquidWater::of(fluid, MassFlow::new::<kilogram_per_second>(0.0)).unwrap();
        assert_eq!(flow.mass_flow_kg_per_s(), 0.0);
    }
}
