//! `FlowOfWaterVapour` — steam mass flow paired with a [`WaterVapour`] snapshot,
//! used by the humidification block (spec §4.5.5).

use crate::error::PsychroError;
use crate::fluids::WaterVapour;
use crate::units::{cubic_meter_per_second, kilogram_per_second, MassFlow, VolumetricFlow};

#[derive(Debug, Clone, Copy)]
pub struct FlowOfWaterVapour {
    fluid: WaterVapour,
    mass_flow_kg_per_s: f64,
    volumetric_flow_m3_per_s: f64,
}

impl FlowOfWaterVapour {
    pub fn of(fluid: WaterVapour, mass_flow: MassFlow) -> Result<Self, PsychroError> {
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
        Ok(FlowOfWaterVapour {
            fluid,
            mass_flow_kg_per_s,
            volumetric_flow_m3_per_s: crate::equations::flow::volumetric_flow_m3_per_s(
                mass_flow_kg_per_s,
                density,
            ),
        })
    }

    pub fn fluid(&self) -> WaterVapour {
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
