//! Mixing block — SIMPLE_MIXING (two streams) and MULTIPLE_MIXING (N ≥ 2
//! recirculation streams plus the primary inlet) (spec §4.5.4).
//!
//! No teacher method mixes streams at all; this is built directly from the spec's
//! mass-weighted formulas. Mixing has no single-stream "process power" (heat of
//! process is always zero) and needs more than one inflow, so the extra streams
//! travel as a plain `Vec` set at construction rather than through the
//! pull connector graph — the primary inlet still arrives via the usual
//! `InputConnector` so `Mixing` composes with the rest of the block graph exactly
//! like every other block.

use std::rc::Rc;

use crate::connector::{BlockState, InputConnector, OutputConnector, Processable};
use crate::equations::humid_air as eq;
use crate::error::PsychroError;
use crate::fluids::HumidAir;
use crate::flows::FlowOfHumidAir;
use crate::processes::{ProcessMode, ProcessResult, ProcessType};
use crate::units::{
    degree_celsius, kilogram_per_second, pascal, watt, MassFlow, Power, Pressure, Temperature,
};

const PRESSURE_EPSILON_PA: f64 = 1.0;

pub struct Mixing {
    recirculation_flows: Vec<FlowOfHumidAir>,
    input_connector: InputConnector<FlowOfHumidAir>,
    output_connector: Rc<OutputConnector<FlowOfHumidAir>>,
    state: BlockState,
}

impl Mixing {
    /// SIMPLE_MIXING: the primary inlet (via the connector graph) plus exactly one
    /// other stream.
    pub fn simple_mixing(other: FlowOfHumidAir) -> Self {
        Mixing {
            recirculation_flows: vec![other],
            input_connector: InputConnector::new(),
            output_connector: OutputConnector::new(),
            state: BlockState::Uninitialized,
        }
    }

    /// MULTIPLE_MIXING: the primary inlet plus `recirculation_flows.len()` ≥ 2
    /// additional streams.
    pub fn multiple_mixing(recirculation_flows: Vec<FlowOfHumidAir>) -> Result<Self, PsychroError> {
        if recirculation_flows.len() < 2 {
            return Err(PsychroError::MissingArgument(
                "multiple_mixing requires at least two recirculation flows",
            ));
        }
        Ok(Mixing {
            recirculation_flows,
            input_connector: InputConnector::new(),
            output_connector: OutputConnector::new(),
            state: BlockState::Uninitialized,
        })
    }

    fn compute(&self, inlet: FlowOfHumidAir) -> Result<ProcessResult, PsychroError> {
        let pressure_pa = inlet.fluid().pressure().get::<pascal>();
        for stream in &self.recirculation_flows {
            let other_pa = stream.fluid().pressure().get::<pascal>();
            if (other_pa - pressure_pa).abs() > PRESSURE_EPSILON_PA {
                return Err(PsychroError::IncompatibleState(format!(
                    "mixing streams at different pressures: {pressure_pa} Pa vs {other_pa} Pa"
                )));
            }
        }

        let mut g_da_out = 0.0;
        let mut x_weighted = 0.0;
        let mut i_weighted = 0.0;
        for stream in std::iter::once(&inlet).chain(self.recirculation_flows.iter()) {
            let g_da = stream.dry_air_mass_flow_kg_per_s();
            let fluid = stream.fluid();
            g_da_out += g_da;
            x_weighted += g_da * fluid.humidity_ratio().get();
            i_weighted += g_da * fluid.specific_enthalpy_kj_per_kg();
        }
        let x_out = x_weighted / g_da_out;
        let i_out = i_weighted / g_da_out;
        let t_out_c = eq::dry_bulb_temperature_from_enthalpy(i_out, x_out)?;

        let fluid_out = HumidAir::of(
            Pressure::new::<pascal>(pressure_pa),
            Temperature::new::<degree_celsius>(t_out_c),
            crate::units::HumidityRatio::new(x_out),
        )?;
        let outlet = FlowOfHumidAir::of_dry_air_basis(
            fluid_out,
            MassFlow::new::<kilogram_per_second>(g_da_out),
        )?;

        Ok(ProcessResult {
            process_type: ProcessType::Mixing,
            process_mode: self.process_mode(),
            inlet_air_flow: inlet,
            outlet_air_flow: outlet,
            heat_of_process: Power::new::<watt>(0.0),
            condensate_flow: None,
            bypass_factor: None,
            recirculation_flows: self.recirculation_flows.clone(),
        })
    }
}

impl Processable for Mixing {
    fn input_connector(&self) -> &InputConnector<FlowOfHumidAir> {
        &self.input_connector
    }

    fn output_connector(&self) -> &Rc<OutputConnector<FlowOfHumidAir>> {
        &self.output_connector
    }

    fn process_type(&self) -> ProcessType {
        ProcessType::Mixing
    }

    fn process_mode(&self) -> ProcessMode {
        if self.recirculation_flows.len() == 1 {
            ProcessMode::SimpleMixing
        } else {
            ProcessMode::MultipleMixing
        }
    }

    fn state(&self) -> BlockState {
        self.state
    }

    fn run(&mut self) -> Result<ProcessResult, PsychroError> {
        self.input_connector.refresh();
        let inlet = self
            .input_connector
            .get_value()
            .ok_or(PsychroError::MissingArgument("air_flow_data_source"))?;
        let result = self.compute(inlet).map_err(|e| e.in_process("Mixing"))?;
        self.output_connector.set_value(result.outlet_air_flow);
        self.state = BlockState::LastRunValid;
        Ok(result)
    }

    fn reset_process(&mut self) {
        self.output_connector.clear();
        self.state = BlockState::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{ratio, Ratio};
    use approx::assert_relative_eq;

    fn flow(t_c: f64, rh: f64) -> FlowOfHumidAir {
        let fluid = HumidAir::from_relative_humidity(
            Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(t_c),
            Ratio::new::<ratio>(rh),
        )
        .unwrap();
        FlowOfHumidAir::of(fluid, MassFlow::new::<kilogram_per_second>(1.5)).unwrap()
    }

    #[test]
    fn simple_mixing_conserves_dry_air_mass_flow() {
        let a = flow(-20.0, 1.0);
        let b = flow(15.0, 0.3);
        let mut block = Mixing::simple_mixing(b);
        block.input_connector().set_value(a);
        let result = block.run().unwrap();
        let expected = a.dry_air_mass_flow_kg_per_s() + b.dry_air_mass_flow_kg_per_s();
        assert_relative_eq!(
            result.outlet_air_flow.dry_air_mass_flow_kg_per_s(),
            expected,
            max_relative = 1e-9
        );
        assert_eq!(result.heat_of_process.get::<watt>(), 0.0);
    }

    #[test]
    fn mixing_is_commutative() {
        let a = flow(-20.0, 1.0);
        let b = flow(15.0, 0.3);

        let mut ab = Mixing::simple_mixing(b);
        ab.input_connector().set_value(a);
        let result_ab = ab.run().unwrap();

        let mut ba = Mixing::simple_mixing(a);
        ba.input_connector().set_value(b);
        let result_ba = ba.run().unwrap();

        assert_relative_eq!(
            result_ab.outlet_air_flow.fluid().temperature().get::<degree_celsius>(),
            result_ba.outlet_air_flow.fluid().temperature().get::<degree_celsius>(),
            max_relative = 1e-9
        );
        assert_relative_eq!(
            result_ab.outlet_air_flow.fluid().humidity_ratio().get(),
            result_ba.outlet_air_flow.fluid().humidity_ratio().get(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn rejects_mismatched_pressures() {
        let a_fluid = HumidAir::from_relative_humidity(
            Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(20.0),
            Ratio::new::<ratio>(0.5),
        )
        .unwrap();
        let a = FlowOfHumidAir::of(a_fluid, MassFlow::new::<kilogram_per_second>(1.0)).unwrap();
        let b_fluid = HumidAir::from_relative_humidity(
            Pressure::new::<pascal>(95_000.0),
            Temperature::new::<degree_celsius>(20.0),
            Ratio::new::<ratio>(0.5),
        )
        .unwrap();
        let b = FlowOfHumidAir::of(b_fluid, MassFlow::new::<kilogram_per_second>(1.0)).unwrap();
        let mut block = Mixing::simple_mixing(b);
        block.input_connector().set_value(a);
        assert!(block.run().is_err());
    }
}
