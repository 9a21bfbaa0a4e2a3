//! Dry cooling block — FROM_POWER / FROM_TEMPERATURE, no condensation (spec §4.5.2).
//!
//! Generalizes the teacher's `MoistAir::cooling_t1`/`cooling_dt`, which silently
//! re-saturate the state when the target drops below the dew point; this block
//! instead honours the spec's explicit rule that crossing the dew point invalidates
//! the dry-cooling assumption and the block must return the inlet unchanged rather
//! than simulate condensation itself (that belongs to [`crate::processes::Cooling`]).

use std::rc::Rc;

use crate::connector::{BlockState, InputConnector, OutputConnector, Processable};
use crate::equations::humid_air as eq;
use crate::error::PsychroError;
use crate::fluids::HumidAir;
use crate::flows::FlowOfHumidAir;
use crate::processes::{ProcessMode, ProcessResult, ProcessType};
use crate::units::{degree_celsius, pascal, watt, Power, Temperature};

#[derive(Debug, Clone, Copy)]
pub enum DryCoolingMode {
    FromPower(Power),
    FromTemperature(Temperature),
}

pub struct DryCooling {
    mode: DryCoolingMode,
    input_connector: InputConnector<FlowOfHumidAir>,
    output_connector: Rc<OutputConnector<FlowOfHumidAir>>,
    state: BlockState,
}

impl DryCooling {
    pub fn of(mode: DryCoolingMode) -> Self {
        DryCooling {
            mode,
            input_connector: InputConnector::new(),
            output_connector: OutputConnector::new(),
            state: BlockState::Uninitialized,
        }
    }

    fn unchanged(&self, inlet: FlowOfHumidAir) -> ProcessResult {
        ProcessResult {
            process_type: ProcessType::DryCooling,
            process_mode: self.process_mode(),
            inlet_air_flow: inlet,
            outlet_air_flow: inlet,
            heat_of_process: Power::new::<watt>(0.0),
            condensate_flow: None,
            bypass_factor: None,
            recirculation_flows: Vec::new(),
        }
    }

    fn compute(&self, inlet: FlowOfHumidAir) -> Result<ProcessResult, PsychroError> {
        let g_da = inlet.dry_air_mass_flow_kg_per_s();
        let fluid_in = inlet.fluid();
        let x_in = fluid_in.humidity_ratio().get();
        let t_in_c = fluid_in.temperature().get::<degree_celsius>();
        let i_in = fluid_in.specific_enthalpy_kj_per_kg();
        let pressure = fluid_in.pressure();
        let t_dew_point_c = fluid_in.dew_point_temperature().get::<degree_celsius>();

        let (t_out_c, heat_watt) = match self.mode {
            DryCoolingMode::FromPower(q) => {
                let q_watt = q.get::<watt>();
                if q_watt >= 0.0 {
                    return Ok(self.unchanged(inlet));
                }
                let i_out = i_in + (q_watt / 1000.0) / g_da;
                let t_out = eq::dry_bulb_temperature_from_enthalpy(i_out, x_in)?;
                (t_out, q_watt)
            }
            DryCoolingMode::FromTemperature(t_out) => {
                let t_out_c = t_out.get::<degree_celsius>();
                if t_out_c >= t_in_c {
                    return Err(PsychroError::IncompatibleState(format!(
                        "dry-cooling target {t_out_c} °C is not below inlet {t_in_c} °C"
                    )));
                }
                let i_out = eq::specific_enthalpy_kj_per_kg(t_out_c, x_in);
                (t_out_c, g_da * (i_out - i_in) * 1000.0)
            }
        };

        if t_out_c < t_dew_point_c {
            return Ok(self.unchanged(inlet));
        }

        let fluid_out = HumidAir::of(
            pressure,
            Temperature::new::<degree_celsius>(t_out_c),
            fluid_in.humidity_ratio(),
        )?;
        let outlet = FlowOfHumidAir::of_dry_air_basis(
            fluid_out,
            crate::units::MassFlow::new::<crate::units::kilogram_per_second>(g_da),
        )?;

        Ok(ProcessResult {
            process_type: ProcessType::DryCooling,
            process_mode: self.process_mode(),
            inlet_air_flow: inlet,
            outlet_air_flow: outlet,
            heat_of_process: Power::new::<watt>(heat_watt),
            condensate_flow: None,
            bypass_factor: None,
            recirculation_flows: Vec::new(),
        })
    }
}

impl Processable for DryCooling {
    fn input_connector(&self) -> &InputConnector<FlowOfHumidAir> {
        &self.input_connector
    }

    fn output_connector(&self) -> &Rc<OutputConnector<FlowOfHumidAir>> {
        &self.output_connector
    }

    fn process_type(&self) -> ProcessType {
        ProcessType::DryCooling
    }

    fn process_mode(&self) -> ProcessMode {
        match self.mode {
            DryCoolingMode::FromPower(_) => ProcessMode::FromPower,
            DryCoolingMode::FromTemperature(_) => ProcessMode::FromTemperature,
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
        let result = self.compute(inlet).map_err(|e| e.in_process("DryCooling"))?;
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
    use crate::units::{kilogram_per_second, ratio, MassFlow, Pressure, Ratio};

    fn inlet_flow(t_c: f64, rh: f64) -> FlowOfHumidAir {
        let fluid = HumidAir::from_relative_humidity(
            Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(t_c),
            Ratio::new::<ratio>(rh),
        )
        .unwrap();
        FlowOfHumidAir::of(fluid, MassFlow::new::<kilogram_per_second>(1.6)).unwrap()
    }

    #[test]
    fn invalid_target_below_dew_point_returns_inlet_unchanged() {
        let mut block = DryCooling::of(DryCoolingMode::FromTemperature(Temperature::new::<
            degree_celsius,
        >(5.0)));
        let inlet = inlet_flow(25.0, 0.6);
        block.input_connector().set_value(inlet);
        let result = block.run().unwrap();
        assert_eq!(
            result.outlet_air_flow.fluid().temperature().get::<degree_celsius>(),
            result.inlet_air_flow.fluid().temperature().get::<degree_celsius>()
        );
        assert_eq!(result.heat_of_process.get::<watt>(), 0.0);
    }

    #[test]
    fn valid_target_above_dew_point_cools_without_condensation() {
        let mut block = DryCooling::of(DryCoolingMode::FromTemperature(Temperature::new::<
            degree_celsius,
        >(20.0)));
        block.input_connector().set_value(inlet_flow(25.0, 0.3));
        let result = block.run().unwrap();
        assert!(result.heat_of_process.get::<watt>() < 0.0);
        assert_eq!(
            result.outlet_air_flow.fluid().humidity_ratio().get(),
            result.inlet_air_flow.fluid().humidity_ratio().get()
        );
    }

    #[test]
    fn rejects_target_above_inlet_temperature() {
        let mut block = DryCooling::of(DryCoolingMode::FromTemperature(Temperature::new::<
            degree_celsius,
        >(30.0)));
        block.input_connector().set_value(inlet_flow(25.0, 0.3));
        assert!(block.run().is_err());
    }
}
