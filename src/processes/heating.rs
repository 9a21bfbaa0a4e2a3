//! Heating block — FROM_POWER / FROM_TEMPERATURE / FROM_HUMIDITY (spec §4.5.1).
//!
//! Generalizes the teacher's `MoistAir::heating_t1`/`heating_dt`/`heating_q`, which
//! mutate `self` in place with a closed-form linearised `dt` estimate. This block
//! instead produces a fresh [`FlowOfHumidAir`] and inverts the exact enthalpy/RH
//! correlations via [`crate::solver::BrentSolver`] (spec §4.1), since heating's energy
//! balance is exact here rather than approximated.

use std::rc::Rc;

use crate::connector::{BlockState, InputConnector, OutputConnector, Processable};
use crate::equations::humid_air as eq;
use crate::error::PsychroError;
use crate::fluids::HumidAir;
use crate::flows::FlowOfHumidAir;
use crate::processes::{ProcessMode, ProcessResult, ProcessType};
use crate::units::{degree_celsius, pascal, ratio, watt, Power, Ratio, Temperature};

#[derive(Debug, Clone, Copy)]
pub enum HeatingMode {
    FromPower(Power),
    FromTemperature(Temperature),
    /// Target relative humidity, as a fraction (must be ≤ inlet RH; heating only
    /// reduces RH — spec §4.5.1).
    FromHumidity(Ratio),
}

pub struct Heating {
    mode: HeatingMode,
    input_connector: InputConnector<FlowOfHumidAir>,
    output_connector: Rc<OutputConnector<FlowOfHumidAir>>,
    state: BlockState,
}

impl Heating {
    pub fn of(mode: HeatingMode) -> Self {
        Heating {
            mode,
            input_connector: InputConnector::new(),
            output_connector: OutputConnector::new(),
            state: BlockState::Uninitialized,
        }
    }

    fn compute(&self, inlet: FlowOfHumidAir) -> Result<ProcessResult, PsychroError> {
        let g_da = inlet.dry_air_mass_flow_kg_per_s();
        let fluid_in = inlet.fluid();
        let x_in = fluid_in.humidity_ratio().get();
        let t_in_c = fluid_in.temperature().get::<degree_celsius>();
        let i_in = fluid_in.specific_enthalpy_kj_per_kg();
        let pressure = fluid_in.pressure();
        let pressure_pa = pressure.get::<pascal>();

        let (t_out_c, heat_watt) = match self.mode {
            HeatingMode::FromPower(q) => {
                let q_watt = q.get::<watt>();
                if q_watt < 0.0 {
                    return Err(PsychroError::IncompatibleState(
                        "heating power must be >= 0".to_string(),
                    ));
                }
                if q_watt == 0.0 {
                    (t_in_c, 0.0)
                } else {
                    let i_out = i_in + (q_watt / 1000.0) / g_da;
                    let t_out = eq::dry_bulb_temperature_from_enthalpy(i_out, x_in)?;
                    (t_out, q_watt)
                }
            }
            HeatingMode::FromTemperature(t_out) => {
                let t_out_c = t_out.get::<degree_celsius>();
                if t_out_c < t_in_c {
                    return Err(PsychroError::IncompatibleState(format!(
                        "heating target {t_out_c} °C is below inlet {t_in_c} °C"
                    )));
                }
                let i_out = eq::specific_enthalpy_kj_per_kg(t_out_c, x_in);
                (t_out_c, g_da * (i_out - i_in) * 1000.0)
            }
            HeatingMode::FromHumidity(rh_target) => {
                let rh_target = rh_target.get::<ratio>();
                let rh_in = fluid_in.relative_humidity().get::<ratio>();
                if rh_target > rh_in {
                    return Err(PsychroError::IncompatibleState(format!(
                        "heating target RH {rh_target} exceeds inlet RH {rh_in}"
                    )));
                }
                let t_out_c =
                    eq::dry_bulb_temperature_for_relative_humidity(x_in, rh_target, pressure_pa)?;
                let i_out = eq::specific_enthalpy_kj_per_kg(t_out_c, x_in);
                (t_out_c, g_da * (i_out - i_in) * 1000.0)
            }
        };

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
            process_type: ProcessType::Heating,
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

impl Processable for Heating {
    fn input_connector(&self) -> &InputConnector<FlowOfHumidAir> {
        &self.input_connector
    }

    fn output_connector(&self) -> &Rc<OutputConnector<FlowOfHumidAir>> {
        &self.output_connector
    }

    fn process_type(&self) -> ProcessType {
        ProcessType::Heating
    }

    fn process_mode(&self) -> ProcessMode {
        match self.mode {
            HeatingMode::FromPower(_) => ProcessMode::FromPower,
            HeatingMode::FromTemperature(_) => ProcessMode::FromTemperature,
            HeatingMode::FromHumidity(_) => ProcessMode::FromHumidity,
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
        let result = self
            .compute(inlet)
            .map_err(|e| e.in_process("Heating"))?;
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
    use crate::units::{kilogram_per_second, MassFlow};
    use approx::assert_relative_eq;

    fn inlet_flow() -> FlowOfHumidAir {
        let fluid = HumidAir::from_relative_humidity(
            crate::units::Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(-20.0),
            Ratio::new::<ratio>(0.95),
        )
        .unwrap();
        FlowOfHumidAir::of(fluid, MassFlow::new::<kilogram_per_second>(1.6)).unwrap()
    }

    #[test]
    fn from_temperature_conserves_humidity_ratio() {
        let mut block = Heating::of(HeatingMode::FromTemperature(Temperature::new::<degree_celsius>(18.0)));
        block.input_connector().set_value(inlet_flow());
        let result = block.run().unwrap();
        assert_relative_eq!(
            result.outlet_air_flow.fluid().humidity_ratio().get(),
            result.inlet_air_flow.fluid().humidity_ratio().get(),
            max_relative = 1e-9
        );
        assert!(result.heat_of_process.get::<watt>() > 0.0);
    }

    #[test]
    fn rejects_target_below_inlet_temperature() {
        let mut block = Heating::of(HeatingMode::FromTemperature(Temperature::new::<degree_celsius>(-30.0)));
        block.input_connector().set_value(inlet_flow());
        assert!(block.run().is_err());
    }

    #[test]
    fn zero_power_returns_inlet_unchanged() {
        let mut block = Heating::of(HeatingMode::FromPower(Power::new::<watt>(0.0)));
        block.input_connector().set_value(inlet_flow());
        let result = block.run().unwrap();
        assert_relative_eq!(
            result.outlet_air_flow.fluid().temperature().get::<degree_celsius>(),
            result.inlet_air_flow.fluid().temperature().get::<degree_celsius>()
        );
    }
}
