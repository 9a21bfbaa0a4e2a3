//! Humidification block — steam injection (spec §4.5.5).
//!
//! No teacher method injects steam directly; this follows the same energy-balance
//! shape as [`crate::processes::Heating`] (conserve dry-air mass, solve for `t_out`
//! by Brent-inverting the enthalpy correlation) with the added humidity-ratio term
//! a steam mass flow contributes.

use std::rc::Rc;

use crate::connector::{BlockState, InputConnector, OutputConnector, Processable};
use crate::equations::humid_air as eq;
use crate::equations::water_vapour as water_vapour_eq;
use crate::error::PsychroError;
use crate::fluids::HumidAir;
use crate::flows::{FlowOfHumidAir, FlowOfWaterVapour};
use crate::processes::{ProcessMode, ProcessResult, ProcessType};
use crate::units::{degree_celsius, watt, Power, Temperature};

pub struct Humidification {
    steam: FlowOfWaterVapour,
    input_connector: InputConnector<FlowOfHumidAir>,
    output_connector: Rc<OutputConnector<FlowOfHumidAir>>,
    state: BlockState,
}

impl Humidification {
    pub fn of(steam: FlowOfWaterVapour) -> Self {
        Humidification {
            steam,
            input_connector: InputConnector::new(),
            output_connector: OutputConnector::new(),
            state: BlockState::Uninitialized,
        }
    }

    fn compute(&self, inlet: FlowOfHumidAir) -> Result<ProcessResult, PsychroError> {
        let g_da = inlet.dry_air_mass_flow_kg_per_s();
        let fluid_in = inlet.fluid();
        let x_in = fluid_in.humidity_ratio().get();
        let i_in = fluid_in.specific_enthalpy_kj_per_kg();
        let pressure = fluid_in.pressure();

        let m_steam = self.steam.mass_flow_kg_per_s();
        let t_steam_c = self.steam.fluid().temperature().get::<degree_celsius>();
        let i_steam = water_vapour_eq::specific_enthalpy_kj_per_kg(t_steam_c);

        let x_out = x_in + m_steam / g_da;
        let i_out = i_in + (m_steam / g_da) * i_steam;
        let t_out_c = eq::dry_bulb_temperature_from_enthalpy(i_out, x_out)?;
        let heat_watt = g_da * (i_out - i_in) * 1000.0;

        let fluid_out = HumidAir::of(
            pressure,
            Temperature::new::<degree_celsius>(t_out_c),
            crate::units::HumidityRatio::new(x_out),
        )?;
        let outlet = FlowOfHumidAir::of_dry_air_basis(
            fluid_out,
            crate::units::MassFlow::new::<crate::units::kilogram_per_second>(g_da),
        )?;

        Ok(ProcessResult {
            process_type: ProcessType::Humidification,
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

impl Processable for Humidification {
    fn input_connector(&self) -> &InputConnector<FlowOfHumidAir> {
        &self.input_connector
    }

    fn output_connector(&self) -> &Rc<OutputConnector<FlowOfHumidAir>> {
        &self.output_connector
    }

    fn process_type(&self) -> ProcessType {
        ProcessType::Humidification
    }

    fn process_mode(&self) -> ProcessMode {
        ProcessMode::SteamInjection
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
            .map_err(|e| e.in_process("Humidification"))?;
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
    use crate::fluids::WaterVapour;
    use crate::units::{kilogram_per_second, pascal, ratio, MassFlow, Pressure, Ratio};
    use approx::assert_relative_eq;

    fn inlet_flow() -> FlowOfHumidAir {
        let fluid = HumidAir::from_relative_humidity(
            Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(10.0),
            Ratio::new::<ratio>(0.2),
        )
        .unwrap();
        FlowOfHumidAir::of(fluid, MassFlow::new::<kilogram_per_second>(2.0)).unwrap()
    }

    fn steam_flow(mass_flow_kg_per_s: f64) -> FlowOfWaterVapour {
        let vapour = WaterVapour::of(
            Pressure::new::<pascal>(101_325.0),
            Temperature::new::<degree_celsius>(100.0),
        )
        .unwrap();
        FlowOfWaterVapour::of(
            vapour,
            MassFlow::new::<kilogram_per_second>(mass_flow_kg_per_s),
        )
        .unwrap()
    }

    #[test]
    fn steam_injection_raises_humidity_ratio() {
        let mut block = Humidification::of(steam_flow(0.002));
        let inlet = inlet_flow();
        block.input_connector().set_value(inlet);
        let result = block.run().unwrap();
        assert!(
            result.outlet_air_flow.fluid().humidity_ratio().get()
                > result.inlet_air_flow.fluid().humidity_ratio().get()
        );
    }

    #[test]
    fn dry_air_mass_flow_is_conserved() {
        let mut block = Humidification::of(steam_flow(0.002));
        let inlet = inlet_flow();
        block.input_connector().set_value(inlet);
        let result = block.run().unwrap();
        assert_relative_eq!(
            result.outlet_air_flow.dry_air_mass_flow_kg_per_s(),
            result.inlet_air_flow.dry_air_mass_flow_kg_per_s(),
            max_relative = 1e-9
        );
    }
}
