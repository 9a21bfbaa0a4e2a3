//! Cooling block — bypass-factor contact-surface model with condensation
//! (spec §4.5.3). The psychrometrically hardest block in the engine.
//!
//! No teacher method models a contact coil explicitly; the closest analogue is
//! `MoistAir::cooling_q`'s dew-point branch, which re-saturates the state once the
//! target enthalpy implies condensation but never reports a condensate flow or a
//! bypass factor. This block generalizes that branch into the explicit two-fraction
//! mixing model the spec describes: part of the stream bypasses the coil unchanged,
//! the rest leaves saturated at the coil surface temperature, and the reported
//! outlet is the mass-weighted blend of the two. All three modes share one Brent
//! solve over the candidate outlet dry-bulb temperature (DESIGN.md Open Questions:
//! the self-consistency loop between the candidate and the enthalpy-derived actual
//! outlet temperature is what the solver closes).

use std::rc::Rc;

use log::warn;

use crate::connector::{BlockState, InputConnector, OutputConnector, Processable};
use crate::equations::humid_air as eq;
use crate::error::PsychroError;
use crate::fluids::{HumidAir, LiquidWater};
use crate::flows::{FlowOfHumidAir, FlowOfLiquidWater};
use crate::processes::{ProcessMode, ProcessResult, ProcessType};
use crate::solver::BrentSolver;
use crate::units::{
    degree_celsius, kilogram_per_second, pascal, ratio, watt, BypassFactor, MassFlow, Power,
    Ratio, Temperature,
};

#[derive(Debug, Clone, Copy)]
pub enum CoolingMode {
    /// Cooling power, watts. Must be negative (spec §4.5.3 validation).
    FromPower(Power),
    FromTemperature(Temperature),
    FromHumidity(Ratio),
}

pub struct Cooling {
    coil_surface_temperature: Temperature,
    mode: CoolingMode,
    input_connector: InputConnector<FlowOfHumidAir>,
    output_connector: Rc<OutputConnector<FlowOfHumidAir>>,
    state: BlockState,
}

/// One evaluation of the bypass-factor mixing model at a candidate outlet
/// temperature: the bypass fraction it implies, the resulting mixed state, and the
/// enthalpy-consistent actual outlet temperature.
struct MixedState {
    bypass_factor_raw: f64,
    humidity_ratio_out: f64,
    specific_enthalpy_out: f64,
    actual_outlet_temperature_c: f64,
}

impl Cooling {
    pub fn of(coil_surface_temperature: Temperature, mode: CoolingMode) -> Self {
        Cooling {
            coil_surface_temperature,
            mode,
            input_connector: InputConnector::new(),
            output_connector: OutputConnector::new(),
            state: BlockState::Uninitialized,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn mixed_state(
        t_out_candidate_c: f64,
        t_in_c: f64,
        t_cs_c: f64,
        x_in: f64,
        i_in: f64,
        x_cs: f64,
        i_cs: f64,
    ) -> Result<MixedState, PsychroError> {
        let bypass_factor_raw = (t_out_candidate_c - t_cs_c) / (t_in_c - t_cs_c);
        let bypass_factor = bypass_factor_raw.clamp(0.0, 1.0);
        let humidity_ratio_out = bypass_factor * x_in + (1.0 - bypass_factor) * x_cs;
        let specific_enthalpy_out = bypass_factor * i_in + (1.0 - bypass_factor) * i_cs;
        let actual_outlet_temperature_c =
            eq::dry_bulb_temperature_from_enthalpy(specific_enthalpy_out, humidity_ratio_out)?;
        Ok(MixedState {
            bypass_factor_raw,
            humidity_ratio_out,
            specific_enthalpy_out,
            actual_outlet_temperature_c,
        })
    }

    fn compute(&self, inlet: FlowOfHumidAir) -> Result<ProcessResult, PsychroError> {
        let g_da = inlet.dry_air_mass_flow_kg_per_s();
        let fluid_in = inlet.fluid();
        let x_in = fluid_in.humidity_ratio().get();
        let t_in_c = fluid_in.temperature().get::<degree_celsius>();
        let i_in = fluid_in.specific_enthalpy_kj_per_kg();
        let pressure = fluid_in.pressure();
        let pressure_pa = pressure.get::<pascal>();

        let t_cs_c = self.coil_surface_temperature.get::<degree_celsius>();
        if t_cs_c < 0.0 {
            return Err(PsychroError::IncompatibleState(
                "coil surface temperature must be >= 0 °C".to_string(),
            ));
        }
        if t_cs_c >= t_in_c {
            return Err(PsychroError::IncompatibleState(format!(
                "coil surface temperature {t_cs_c} °C must be below inlet {t_in_c} °C"
            )));
        }

        let x_cs = eq::max_humidity_ratio(eq::saturation_pressure_pa(t_cs_c), pressure_pa);
        let i_cs = eq::specific_enthalpy_kj_per_kg(t_cs_c, x_cs);

        let residual = |t_candidate: f64, target: f64| -> Result<f64, PsychroError> {
            let mixed = Self::mixed_state(t_candidate, t_in_c, t_cs_c, x_in, i_in, x_cs, i_cs)?;
            Ok(mixed.actual_outlet_temperature_c - target)
        };

        let t_solution_c = match self.mode {
            CoolingMode::FromTemperature(t_out) => {
                let target_c = t_out.get::<degree_celsius>();
                if target_c >= t_in_c {
                    return Err(PsychroError::IncompatibleState(format!(
                        "cooling target {target_c} °C is not below inlet {t_in_c} °C"
                    )));
                }
                if target_c < t_cs_c {
                    return Err(PsychroError::IncompatibleState(format!(
                        "cooling target {target_c} °C is below coil surface temperature {t_cs_c} °C"
                    )));
                }
                let mut solver = BrentSolver::new();
                let mut err = None;
                let root = solver.calc_for_function_with_bracket(
                    |t| match residual(t, target_c) {
                        Ok(r) => r,
                        Err(e) => {
                            err = Some(e);
                            f64::NAN
                        }
                    },
                    t_cs_c,
                    t_in_c,
                )?;
                if let Some(e) = err {
                    return Err(e);
                }
                root
            }
            CoolingMode::FromPower(q) => {
                let q_watt = q.get::<watt>();
                if q_watt >= 0.0 {
                    return Err(PsychroError::IncompatibleState(
                        "cooling power must be negative".to_string(),
                    ));
                }
                let mut err = None;
                let mut solver = BrentSolver::new();
                let root = solver.calc_for_function_with_bracket(
                    |t| match Self::mixed_state(t, t_in_c, t_cs_c, x_in, i_in, x_cs, i_cs) {
                        Ok(mixed) => {
                            let m_cond =
                                g_da * (x_in - mixed.humidity_ratio_out).max(0.0);
                            let i_water =
                                crate::equations::liquid_water::specific_enthalpy_kj_per_kg(t_cs_c);
                            let q_model_watt = (g_da * (mixed.specific_enthalpy_out - i_in)
                                - m_cond * i_water)
                                * 1000.0;
                            q_model_watt - q_watt
                        }
                        Err(e) => {
                            err = Some(e);
                            f64::NAN
                        }
                    },
                    t_cs_c,
                    t_in_c,
                )?;
                if let Some(e) = err {
                    return Err(e);
                }
                root
            }
            CoolingMode::FromHumidity(rh) => {
                let rh_target = rh.get::<ratio>();
                let mut err = None;
                let mut solver = BrentSolver::new();
                let root = solver.calc_for_function_with_bracket(
                    |t| match Self::mixed_state(t, t_in_c, t_cs_c, x_in, i_in, x_cs, i_cs) {
                        Ok(mixed) => {
                            let rh_model = eq::relative_humidity(
                                mixed.actual_outlet_temperature_c,
                                mixed.humidity_ratio_out,
                                pressure_pa,
                            );
                            rh_model - rh_target
                        }
                        Err(e) => {
                            err = Some(e);
                            f64::NAN
                        }
                    },
                    t_cs_c,
                    t_in_c,
                )?;
                if let Some(e) = err {
                    return Err(e);
                }
                root
            }
        };

        let mixed = Self::mixed_state(t_solution_c, t_in_c, t_cs_c, x_in, i_in, x_cs, i_cs)?;
        if !(0.0..=1.0).contains(&mixed.bypass_factor_raw) {
            warn!(
                "cooling: bypass factor {} out of [0, 1], clamping",
                mixed.bypass_factor_raw
            );
        }

        let m_cond_kg_per_s = g_da * (x_in - mixed.humidity_ratio_out).max(0.0);
        let i_water = crate::equations::liquid_water::specific_enthalpy_kj_per_kg(t_cs_c);
        let heat_watt =
            (g_da * (mixed.specific_enthalpy_out - i_in) - m_cond_kg_per_s * i_water) * 1000.0;

        let fluid_out = HumidAir::of(
            pressure,
            Temperature::new::<degree_celsius>(mixed.actual_outlet_temperature_c),
            crate::units::HumidityRatio::new(mixed.humidity_ratio_out),
        )?;
        let outlet = FlowOfHumidAir::of_dry_air_basis(
            fluid_out,
            MassFlow::new::<kilogram_per_second>(g_da),
        )?;

        let condensate_flow = if m_cond_kg_per_s > 0.0 {
            let condensate_fluid =
                LiquidWater::of(pressure, Temperature::new::<degree_celsius>(t_cs_c))?;
            Some(FlowOfLiquidWater::of(
                condensate_fluid,
                MassFlow::new::<kilogram_per_second>(m_cond_kg_per_s),
            )?)
        } else {
            None
        };

        Ok(ProcessResult {
            process_type: ProcessType::Cooling,
            process_mode: self.process_mode(),
            inlet_air_flow: inlet,
            outlet_air_flow: outlet,
            heat_of_process: Power::new::<watt>(heat_watt),
            condensate_flow,
            bypass_factor: Some(BypassFactor::clamped(mixed.bypass_factor_raw)),
            recirculation_flows: Vec::new(),
        })
    }
}

impl Processable for Cooling {
    fn input_connector(&self) -> &InputConnector<FlowOfHumidAir> {
        &self.input_connector
    }

    fn output_connector(&self) -> &Rc<OutputConnector<FlowOfHumidAir>> {
        &self.output_connector
    }

    fn process_type(&self) -> ProcessType {
        ProcessType::Cooling
    }

    fn process_mode(&self) -> ProcessMode {
        match self.mode {
            CoolingMode::FromPower(_) => ProcessMode::FromPower,
            CoolingMode::FromTemperature(_) => ProcessMode::FromTemperature,
            CoolingMode::FromHumidity(_) => ProcessMode::FromHumidity,
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
        let result = self.compute(inlet).map_err(|e| e.in_process("Cooling"))?;
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
    use crate::units::Pressure;

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
    fn condensing_cooling_removes_heat_and_produces_condensate() {
        let mut block = Cooling::of(
            Temperature::new::<degree_celsius>(9.0),
            CoolingMode::FromTemperature(Temperature::new::<degree_celsius>(24.0)),
        );
        block.input_connector().set_value(inlet_flow(32.0, 0.5));
        let result = block.run().unwrap();
        assert!(result.heat_of_process.get::<watt>() < 0.0);
        assert!(result.condensate_flow.is_some());
        let bf = result.bypass_factor.unwrap().get();
        assert!((0.0..=1.0).contains(&bf));
        assert!(
            result.outlet_air_flow.fluid().relative_humidity().get::<ratio>()
                > result.inlet_air_flow.fluid().relative_humidity().get::<ratio>()
        );
    }

    #[test]
    fn rejects_coil_surface_temperature_above_inlet() {
        let mut block = Cooling::of(
            Temperature::new::<degree_celsius>(40.0),
            CoolingMode::FromTemperature(Temperature::new::<degree_celsius>(24.0)),
        );
        block.input_connector().set_value(inlet_flow(32.0, 0.5));
        assert!(block.run().is_err());
    }

    #[test]
    fn rejects_target_temperature_above_inlet() {
        let mut block = Cooling::of(
            Temperature::new::<degree_celsius>(9.0),
            CoolingMode::FromTemperature(Temperature::new::<degree_celsius>(40.0)),
        );
        block.input_connector().set_value(inlet_flow(32.0, 0.5));
        assert!(block.run().is_err());
    }

    #[test]
    fn rejects_target_temperature_below_coil_surface() {
        let mut block = Cooling::of(
            Temperature::new::<degree_celsius>(9.0),
            CoolingMode::FromTemperature(Temperature::new::<degree_celsius>(5.0)),
        );
        block.input_connector().set_value(inlet_flow(32.0, 0.5));
        assert!(block.run().is_err());
    }

    #[test]
    fn rejects_positive_cooling_power() {
        let mut block = Cooling::of(
            Temperature::new::<degree_celsius>(9.0),
            CoolingMode::FromPower(Power::new::<watt>(1000.0)),
        );
        block.input_connector().set_value(inlet_flow(32.0, 0.5));
        assert!(block.run().is_err());
    }
}
