//! Process blocks — air-handling pipeline stages (spec §4.5).
//!
//! Generalizes the teacher's mutating `MoistAir::heating_*`/`cooling_*`/`humidify_*`
//! methods (spec §9 Design Notes: "Inheritance → variants") into one concrete,
//! immutable-input block per process type, each implementing
//! [`crate::connector::Processable`] instead of sharing an abstract base class.

pub mod cooling;
pub mod dry_cooling;
pub mod heating;
pub mod humidification;
pub mod mixing;

pub use cooling::Cooling;
pub use dry_cooling::DryCooling;
pub use heating::Heating;
pub use humidification::Humidification;
pub use mixing::Mixing;

use crate::flows::{FlowOfHumidAir, FlowOfLiquidWater};
use crate::units::{BypassFactor, Power};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessType {
    Heating,
    DryCooling,
    Cooling,
    Mixing,
    Humidification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessMode {
    FromPower,
    FromTemperature,
    FromHumidity,
    SimpleMixing,
    MultipleMixing,
    /// Humidification has no distinct mode of its own in §4.5.5 — steam injection
    /// is the only way this block operates.
    SteamInjection,
}

/// Outcome of one block `run` (spec §4.5): the resolved outlet state plus whatever
/// byproducts that process type produces (condensate, bypass factor, recirculation
/// streams).
#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub process_type: ProcessType,
    pub process_mode: ProcessMode,
    pub inlet_air_flow: FlowOfHumidAir,
    pub outlet_air_flow: FlowOfHumidAir,
    /// Positive = heat added to the air stream, negative = heat removed (spec §9 Open
    /// Questions: the source's conflicting cooling-power sign convention is resolved
    /// in favour of this explicit rule).
    pub heat_of_process: Power,
    pub condensate_flow: Option<FlowOfLiquidWater>,
    pub bypass_factor: Option<BypassFactor>,
    pub recirculation_flows: Vec<FlowOfHumidAir>,
}
