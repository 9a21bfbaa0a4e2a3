//! Flow entities — a fluid snapshot paired with a mass flow (spec §4.4).
//!
//! Generalizes the teacher's `FlowOfMoistAir`-style structs (superseded generations
//! collapsed into one, per spec §9 Design Notes) into immutable records with `with*`
//! helpers, one per fluid type.

pub mod dry_air;
pub mod humid_air;
pub mod liquid_water;
pub mod water_vapour;

pub use dry_air::FlowOfDryAir;
pub use humid_air::FlowOfHumidAir;
pub use liquid_water::FlowOfLiquidWater;
pub use water_vapour::FlowOfWaterVapour;
