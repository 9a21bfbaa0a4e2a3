//! Immutable, validated fluid snapshots (spec §4.3).
//!
//! Generalizes the teacher's `moist_air.rs`/`saturated_water.rs`/`saturated_water_vapor.rs`
//! structs: validate once at construction, memoise every derived property as a plain
//! field, and expose change through `with*` methods that build a fresh instance rather
//! than mutating in place (spec §9 Design Notes: "Mutable vs immutable fluid").

pub mod dry_air;
pub mod humid_air;
pub mod liquid_water;
pub mod water_vapour;

pub use dry_air::DryAir;
pub use humid_air::{HumidAir, VapourState};
pub use liquid_water::LiquidWater;
pub use water_vapour::WaterVapour;
