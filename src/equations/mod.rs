//! Stateless equation modules (spec §4.1).
//!
//! Each submodule is pure `f64` math with no validation and no error handling of its
//! own — range-checking is the caller's (fluid constructor's) responsibility per the
//! spec's error policy. Division-by-zero/NaN results are still surfaced as
//! [`crate::error::PsychroError::Numerical`] at the fluid layer, never silently
//! returned.

pub mod dry_air;
pub mod flow;
pub mod humid_air;
pub mod liquid_water;
pub mod shared;
pub mod water_vapour;
