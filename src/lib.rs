pub mod connector;
pub mod constants;
pub mod equations;
pub mod error;
pub mod fluids;
pub mod flows;
pub mod processes;
pub mod solver;
pub mod units;
