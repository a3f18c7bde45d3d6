pub mod policy;
pub mod reports;
pub mod seeds;
pub mod simulation;

pub use policy::GameplayStrategy;
pub use reports::SimulationReport;
pub use seeds::{resolve_seed_inputs, split_csv};
pub use simulation::{RunRecord, run_strategy};
