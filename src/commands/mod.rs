//! Command implementations

pub mod simple;
pub mod simulate;

pub use simple::run_simple;
pub use simulate::{
    GameRecord, SimulationConfig, SimulationStatistics, play_random_game,
    print_simulation_statistics, run_simulation,
};
