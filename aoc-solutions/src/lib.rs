//! Advent of Code 2021 puzzle solutions with automatic registration
//!
//! Every day derives `AutoRegisterSolver`, so linking this crate is enough
//! for `SolverRegistryBuilder::register_all_plugins` to find it.

#[cfg(feature = "my-solutions")]
pub mod my_solutions;

pub mod utils;
