//! Advent of Code solver framework
//!
//! Every puzzle is a type implementing:
//! - [`AocParser`]: turns the raw input into the puzzle's shared data
//! - [`PartSolver<N>`]: computes the answer of part `N`
//! - [`Solver`]: dispatches a runtime part number, usually via `#[derive(AocSolver)]`
//!
//! Solvers announce themselves with `#[derive(AutoRegisterSolver)]` and are
//! picked up by [`SolverRegistryBuilder::register_all_plugins`]. The registry
//! hands out [`DynSolver`] trait objects that parse once and time every part.
//!
//! # Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Depths;
//!
//! impl AocParser for Depths {
//!     type SharedData<'a> = Vec<i64>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .split_whitespace()
//!             .map(|t| t.parse().map_err(|_| ParseError::InvalidFormat(t.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i64>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().max().copied().unwrap_or_default().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register_solver::<Depths>(2021, 1, &[])
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2021, 1, "3 9 4").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "16");
//! assert_eq!(solver.solve(2).unwrap().answer, "9");
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Used by the code the derive macros generate
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
