//! Error types shared by every solver

use thiserror::Error;

/// Failure while turning raw puzzle input into a solver's shared data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input does not follow the puzzle grammar
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Input ended before a required section
    #[error("Missing data: {0}")]
    MissingData(String),
    #[error("Parse error: {0}")]
    Other(String),
}

/// Failure while computing the answer of one part
#[derive(Debug, Error)]
pub enum SolveError {
    /// The solver has no implementation for this part
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// The part number is 0 or above the solver's part count
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    /// The puzzle-specific algorithm rejected the input
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    /// Box a puzzle-specific error into [`SolveError::SolveFailed`]
    pub fn failed<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SolveError::SolveFailed(Box::new(error))
    }
}

/// Failure while looking up, creating or running a solver
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Solver not found for year {0} day {1}")]
    NotFound(u16, u8),
    #[error("Year {0} day {1} is outside the supported range")]
    InvalidYearDay(u16, u8),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

/// Failure while building a registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A solver already exists for this year and day
    #[error("Duplicate solver registration for year {0} day {1}")]
    DuplicateSolver(u16, u8),
    /// Year or day cannot be stored in the registry
    #[error("Year {0} day {1} is outside the supported range")]
    InvalidYearDay(u16, u8),
}
