//! Solver traits
//!
//! A puzzle is split into a parsing step ([`AocParser`]) and one
//! [`PartSolver<N>`] impl per part. [`Solver`] ties the parts together and is
//! normally generated with `#[derive(AocSolver)]`.

use crate::error::{ParseError, SolveError};

/// Parses puzzle input into the data every part works on.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .split_whitespace()
///             .map(|t| t.parse().map_err(|_| ParseError::InvalidFormat(t.to_string())))
///             .collect()
///     }
/// }
///
/// assert_eq!(Depths::parse("199 200\n208").unwrap(), vec![199, 200, 208]);
/// ```
pub trait AocParser {
    /// Parsed input plus anything a part wants to cache for a later part.
    ///
    /// The lifetime allows borrowing straight from the input when no
    /// transformation is needed.
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Computes the answer of part `N`.
///
/// ```
/// use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .split_whitespace()
///             .map(|t| t.parse().map_err(|_| ParseError::InvalidFormat(t.to_string())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Depths {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(shared.windows(2).filter(|w| w[0] < w[1]).count().to_string())
///     }
/// }
///
/// let mut depths = Depths::parse("199 200 208 207").unwrap();
/// assert_eq!(<Depths as PartSolver<1>>::solve(&mut depths).unwrap(), "2");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete puzzle: parser plus part dispatch.
///
/// Implemented by `#[derive(AocSolver)]`, which forwards part `k` to
/// `PartSolver<k>` and answers [`SolveError::PartNotImplemented`] otherwise.
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve `part` against the shared data.
    ///
    /// Parts receive mutable access so one part can leave results behind for
    /// the next one.
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked dispatch for every [`Solver`]
pub trait SolverExt: Solver {
    /// Like [`Solver::solve_part`] but rejects part 0 and parts above
    /// [`Solver::PARTS`] with [`SolveError::PartOutOfRange`].
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
