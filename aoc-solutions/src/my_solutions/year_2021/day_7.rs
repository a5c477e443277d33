use std::str::FromStr;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;

/// The Treachery of Whales
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(
    year = 2021,
    day = 7,
    tags = ["2021", "optimization"],
    labels = ["Fuel at constant burn", "Fuel at increasing burn"]
)]
pub struct Solver;

/// Furthest position a crab may start from; every position up to it is tried
pub const MAX_POSITION: u64 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignmentError {
    #[error("no crabs to align")]
    NoCrabs,
    #[error("fuel to reach position {target} does not fit in 64 bits")]
    FuelOverflow { target: u64 },
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let crabs = input
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| -> anyhow::Result<u64> {
                let position = <u64 as FromStr>::from_str(token)
                    .map_err(|e| anyhow!("position '{}': {}", token, e))?;
                if position > MAX_POSITION {
                    bail!("position {} is beyond {}", position, MAX_POSITION);
                }
                Ok(position)
            })
            .collect::<Result<Vec<_>, anyhow::Error>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        if crabs.is_empty() {
            return Err(ParseError::MissingData("no crab positions".to_string()));
        }
        Ok(crabs)
    }
}

/// One step costs one unit
pub fn constant_burn(distance: u64) -> Option<u64> {
    Some(distance)
}

/// Each step costs one more than the last
pub fn increasing_burn(distance: u64) -> Option<u64> {
    distance
        .checked_mul(distance.checked_add(1)?)
        .map(|double| double / 2)
}

/// Total fuel for every crab to reach `target`, `None` on overflow
pub fn fuel_to(crabs: &[u64], target: u64, burn: impl Fn(u64) -> Option<u64>) -> Option<u64> {
    crabs
        .iter()
        .try_fold(0u64, |total, &crab| total.checked_add(burn(crab.abs_diff(target))?))
}

/// Cheapest alignment over every position up to the furthest crab, as `(position, fuel)`.
///
/// Ties go to the lowest position.
pub fn cheapest_alignment(
    crabs: &[u64],
    burn: impl Fn(u64) -> Option<u64>,
) -> Result<(u64, u64), AlignmentError> {
    let furthest = crabs.iter().copied().max().ok_or(AlignmentError::NoCrabs)?;
    let mut cheapest: Option<(u64, u64)> = None;
    for target in 0..=furthest {
        let fuel = fuel_to(crabs, target, &burn).ok_or(AlignmentError::FuelOverflow { target })?;
        if cheapest.is_none_or(|(_, least)| fuel < least) {
            cheapest = Some((target, fuel));
        }
    }
    cheapest.ok_or(AlignmentError::NoCrabs)
}

fn solve_with(crabs: &[u64], burn: fn(u64) -> Option<u64>) -> Result<String, SolveError> {
    cheapest_alignment(crabs, burn)
        .map(|(_, fuel)| fuel.to_string())
        .map_err(SolveError::failed)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_with(shared, constant_burn)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_with(shared, increasing_burn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = "16,1,2,0,4,2,7,1,2,14\n";

    #[test]
    fn sample() {
        let mut crabs = Solver::parse(SAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut crabs).unwrap(), "37");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut crabs).unwrap(), "168");
    }

    #[test]
    fn sample_positions() {
        let crabs = Solver::parse(SAMPLE).unwrap();
        assert_eq!(cheapest_alignment(&crabs, constant_burn), Ok((2, 37)));
        assert_eq!(cheapest_alignment(&crabs, increasing_burn), Ok((5, 168)));
        assert_eq!(fuel_to(&crabs, 1, constant_burn), Some(41));
        assert_eq!(fuel_to(&crabs, 2, increasing_burn), Some(206));
        assert_eq!(cheapest_alignment(&[], constant_burn), Err(AlignmentError::NoCrabs));
    }

    #[test]
    fn empty_input_is_missing_data() {
        assert!(matches!(Solver::parse(" \n"), Err(ParseError::MissingData(_))));
        assert!(matches!(Solver::parse("1,a"), Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn positions_up_to_the_limit() {
        let mut crabs = Solver::parse("0,100000").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut crabs).unwrap(), "100000");
        // Both crabs meet halfway: 2 * (50000 * 50001 / 2)
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut crabs).unwrap(), "2500050000");

        assert!(matches!(
            Solver::parse("3,100001"),
            Err(ParseError::InvalidFormat(message)) if message.contains("100001")
        ));
        assert!(matches!(Solver::parse("5000000000"), Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn fuel_overflow_is_an_error() {
        assert_eq!(increasing_burn(u64::MAX), None);
        assert_eq!(
            cheapest_alignment(&[0, 5_000_000_000], increasing_burn),
            Err(AlignmentError::FuelOverflow { target: 0 })
        );
        assert_eq!(fuel_to(&[0, 0], u64::MAX, constant_burn), None);
    }

    proptest! {
        #[test]
        fn constant_burn_minimum_is_at_a_median(crabs in prop::collection::vec(0u64..200, 1..30)) {
            let mut sorted = crabs.clone();
            sorted.sort_unstable();
            let median = sorted[(sorted.len() - 1) / 2];
            let (_, fuel) = cheapest_alignment(&crabs, constant_burn).unwrap();
            prop_assert_eq!(Some(fuel), fuel_to(&crabs, median, constant_burn));
        }
    }
}
