use std::str::FromStr;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

/// Sonar Sweep
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(
    year = 2021,
    day = 1,
    tags = ["2021", "sequence"],
    labels = ["Number of increases", "Number of sliding increases"]
)]
pub struct Solver;

pub const WINDOW_SIZE: usize = 3;

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .split_whitespace()
            .enumerate()
            .map(|(index, token)| {
                <i64 as FromStr>::from_str(token)
                    .map_err(|e| anyhow!("(reading {}) '{}': {}", index + 1, token, e))
            })
            .collect::<Result<Vec<_>, anyhow::Error>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(increases(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sliding_increases(shared, WINDOW_SIZE).to_string())
    }
}

/// Count readings strictly greater than the one before
pub fn increases(depths: &[i64]) -> usize {
    depths.windows(2).filter(|pair| pair[0] < pair[1]).count()
}

/// Count strict increases between consecutive window sums.
///
/// Consecutive windows share all but one reading, so comparing sums reduces
/// to comparing the reading that leaves with the one that enters.
pub fn sliding_increases(depths: &[i64], window: usize) -> usize {
    if window == 0 {
        return 0;
    }
    depths
        .iter()
        .zip(depths.iter().skip(window))
        .filter(|(leaving, entering)| leaving < entering)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = "199\n200\n208\n210\n200\n207\n240\n269\n260\n263\n";

    fn solve<const N: u8>(input: &str) -> String
    where
        Solver: PartSolver<N>,
    {
        let mut shared = Solver::parse(input).unwrap();
        <Solver as PartSolver<N>>::solve(&mut shared).unwrap()
    }

    #[test]
    fn sample() {
        assert_eq!(solve::<1>(SAMPLE), "7");
        assert_eq!(solve::<2>(SAMPLE), "5");
    }

    #[test]
    fn short_window_sequence() {
        // Window sums are 6, 9, 10, 12
        assert_eq!(solve::<2>("1 2 3 4 3 5"), "3");
    }

    #[test]
    fn too_few_readings_count_nothing() {
        assert_eq!(solve::<1>(""), "0");
        assert_eq!(solve::<1>("7"), "0");
        assert_eq!(solve::<2>("1 2 3"), "0");
    }

    #[test]
    fn extreme_readings_compare_without_summing() {
        let input = format!("{} {} {} {}", i64::MIN, i64::MAX, i64::MAX, i64::MAX);
        assert_eq!(solve::<1>(&input), "1");
        // Window sums would overflow; the entering reading still beats the leaving one
        assert_eq!(solve::<2>(&input), "1");
    }

    #[test]
    fn non_numbers_are_rejected() {
        let err = Solver::parse("199\n2OO\n").unwrap_err();
        match err {
            ParseError::InvalidFormat(message) => assert!(message.contains("2OO")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn sliding_matches_explicit_window_sums(depths in prop::collection::vec(-1000i64..1000, 0..50)) {
            let sums: Vec<i64> = depths.windows(WINDOW_SIZE).map(|w| w.iter().sum()).collect();
            prop_assert_eq!(sliding_increases(&depths, WINDOW_SIZE), increases(&sums));
        }

        #[test]
        fn window_of_one_is_plain_increases(depths in prop::collection::vec(-1000i64..1000, 0..50)) {
            prop_assert_eq!(sliding_increases(&depths, 1), increases(&depths));
        }
    }
}
