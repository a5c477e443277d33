use std::str::FromStr;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

/// Lanternfish
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(
    year = 2021,
    day = 6,
    tags = ["2021", "simulation"],
    labels = ["Lanternfish after 80 days", "Lanternfish after 256 days"]
)]
pub struct Solver;

/// Timer a fish restarts from after spawning
pub const RESET_TIMER: usize = 6;
/// Timer a newborn fish starts from
pub const NEWBORN_TIMER: usize = 8;

/// Number of fish per timer value
pub type School = [u64; NEWBORN_TIMER + 1];

impl AocParser for Solver {
    type SharedData<'a> = School;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_school(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_school(input: &str) -> anyhow::Result<School> {
    let mut school = [0; NEWBORN_TIMER + 1];
    let timers = input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty());

    for token in timers {
        let timer = <usize as FromStr>::from_str(token).map_err(|e| anyhow!("timer '{}': {}", token, e))?;
        if timer > NEWBORN_TIMER {
            bail!("timer {} is above {}", timer, NEWBORN_TIMER);
        }
        school[timer] += 1;
    }
    Ok(school)
}

/// Advance the school by `days` and return the population, `None` once it outgrows a `u64`
pub fn simulate(school: &School, days: u32) -> Option<u64> {
    let mut school = *school;
    for _ in 0..days {
        school.rotate_left(1);
        // The fish that were at zero are now the newborns in the last slot
        school[RESET_TIMER] = school[RESET_TIMER].checked_add(school[NEWBORN_TIMER])?;
    }
    school.iter().try_fold(0u64, |total, &count| total.checked_add(count))
}

fn population(school: &School, days: u32) -> Result<String, SolveError> {
    simulate(school, days)
        .map(|count| count.to_string())
        .ok_or_else(|| {
            SolveError::SolveFailed(anyhow!("population after {} days overflows", days).into())
        })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        population(shared, 80)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        population(shared, 256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "3,4,3,1,2\n";

    #[test]
    fn sample() {
        let mut school = Solver::parse(SAMPLE).unwrap();
        assert_eq!(school, [0, 1, 1, 2, 1, 0, 0, 0, 0]);
        assert_eq!(simulate(&school, 18), Some(26));
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut school).unwrap(), "5934");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut school).unwrap(), "26984457539");
    }

    #[test]
    fn spawning_resets_and_adds_newborn() {
        let school = Solver::parse("0").unwrap();
        assert_eq!(simulate(&school, 0), Some(1));
        assert_eq!(simulate(&school, 1), Some(2));
        // Parent at 6 and child at 8 after one day; both still waiting seven days later
        assert_eq!(simulate(&school, 7), Some(2));
        assert_eq!(simulate(&school, 8), Some(3));
    }

    #[test]
    fn population_scales_with_input_size() {
        let input = vec!["0"; 1000].join(",");
        let mut school = Solver::parse(&input).unwrap();
        assert_eq!(school[0], 1000);
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut school).unwrap(), "6703087164000");
    }

    #[test]
    fn overflowing_population_is_an_error() {
        let mut school: School = [u64::MAX, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(simulate(&school, 0), Some(u64::MAX));
        assert_eq!(simulate(&school, 1), None);
        let err = <Solver as PartSolver<1>>::solve(&mut school).unwrap_err();
        assert!(err.to_string().contains("80 days"));
    }

    #[test]
    fn bad_timers_are_rejected() {
        assert!(matches!(Solver::parse("3,9"), Err(ParseError::InvalidFormat(m)) if m.contains("9")));
        assert!(matches!(Solver::parse("3,x"), Err(ParseError::InvalidFormat(m)) if m.contains("'x'")));
    }
}
