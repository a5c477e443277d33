use std::str::FromStr;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

/// Dive!
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(
    year = 2021,
    day = 2,
    tags = ["2021", "simulation"],
    labels = ["Product of depth and distance", "Product of depth and distance with aim"]
)]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Forward(i64),
    Down(i64),
    Up(i64),
}

impl Command {
    /// Build a command from its direction word and magnitude token
    pub fn from_tokens(direction: &str, size: &str) -> anyhow::Result<Self> {
        let size = <i64 as FromStr>::from_str(size).map_err(|e| anyhow!("magnitude '{}': {}", size, e))?;
        match direction {
            "forward" => Ok(Command::Forward(size)),
            "down" => Ok(Command::Down(size)),
            "up" => Ok(Command::Up(size)),
            other => Err(anyhow!("unknown direction '{}'", other)),
        }
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let (Some(direction), Some(size), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            bail!("expected 'direction magnitude', got '{}'", s.trim());
        };
        Command::from_tokens(direction, size)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Command>;

    /// Pairs up whitespace-separated tokens regardless of line breaks, stopping
    /// at the first pair that is not a command.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut tokens = input.split_whitespace();
        let mut commands = Vec::new();
        while let (Some(direction), Some(size)) = (tokens.next(), tokens.next()) {
            match Command::from_tokens(direction, size) {
                Ok(command) => commands.push(command),
                Err(_) => break,
            }
        }

        if commands.is_empty() {
            return Err(ParseError::MissingData(
                "no 'direction magnitude' command before the first malformed pair".to_string(),
            ));
        }
        Ok(commands)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        depth_distance_product(shared)
            .map(|product| product.to_string())
            .ok_or_else(overflow)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        depth_distance_product_with_aim(shared)
            .map(|product| product.to_string())
            .ok_or_else(overflow)
    }
}

fn overflow() -> SolveError {
    SolveError::SolveFailed(anyhow!("position does not fit in 64 bits").into())
}

/// Up and down move the submarine directly; `None` on overflow
pub fn depth_distance_product(commands: &[Command]) -> Option<i64> {
    let (depth, distance) =
        commands
            .iter()
            .try_fold((0i64, 0i64), |(depth, distance), command| match *command {
                Command::Forward(size) => Some((depth, distance.checked_add(size)?)),
                Command::Down(size) => Some((depth.checked_add(size)?, distance)),
                Command::Up(size) => Some((depth.checked_sub(size)?, distance)),
            })?;
    depth.checked_mul(distance)
}

/// Up and down only tilt the submarine; forward dives along the current aim
pub fn depth_distance_product_with_aim(commands: &[Command]) -> Option<i64> {
    let (depth, distance, _) = commands.iter().try_fold(
        (0i64, 0i64, 0i64),
        |(depth, distance, aim), command| match *command {
            Command::Forward(size) => Some((
                depth.checked_add(aim.checked_mul(size)?)?,
                distance.checked_add(size)?,
                aim,
            )),
            Command::Down(size) => Some((depth, distance, aim.checked_add(size)?)),
            Command::Up(size) => Some((depth, distance, aim.checked_sub(size)?)),
        },
    )?;
    depth.checked_mul(distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "forward 5\ndown 5\nforward 8\nup 3\ndown 8\nforward 2\n";

    #[test]
    fn sample() {
        let mut commands = Solver::parse(SAMPLE).unwrap();
        assert_eq!(commands.len(), 6);
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut commands).unwrap(), "150");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut commands).unwrap(), "900");
    }

    #[test]
    fn parsing_stops_at_first_unknown_direction() {
        let commands = Solver::parse("forward 5\ndown 5\nbackward 3\nforward 8\n").unwrap();
        assert_eq!(commands, vec![Command::Forward(5), Command::Down(5)]);
    }

    #[test]
    fn parsing_stops_at_missing_magnitude() {
        let commands = Solver::parse("down 2\nforward\nforward 3\n").unwrap();
        assert_eq!(commands, vec![Command::Down(2)]);
    }

    #[test]
    fn commands_may_share_a_line() {
        let mut commands = Solver::parse("forward 5 down 5 forward 8\nup 3 down\n8 forward 2").unwrap();
        assert_eq!(commands.len(), 6);
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut commands).unwrap(), "150");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut commands).unwrap(), "900");
    }

    #[test]
    fn dangling_direction_is_dropped() {
        let commands = Solver::parse("down 2 forward 3 up").unwrap();
        assert_eq!(commands, vec![Command::Down(2), Command::Forward(3)]);
    }

    #[test]
    fn large_magnitudes_are_checked() {
        // 3037000499^2 is the largest square below i64::MAX
        let mut commands = Solver::parse("forward 3037000499 down 3037000499").unwrap();
        assert_eq!(
            <Solver as PartSolver<1>>::solve(&mut commands).unwrap(),
            "9223372030926249001"
        );
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut commands).unwrap(), "0");

        let mut commands = Solver::parse("down 3037000500 forward 3037000500").unwrap();
        for result in [
            <Solver as PartSolver<1>>::solve(&mut commands),
            <Solver as PartSolver<2>>::solve(&mut commands),
        ] {
            assert!(result.unwrap_err().to_string().contains("does not fit"));
        }
        assert_eq!(depth_distance_product(&[Command::Up(i64::MAX), Command::Up(2)]), None);
    }

    #[test]
    fn no_valid_command_is_missing_data() {
        assert!(matches!(Solver::parse("sideways 4"), Err(ParseError::MissingData(_))));
        assert!(matches!(Solver::parse(""), Err(ParseError::MissingData(_))));
    }

    #[test]
    fn command_errors_name_the_problem() {
        let err = "left 3".parse::<Command>().unwrap_err();
        assert!(err.to_string().contains("left"));
        let err = "up x".parse::<Command>().unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }
}
