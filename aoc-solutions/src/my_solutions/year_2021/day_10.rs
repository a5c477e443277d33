use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;

/// Syntax Scoring
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(
    year = 2021,
    day = 10,
    tags = ["2021", "stack", "parsing"],
    labels = ["Total syntax error score", "Middle autocomplete score"]
)]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("line {}: '{symbol}' is not a bracket", .line + 1)]
    UnexpectedSymbol { line: usize, symbol: char },
    #[error("no navigation lines")]
    Empty,
    #[error("{count} incomplete lines have no single middle score")]
    NoMedian { count: usize },
    #[error("line {}: autocomplete score does not fit in 64 bits", .line + 1)]
    ScoreOverflow { line: usize },
}

impl From<NavigationError> for ParseError {
    fn from(error: NavigationError) -> Self {
        match error {
            NavigationError::Empty => ParseError::MissingData(error.to_string()),
            _ => ParseError::InvalidFormat(error.to_string()),
        }
    }
}

/// Outcome of matching one line's brackets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunks {
    Complete,
    /// The first closer that does not match its opener
    Corrupted(char),
    /// Closers that would finish the line, innermost first
    Incomplete(String),
}

fn closer_for(opener: char) -> Option<char> {
    match opener {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '<' => Some('>'),
        _ => None,
    }
}

fn is_closer(symbol: char) -> bool {
    matches!(symbol, ')' | ']' | '}' | '>')
}

pub fn syntax_error_points(closer: char) -> u64 {
    match closer {
        ')' => 3,
        ']' => 57,
        '}' => 1197,
        '>' => 25137,
        _ => 0,
    }
}

pub fn autocomplete_points(closer: char) -> u64 {
    match closer {
        ')' => 1,
        ']' => 2,
        '}' => 3,
        '>' => 4,
        _ => 0,
    }
}

/// Match brackets with a stack of expected closers
pub fn validate(line: &str) -> Chunks {
    let mut expected = Vec::new();
    for symbol in line.chars() {
        if let Some(closer) = closer_for(symbol) {
            expected.push(closer);
        } else if expected.pop() != Some(symbol) {
            return Chunks::Corrupted(symbol);
        }
    }

    if expected.is_empty() {
        Chunks::Complete
    } else {
        Chunks::Incomplete(expected.into_iter().rev().collect())
    }
}

/// Base-5 score of a completion, `None` once it no longer fits in a `u64`
pub fn completion_score(completion: &str) -> Option<u64> {
    completion.chars().try_fold(0u64, |score, closer| {
        score.checked_mul(5)?.checked_add(autocomplete_points(closer))
    })
}

pub fn parse_lines(input: &str) -> Result<Vec<&str>, NavigationError> {
    let lines = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(line, text)| {
            match text
                .chars()
                .find(|&symbol| closer_for(symbol).is_none() && !is_closer(symbol))
            {
                Some(symbol) => Err(NavigationError::UnexpectedSymbol { line, symbol }),
                None => Ok(text),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    if lines.is_empty() {
        return Err(NavigationError::Empty);
    }
    Ok(lines)
}

pub fn syntax_error_score<'a>(lines: impl IntoIterator<Item = &'a str>) -> u64 {
    lines
        .into_iter()
        .filter_map(|line| match validate(line) {
            Chunks::Corrupted(closer) => Some(syntax_error_points(closer)),
            _ => None,
        })
        .sum()
}

pub fn middle_completion_score<'a>(
    lines: impl IntoIterator<Item = &'a str>,
) -> Result<u64, NavigationError> {
    let mut scores = lines
        .into_iter()
        .enumerate()
        .filter_map(|(line, text)| match validate(text) {
            Chunks::Incomplete(completion) => {
                Some(completion_score(&completion).ok_or(NavigationError::ScoreOverflow { line }))
            }
            _ => None,
        })
        .collect::<Result<Vec<_>, _>>()?;

    let count = scores.len();
    if count % 2 == 0 {
        return Err(NavigationError::NoMedian { count });
    }
    scores.sort_unstable();
    Ok(scores[count / 2])
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(parse_lines(input)?)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(syntax_error_score(shared.iter().copied()).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        middle_completion_score(shared.iter().copied())
            .map(|score| score.to_string())
            .map_err(SolveError::failed)
    }
}
