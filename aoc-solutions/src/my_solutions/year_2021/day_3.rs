use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;

use crate::utils::grid::Grid;

/// Binary Diagnostic
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(
    year = 2021,
    day = 3,
    tags = ["2021", "bits"],
    labels = ["Power consumption", "Life support rating"]
)]
pub struct Solver;

/// Widest entry whose ratings multiply without overflowing a `u64`
pub const MAX_ENTRY_WIDTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticError {
    #[error("diagnostic report is empty")]
    Empty,
    #[error("malformed value '{value}' (entry {}, digit {})", .entry + 1, .digit + 1)]
    MalformedDigit {
        entry: usize,
        digit: usize,
        value: char,
    },
    #[error("entry {} has {found} digits, expected {expected}", .entry + 1)]
    InconsistentWidth {
        entry: usize,
        expected: usize,
        found: usize,
    },
    #[error("entries of {width} digits do not fit in {} bits", MAX_ENTRY_WIDTH)]
    TooWide { width: usize },
    #[error("digit {} has as many zeros as ones", .digit + 1)]
    TieWithNoMajority { digit: usize },
    #[error("{rating} rating does not narrow down to a single entry")]
    NoUniqueRating { rating: Rating },
}

impl From<DiagnosticError> for ParseError {
    fn from(error: DiagnosticError) -> Self {
        ParseError::InvalidFormat(error.to_string())
    }
}

/// Which value dominates one digit column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Common {
    MoreZeros,
    MoreOnes,
    Neither,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    OxygenGenerator,
    Co2Scrubber,
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::OxygenGenerator => write!(f, "oxygen generator"),
            Rating::Co2Scrubber => write!(f, "CO2 scrubber"),
        }
    }
}

impl Rating {
    /// The digit value an entry must have to stay a candidate
    fn keeps(self, common: Common) -> bool {
        match (self, common) {
            (Rating::OxygenGenerator, Common::MoreOnes | Common::Neither) => true,
            (Rating::OxygenGenerator, Common::MoreZeros) => false,
            (Rating::Co2Scrubber, Common::MoreOnes | Common::Neither) => false,
            (Rating::Co2Scrubber, Common::MoreZeros) => true,
        }
    }
}

impl AocParser for Solver {
    /// One row per entry, `true` for a '1' digit
    type SharedData<'a> = Grid<bool>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(parse_report(input)?)
    }
}

pub fn parse_report(input: &str) -> Result<Grid<bool>, DiagnosticError> {
    let rows = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(entry, line)| {
            line.chars()
                .enumerate()
                .map(|(digit, value)| match value {
                    '0' => Ok(false),
                    '1' => Ok(true),
                    _ => Err(DiagnosticError::MalformedDigit {
                        entry,
                        digit,
                        value,
                    }),
                })
                .collect::<Result<Vec<bool>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let report = Grid::from_rows(rows).map_err(|ragged| DiagnosticError::InconsistentWidth {
        entry: ragged.row,
        expected: ragged.expected,
        found: ragged.found,
    })?;

    if report.is_empty() {
        return Err(DiagnosticError::Empty);
    }
    if report.width() > MAX_ENTRY_WIDTH {
        return Err(DiagnosticError::TooWide {
            width: report.width(),
        });
    }
    Ok(report)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        power_consumption(shared)
            .map(|power| power.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        life_support_rating(shared)
            .map(|rating| rating.to_string())
            .map_err(SolveError::failed)
    }
}

/// Majority value of `digit` among the entries `candidates` keeps (all when `None`)
pub fn most_common(report: &Grid<bool>, digit: usize, candidates: Option<&[bool]>) -> Common {
    let (zeros, ones) = report
        .column(digit)
        .enumerate()
        .filter(|(entry, _)| candidates.is_none_or(|mask| mask[*entry]))
        .fold((0usize, 0usize), |(zeros, ones), (_, &bit)| {
            if bit { (zeros, ones + 1) } else { (zeros + 1, ones) }
        });

    match zeros.cmp(&ones) {
        std::cmp::Ordering::Less => Common::MoreOnes,
        std::cmp::Ordering::Equal => Common::Neither,
        std::cmp::Ordering::Greater => Common::MoreZeros,
    }
}

fn to_number(bits: &[bool]) -> u64 {
    bits.iter().fold(0, |number, &bit| (number << 1) | u64::from(bit))
}

/// Gamma (majority bits) times epsilon (minority bits); a tied column has no answer
pub fn power_consumption(report: &Grid<bool>) -> Result<u64, DiagnosticError> {
    let mut gamma = 0u64;
    let mut epsilon = 0u64;

    for digit in 0..report.width() {
        let more_ones = match most_common(report, digit, None) {
            Common::MoreOnes => true,
            Common::MoreZeros => false,
            Common::Neither => return Err(DiagnosticError::TieWithNoMajority { digit }),
        };
        gamma = (gamma << 1) | u64::from(more_ones);
        epsilon = (epsilon << 1) | u64::from(!more_ones);
    }

    Ok(gamma * epsilon)
}

/// Narrow the candidate mask digit by digit until one entry is left
pub fn rating(report: &Grid<bool>, rating: Rating) -> Result<u64, DiagnosticError> {
    let mut candidates = vec![true; report.height()];
    let mut remaining = candidates.len();

    for digit in 0..report.width() {
        if remaining <= 1 {
            break;
        }
        let keep = rating.keeps(most_common(report, digit, Some(candidates.as_slice())));
        for (entry, &bit) in report.column(digit).enumerate() {
            if candidates[entry] && bit != keep {
                candidates[entry] = false;
                remaining -= 1;
            }
        }
    }

    let mut survivors = candidates
        .iter()
        .enumerate()
        .filter_map(|(entry, &candidate)| candidate.then_some(entry));
    match (survivors.next(), survivors.next()) {
        (Some(entry), None) => report
            .row(entry)
            .map(to_number)
            .ok_or(DiagnosticError::NoUniqueRating { rating }),
        _ => Err(DiagnosticError::NoUniqueRating { rating }),
    }
}

/// Oxygen generator rating times CO2 scrubber rating
pub fn life_support_rating(report: &Grid<bool>) -> Result<u64, DiagnosticError> {
    let oxygen = rating(report, Rating::OxygenGenerator)?;
    let scrubber = rating(report, Rating::Co2Scrubber)?;
    Ok(oxygen * scrubber)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
00100
11110
10110
10111
10101
01111
00111
11100
10000
11001
00010
01010
";

    #[test]
    fn sample() {
        let mut report = Solver::parse(SAMPLE).unwrap();
        assert_eq!((report.width(), report.height()), (5, 12));
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut report).unwrap(), "198");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut report).unwrap(), "230");
    }

    #[test]
    fn sample_ratings() {
        let report = parse_report(SAMPLE).unwrap();
        assert_eq!(rating(&report, Rating::OxygenGenerator), Ok(23));
        assert_eq!(rating(&report, Rating::Co2Scrubber), Ok(10));
    }

    #[test]
    fn majority_respects_candidate_mask() {
        let report = parse_report("10\n11\n01\n").unwrap();
        assert_eq!(most_common(&report, 0, None), Common::MoreOnes);
        assert_eq!(most_common(&report, 0, Some(&[false, true, true][..])), Common::Neither);
        assert_eq!(most_common(&report, 1, Some(&[true, false, false][..])), Common::MoreZeros);
    }

    #[test]
    fn tie_aborts_power_consumption() {
        let report = parse_report("10\n01\n11\n00\n").unwrap();
        assert_eq!(
            power_consumption(&report),
            Err(DiagnosticError::TieWithNoMajority { digit: 0 })
        );
    }

    #[test]
    fn ties_prefer_one_for_oxygen_and_zero_for_scrubber() {
        let report = parse_report("10\n01\n").unwrap();
        assert_eq!(rating(&report, Rating::OxygenGenerator), Ok(0b10));
        assert_eq!(rating(&report, Rating::Co2Scrubber), Ok(0b01));
    }

    #[test]
    fn duplicate_entries_have_no_unique_rating() {
        let report = parse_report("101\n101\n").unwrap();
        assert_eq!(
            rating(&report, Rating::OxygenGenerator),
            Err(DiagnosticError::NoUniqueRating {
                rating: Rating::OxygenGenerator
            })
        );
    }

    #[test]
    fn malformed_reports_are_rejected() {
        assert_eq!(
            parse_report("0010\n01x0\n"),
            Err(DiagnosticError::MalformedDigit {
                entry: 1,
                digit: 2,
                value: 'x'
            })
        );
        assert_eq!(
            parse_report("0010\n010\n"),
            Err(DiagnosticError::InconsistentWidth {
                entry: 1,
                expected: 4,
                found: 3
            })
        );
        assert_eq!(parse_report("\n\n"), Err(DiagnosticError::Empty));
        assert!(matches!(
            parse_report(&"1".repeat(33)),
            Err(DiagnosticError::TooWide { width: 33 })
        ));
    }

    #[test]
    fn widest_entries_multiply_in_u64() {
        let high = format!("{}{}", "1".repeat(16), "0".repeat(16));
        let low = format!("{}{}", "0".repeat(16), "1".repeat(16));
        let report = parse_report(&format!("{high}\n{high}\n{low}\n")).unwrap();
        assert_eq!(report.width(), MAX_ENTRY_WIDTH);
        assert_eq!(power_consumption(&report), Ok(0xFFFF_0000 * 0xFFFF));
    }

    #[test]
    fn tie_surfaces_as_solve_failure() {
        let mut report = Solver::parse("10\n01\n").unwrap();
        let err = <Solver as PartSolver<1>>::solve(&mut report).unwrap_err();
        assert!(err.to_string().contains("digit 1 has as many zeros as ones"));
    }
}
