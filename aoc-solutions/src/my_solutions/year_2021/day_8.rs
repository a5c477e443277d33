use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;

/// Seven Segment Search
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(
    year = 2021,
    day = 8,
    tags = ["2021", "deduction"],
    labels = ["Appearances of 1, 4, 7 and 8", "Sum of output values"]
)]
pub struct Solver;

pub const PATTERN_COUNT: usize = 10;
pub const OUTPUT_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    #[error("line {}: missing '|' between patterns and outputs", .line + 1)]
    MissingDelimiter { line: usize },
    #[error("line {}: expected {expected} {side}, found {found}", .line + 1)]
    WrongCount {
        line: usize,
        side: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("line {}: '{segment}' is not a segment between 'a' and 'g'", .line + 1)]
    InvalidSegment { line: usize, segment: char },
    #[error("display {} cannot be decoded from its patterns", .display + 1)]
    Undecodable { display: usize },
}

impl From<DisplayError> for ParseError {
    fn from(error: DisplayError) -> Self {
        ParseError::InvalidFormat(error.to_string())
    }
}

/// Lit segments as a bit set, `a` in the lowest bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Segments(u8);

impl Segments {
    pub fn lit(self) -> u32 {
        self.0.count_ones()
    }

    pub fn contains(self, other: Segments) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn overlap(self, other: Segments) -> u32 {
        (self.0 & other.0).count_ones()
    }

    fn parse(line: usize, text: &str) -> Result<Self, DisplayError> {
        text.chars().try_fold(Segments::default(), |segments, segment| match segment {
            'a'..='g' => Ok(Segments(segments.0 | 1 << (segment as u8 - b'a'))),
            _ => Err(DisplayError::InvalidSegment { line, segment }),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pub patterns: [Segments; PATTERN_COUNT],
    pub outputs: [Segments; OUTPUT_COUNT],
}

fn parse_side<const N: usize>(
    line: usize,
    side: &'static str,
    text: &str,
) -> Result<[Segments; N], DisplayError> {
    let parsed = text
        .split_whitespace()
        .map(|pattern| Segments::parse(line, pattern))
        .collect::<Result<Vec<_>, _>>()?;
    let found = parsed.len();
    parsed.try_into().map_err(|_| DisplayError::WrongCount {
        line,
        side,
        expected: N,
        found,
    })
}

pub fn parse_displays(input: &str) -> Result<Vec<Display>, DisplayError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(line, text)| {
            let (patterns, outputs) = text
                .split_once('|')
                .ok_or(DisplayError::MissingDelimiter { line })?;
            Ok(Display {
                patterns: parse_side(line, "patterns", patterns)?,
                outputs: parse_side(line, "outputs", outputs)?,
            })
        })
        .collect()
}

/// Digits 1, 4, 7 and 8 light 2, 4, 3 and 7 segments, a count no other digit shares
pub fn is_unique_length(segments: Segments) -> bool {
    matches!(segments.lit(), 2 | 3 | 4 | 7)
}

impl Display {
    /// Work out which pattern shows each digit, indexed by digit
    pub fn wiring(&self) -> Option<[Segments; 10]> {
        let unique = |lit: u32| {
            let mut matching = self.patterns.iter().filter(|p| p.lit() == lit);
            match (matching.next(), matching.next()) {
                (Some(&pattern), None) => Some(pattern),
                _ => None,
            }
        };
        let one = unique(2)?;
        let four = unique(4)?;

        let mut digits: [Option<Segments>; 10] = [None; 10];
        for &pattern in &self.patterns {
            let digit = match pattern.lit() {
                2 => 1,
                3 => 7,
                4 => 4,
                7 => 8,
                6 if !pattern.contains(one) => 6,
                6 if pattern.contains(four) => 9,
                6 => 0,
                5 if pattern.contains(one) => 3,
                5 if pattern.overlap(four) == 3 => 5,
                5 => 2,
                _ => return None,
            };
            if digits[digit].replace(pattern).is_some() {
                return None;
            }
        }

        let mut wiring = [Segments::default(); 10];
        for (slot, digit) in wiring.iter_mut().zip(digits) {
            *slot = digit?;
        }
        Some(wiring)
    }

    /// The four output digits read as one number
    pub fn decode(&self) -> Option<u32> {
        let wiring = self.wiring()?;
        self.outputs.iter().try_fold(0, |value, output| {
            let digit = wiring.iter().position(|pattern| pattern == output)?;
            Some(value * 10 + digit as u32)
        })
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Display>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(parse_displays(input)?)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared
            .iter()
            .flat_map(|display| display.outputs.iter())
            .filter(|&&output| is_unique_length(output))
            .count();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .enumerate()
            .map(|(index, display)| {
                display
                    .decode()
                    .map(u64::from)
                    .ok_or(DisplayError::Undecodable { display: index })
            })
            .sum::<Result<u64, _>>()
            .map(|total| total.to_string())
            .map_err(SolveError::failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
be cfbegad cbdgef fgaecd cgeb fdcge agebfd fecdb fabcd edb | fdgacbe cefdb cefbgd gcbe
edbfga begcd cbg gc gcadebf fbgde acbgfd abcde gfcbed gfec | fcgedb cgb dgebacf gc
fgaebd cg bdaec gdafb agbcfd gdcbef bgcad gfac gcb cdgabef | cg cg fdcagb cbg
fbegcd cbd adcefb dageb afcb bc aefdc ecdab fgdeca fcdbega | efabcd cedba gadfec cb
aecbfdg fbg gf bafeg dbefa fcge gcbea fcaegb dgceab fcbdga | gecf egdcabf bgf bfgea
fgeab ca afcebg bdacfeg cfaedg gcfdb baec bfadeg bafgc acf | gebdcfa ecba ca fadegcb
dbcfg fgd bdegcaf fgec aegbdf ecdfab fbedc dacgb gdcebf gf | cefg dcbef fcge gbcadfe
bdfegc cbegaf gecbf dfcage bdacg ed bedf ced adcbefg gebcd | ed bcgafe cdgba cbgef
egadfb cdbfeg cegd fecab cgb gbdefca cg fgcdab egfdb bfceg | gbdfcae bgc cg cgb
gcafb gcf dcaebfg ecagb gf abcdeg gaef cafbge fdbac fegbdc | fgae cfgab fg bagce
";

    const SINGLE: &str =
        "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf";

    fn solve<const N: u8>(input: &str) -> String
    where
        Solver: PartSolver<N>,
    {
        let mut displays = Solver::parse(input).unwrap();
        <Solver as PartSolver<N>>::solve(&mut displays).unwrap()
    }

    #[test]
    fn sample() {
        assert_eq!(solve::<1>(SAMPLE), "26");
        assert_eq!(solve::<2>(SAMPLE), "61229");
    }

    #[test]
    fn single_display() {
        assert_eq!(solve::<1>(SINGLE), "0");
        assert_eq!(solve::<2>(SINGLE), "5353");

        let unique_outputs = SINGLE.replace("cdfeb fcadb cdfeb cdbaf", "ab dab eafb acedgfb");
        assert_eq!(solve::<1>(&unique_outputs), "4");
        assert_eq!(solve::<2>(&unique_outputs), "1748");
    }

    #[test]
    fn many_displays_add_up() {
        let eights = SINGLE.replace("cdfeb fcadb cdfeb cdbaf", "acedgfb gfbdeca bgfdeca abcdefg");
        assert_eq!(solve::<2>(&eights), "8888");

        let input = format!("{}\n", eights).repeat(10_000);
        assert_eq!(solve::<1>(&input), "40000");
        assert_eq!(solve::<2>(&input), "88880000");
    }

    #[test]
    fn segment_order_does_not_matter() {
        let forward = Segments::parse(0, "abc").unwrap();
        let backward = Segments::parse(0, "cba").unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.lit(), 3);
        assert!(Segments::parse(0, "abcd").unwrap().contains(forward));
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert_eq!(
            parse_displays("ab cd"),
            Err(DisplayError::MissingDelimiter { line: 0 })
        );
        assert_eq!(
            parse_displays("ab | cd"),
            Err(DisplayError::WrongCount {
                line: 0,
                side: "patterns",
                expected: PATTERN_COUNT,
                found: 1
            })
        );
        let short_outputs = SINGLE.replace(" cdbaf", "");
        assert!(matches!(
            parse_displays(&short_outputs),
            Err(DisplayError::WrongCount { side: "outputs", found: 3, .. })
        ));
        assert_eq!(
            parse_displays(&SINGLE.replace("dab", "dah")),
            Err(DisplayError::InvalidSegment { line: 0, segment: 'h' })
        );
    }

    #[test]
    fn inconsistent_patterns_are_undecodable() {
        // Two patterns of length two leave no unique one
        let broken = SINGLE.replace("dab", "db");
        let mut displays = Solver::parse(&broken).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut displays).unwrap(), "0");
        let err = <Solver as PartSolver<2>>::solve(&mut displays).unwrap_err();
        assert!(err.to_string().contains("display 1 cannot be decoded"));
    }
}
