use std::cmp::Ordering;
use std::str::FromStr;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;

use crate::utils::grid::Grid;

/// Hydrothermal Venture
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(
    year = 2021,
    day = 5,
    tags = ["2021", "grid", "geometry"],
    labels = ["Overlaps of horizontal and vertical lines", "Overlaps of all lines"]
)]
pub struct Solver;

/// Largest coordinate the dense visit-count grid accepts on either axis
pub const MAX_COORDINATE: usize = 4095;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VentError {
    #[error("line {}: expected 'x1,y1 -> x2,y2', got '{text}'", .line + 1)]
    BadSegment { line: usize, text: String },
    #[error("segment {0} is neither horizontal, vertical nor diagonal at 45 degrees")]
    UnsupportedSlope(Segment),
    #[error("line {}: coordinate {value} is above {}", .line + 1, MAX_COORDINATE)]
    CoordinateTooLarge { line: usize, value: usize },
    #[error("segment {0} reaches past the {max} limit", max = MAX_COORDINATE)]
    OutOfBounds(Segment),
    #[error("a {width} x {height} grid does not fit in memory")]
    GridTooLarge { width: usize, height: usize },
    #[error("input has no line segments")]
    NoSegments,
}

impl From<VentError> for ParseError {
    fn from(error: VentError) -> Self {
        match error {
            VentError::NoSegments => ParseError::MissingData(error.to_string()),
            _ => ParseError::InvalidFormat(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{} -> {},{}",
            self.start.x, self.start.y, self.end.x, self.end.y
        )
    }
}

impl Segment {
    pub fn is_axis_aligned(&self) -> bool {
        self.start.x == self.end.x || self.start.y == self.end.y
    }

    fn is_diagonal(&self) -> bool {
        self.start.x.abs_diff(self.end.x) == self.start.y.abs_diff(self.end.y)
    }

    fn largest_coordinate(&self) -> usize {
        self.start.x.max(self.start.y).max(self.end.x).max(self.end.y)
    }

    /// Every grid point from `start` to `end`, both included
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let Segment { start, end } = *self;
        let steps = start.x.abs_diff(end.x).max(start.y.abs_diff(end.y));

        (0..=steps).map(move |i| Point {
            x: step(start.x, end.x, i),
            y: step(start.y, end.y, i),
        })
    }
}

/// `i` steps from `from` towards `to`; never passes `to` for `i` up to their distance
fn step(from: usize, to: usize, i: usize) -> usize {
    match from.cmp(&to) {
        Ordering::Less => from + i,
        Ordering::Greater => from - i,
        Ordering::Equal => from,
    }
}

fn parse_point(text: &str) -> Option<Point> {
    let (x, y) = text.trim().split_once(',')?;
    Some(Point {
        x: <usize as FromStr>::from_str(x.trim()).ok()?,
        y: <usize as FromStr>::from_str(y.trim()).ok()?,
    })
}

pub fn parse_segments(input: &str) -> Result<Vec<Segment>, VentError> {
    let segments = input
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(line, text)| {
            let segment = text
                .split_once("->")
                .and_then(|(start, end)| {
                    Some(Segment {
                        start: parse_point(start)?,
                        end: parse_point(end)?,
                    })
                })
                .ok_or_else(|| VentError::BadSegment {
                    line,
                    text: text.trim().to_string(),
                })?;
            let value = segment.largest_coordinate();
            if value > MAX_COORDINATE {
                return Err(VentError::CoordinateTooLarge { line, value });
            }
            if segment.is_axis_aligned() || segment.is_diagonal() {
                Ok(segment)
            } else {
                Err(VentError::UnsupportedSlope(segment))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    if segments.is_empty() {
        return Err(VentError::NoSegments);
    }
    Ok(segments)
}

/// Count how many of `segments` pass through each point; rows are `y`, columns `x`
pub fn rasterize<'a>(
    segments: impl IntoIterator<Item = &'a Segment> + Clone,
) -> Result<Grid<u32>, VentError> {
    let (mut max_x, mut max_y) = (0, 0);
    for segment in segments.clone() {
        if segment.largest_coordinate() > MAX_COORDINATE {
            return Err(VentError::OutOfBounds(*segment));
        }
        max_x = max_x.max(segment.start.x.max(segment.end.x));
        max_y = max_y.max(segment.start.y.max(segment.end.y));
    }

    let (width, height) = (max_x + 1, max_y + 1);
    let mut counts =
        Grid::filled(width, height, 0u32).ok_or(VentError::GridTooLarge { width, height })?;
    for segment in segments {
        for point in segment.points() {
            counts[(point.y, point.x)] += 1;
        }
    }
    Ok(counts)
}

pub fn overlaps(segments: &[Segment], include_diagonals: bool) -> Result<usize, VentError> {
    let counts = rasterize(
        segments
            .iter()
            .filter(|segment| include_diagonals || segment.is_axis_aligned()),
    )?;
    Ok(counts.iter().filter(|(_, count)| **count > 1).count())
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Segment>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(parse_segments(input)?)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        overlaps(shared, false)
            .map(|count| count.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        overlaps(shared, true)
            .map(|count| count.to_string())
            .map_err(SolveError::failed)
    }
}
