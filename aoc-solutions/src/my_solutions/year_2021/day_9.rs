use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;

use crate::utils::grid::Grid;

/// Smoke Basin
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(
    year = 2021,
    day = 9,
    tags = ["2021", "grid", "flood-fill"],
    labels = ["Sum of risk levels", "Product of the three largest basins"]
)]
pub struct Solver;

/// Height that never belongs to a basin
pub const RIDGE: u8 = 9;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeightmapError {
    #[error("heightmap is empty")]
    Empty,
    #[error("'{value}' at row {}, column {} is not a height", .row + 1, .column + 1)]
    MalformedHeight {
        row: usize,
        column: usize,
        value: char,
    },
    #[error("row {} has {found} heights, expected {expected}", .row + 1)]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("product of the largest basins does not fit in {} bits", usize::BITS)]
    ProductOverflow,
}

impl From<HeightmapError> for ParseError {
    fn from(error: HeightmapError) -> Self {
        match error {
            HeightmapError::Empty => ParseError::MissingData(error.to_string()),
            _ => ParseError::InvalidFormat(error.to_string()),
        }
    }
}

pub fn parse_heightmap(input: &str) -> Result<Grid<u8>, HeightmapError> {
    let rows = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(row, line)| {
            line.chars()
                .enumerate()
                .map(|(column, value)| {
                    value
                        .to_digit(10)
                        .map(|height| height as u8)
                        .ok_or(HeightmapError::MalformedHeight { row, column, value })
                })
                .collect::<Result<Vec<u8>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let heights = Grid::from_rows(rows).map_err(|ragged| HeightmapError::RaggedRow {
        row: ragged.row,
        expected: ragged.expected,
        found: ragged.found,
    })?;
    if heights.is_empty() {
        return Err(HeightmapError::Empty);
    }
    Ok(heights)
}

/// Positions strictly lower than every cross neighbour, row-major
pub fn low_points(heights: &Grid<u8>) -> Vec<(usize, usize)> {
    heights
        .positions()
        .filter(|&position| {
            let height = heights[position];
            heights
                .neighbors(position)
                .all(|neighbor| heights[neighbor] > height)
        })
        .collect()
}

pub fn risk_level_sum(heights: &Grid<u8>) -> u64 {
    low_points(heights)
        .into_iter()
        .map(|position| u64::from(heights[position]) + 1)
        .sum()
}

/// Size of the basin flowing into `low_point`.
///
/// A neighbour joins when it is below [`RIDGE`], not lower than the cell it
/// was reached from and not already claimed in `visited`.
pub fn basin_size(heights: &Grid<u8>, visited: &mut Grid<bool>, low_point: (usize, usize)) -> usize {
    if visited[low_point] || heights[low_point] >= RIDGE {
        return 0;
    }
    visited[low_point] = true;

    let mut size = 0;
    let mut pending = vec![low_point];
    while let Some(position) = pending.pop() {
        size += 1;
        let height = heights[position];
        for neighbor in heights.neighbors(position) {
            let next = heights[neighbor];
            if !visited[neighbor] && next < RIDGE && next >= height {
                visited[neighbor] = true;
                pending.push(neighbor);
            }
        }
    }
    size
}

pub fn basin_sizes(heights: &Grid<u8>) -> Vec<usize> {
    let mut visited = heights.map(|_| false);
    low_points(heights)
        .into_iter()
        .map(|low_point| basin_size(heights, &mut visited, low_point))
        .collect()
}

/// Product of the `count` largest basins, or of all of them when there are fewer
pub fn largest_basins_product(heights: &Grid<u8>, count: usize) -> Option<usize> {
    product_of_largest(basin_sizes(heights), count)
}

fn product_of_largest(mut sizes: Vec<usize>, count: usize) -> Option<usize> {
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes
        .into_iter()
        .take(count)
        .try_fold(1usize, |product, size| product.checked_mul(size))
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(parse_heightmap(input)?)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(risk_level_sum(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        largest_basins_product(shared, 3)
            .map(|product| product.to_string())
            .ok_or_else(|| SolveError::failed(HeightmapError::ProductOverflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
2199943210
3987894921
9856789892
8767896789
9899965678
";

    #[test]
    fn sample() {
        let mut heights = Solver::parse(SAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut heights).unwrap(), "15");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut heights).unwrap(), "1134");
    }

    #[test]
    fn sample_basins() {
        let heights = parse_heightmap(SAMPLE).unwrap();
        assert_eq!(low_points(&heights), vec![(0, 1), (0, 9), (2, 2), (4, 6)]);
        assert_eq!(basin_sizes(&heights), vec![3, 9, 14, 9]);
    }

    #[test]
    fn flood_fill_leaves_heights_untouched() {
        let heights = parse_heightmap(SAMPLE).unwrap();
        let before = heights.clone();
        basin_sizes(&heights);
        assert_eq!(heights, before);
    }

    #[test]
    fn fewer_than_three_basins_multiply_what_exists() {
        let heights = parse_heightmap("19\n99\n").unwrap();
        assert_eq!(basin_sizes(&heights), vec![1]);
        assert_eq!(largest_basins_product(&heights, 3), Some(1));

        let heights = parse_heightmap("129\n999\n321\n").unwrap();
        assert_eq!(basin_sizes(&heights), vec![2, 3]);
        assert_eq!(largest_basins_product(&heights, 3), Some(6));
    }

    #[test]
    fn one_basin_can_cover_a_large_map() {
        let row = "1".repeat(300);
        let input = format!("0{}\n{}", &row[1..], format!("{}\n", row).repeat(299));
        let mut heights = Solver::parse(&input).unwrap();
        assert_eq!((heights.width(), heights.height()), (300, 300));
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut heights).unwrap(), "1");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut heights).unwrap(), "90000");
    }

    #[test]
    fn basin_product_overflow_is_reported() {
        assert_eq!(product_of_largest(vec![1, usize::MAX, 2], 3), None);
        assert_eq!(product_of_largest(vec![1, usize::MAX, 2], 1), Some(usize::MAX));
        assert_eq!(product_of_largest(Vec::new(), 3), Some(1));
    }

    #[test]
    fn malformed_maps_are_rejected() {
        assert_eq!(
            parse_heightmap("123\n1x3\n"),
            Err(HeightmapError::MalformedHeight {
                row: 1,
                column: 1,
                value: 'x'
            })
        );
        assert_eq!(
            parse_heightmap("123\n12\n"),
            Err(HeightmapError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert!(matches!(Solver::parse("\n"), Err(ParseError::MissingData(_))));
    }
}
