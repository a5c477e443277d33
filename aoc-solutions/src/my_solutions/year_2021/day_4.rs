use std::str::FromStr;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;

use crate::utils::grid::Grid;

/// Giant Squid
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(
    year = 2021,
    day = 4,
    tags = ["2021", "simulation", "grid"],
    labels = ["Score of the first winning board", "Score of the last winning board"]
)]
pub struct Solver;

pub const BOARD_WIDTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BingoError {
    #[error("input has no line of drawn numbers")]
    MissingDraws,
    #[error("'{token}' is not a bingo number")]
    BadNumber { token: String },
    #[error("board {} row {} has {found} numbers, expected {}", .board + 1, .row + 1, BOARD_WIDTH)]
    RowWidth {
        board: usize,
        row: usize,
        found: usize,
    },
    #[error("board {} ends after {rows} of {} rows", .board + 1, BOARD_WIDTH)]
    TruncatedBoard { board: usize, rows: usize },
    #[error("input has no boards")]
    NoBoards,
    #[error("no board wins with the drawn numbers")]
    NoWinner,
}

impl From<BingoError> for ParseError {
    fn from(error: BingoError) -> Self {
        match error {
            BingoError::MissingDraws | BingoError::NoBoards | BingoError::TruncatedBoard { .. } => {
                ParseError::MissingData(error.to_string())
            }
            _ => ParseError::InvalidFormat(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub number: u32,
    pub marked: bool,
}

/// One 5×5 board; cloning gives an independent copy with its own marks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Grid<Cell>,
}

impl Board {
    fn parse(board: usize, rows: &[&str]) -> Result<Self, BingoError> {
        if rows.len() < BOARD_WIDTH {
            return Err(BingoError::TruncatedBoard {
                board,
                rows: rows.len(),
            });
        }

        let rows = rows
            .iter()
            .enumerate()
            .map(|(row, line)| {
                let numbers = parse_numbers(line.split_whitespace())?;
                if numbers.len() != BOARD_WIDTH {
                    return Err(BingoError::RowWidth {
                        board,
                        row,
                        found: numbers.len(),
                    });
                }
                Ok(numbers
                    .into_iter()
                    .map(|number| Cell {
                        number,
                        marked: false,
                    })
                    .collect::<Vec<_>>())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cells = Grid::from_rows(rows).map_err(|ragged| BingoError::RowWidth {
            board,
            row: ragged.row,
            found: ragged.found,
        })?;
        Ok(Self { cells })
    }

    /// Mark the first cell holding `number`, returning where it was
    pub fn mark(&mut self, number: u32) -> Option<(usize, usize)> {
        let position = self
            .cells
            .iter()
            .find(|(_, cell)| cell.number == number)
            .map(|(position, _)| position)?;
        if let Some(cell) = self.cells.get_mut(position) {
            cell.marked = true;
        }
        Some(position)
    }

    /// Whether the row or column through `position` is fully marked
    pub fn wins_at(&self, (row, column): (usize, usize)) -> bool {
        let row_complete = self
            .cells
            .row(row)
            .is_some_and(|cells| cells.iter().all(|cell| cell.marked));
        row_complete || self.cells.column(column).all(|cell| cell.marked)
    }

    pub fn unmarked_sum(&self) -> u64 {
        self.cells
            .iter()
            .filter(|(_, cell)| !cell.marked)
            .map(|(_, cell)| u64::from(cell.number))
            .sum()
    }

    pub fn cell(&self, position: (usize, usize)) -> Option<&Cell> {
        self.cells.get(position)
    }
}

/// A board completing a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Win {
    /// Index into the draw sequence
    pub draw: usize,
    pub call: u32,
    pub board: usize,
    pub score: u128,
}

#[derive(Debug)]
pub struct SharedData {
    draws: Vec<u32>,
    boards: Vec<Board>,
    wins: Option<Vec<Win>>,
}

fn parse_numbers<'a>(tokens: impl Iterator<Item = &'a str>) -> Result<Vec<u32>, BingoError> {
    tokens
        .map(|token| {
            <u32 as FromStr>::from_str(token).map_err(|_| BingoError::BadNumber {
                token: token.to_string(),
            })
        })
        .collect()
}

pub fn parse_bingo(input: &str) -> Result<(Vec<u32>, Vec<Board>), BingoError> {
    let mut lines = input.lines().map(str::trim).skip_while(|line| line.is_empty());

    let draws_line = lines.next().ok_or(BingoError::MissingDraws)?;
    let draws = parse_numbers(
        draws_line
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty()),
    )?;
    if draws.is_empty() {
        return Err(BingoError::MissingDraws);
    }

    // Blank lines separate boards; a block with more rows holds several boards back to back
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in lines {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    let boards = blocks
        .iter()
        .flat_map(|block| block.chunks(BOARD_WIDTH))
        .enumerate()
        .map(|(board, rows)| Board::parse(board, rows))
        .collect::<Result<Vec<_>, _>>()?;

    if boards.is_empty() {
        return Err(BingoError::NoBoards);
    }
    Ok((draws, boards))
}

/// Call every number on copies of `boards`, recording each board's first win in order
pub fn play(draws: &[u32], boards: &[Board]) -> Vec<Win> {
    let mut boards = boards.to_vec();
    let mut won = vec![false; boards.len()];
    let mut wins = Vec::new();

    for (draw, &call) in draws.iter().enumerate() {
        for (index, board) in boards.iter_mut().enumerate() {
            if won[index] {
                continue;
            }
            if let Some(position) = board.mark(call)
                && board.wins_at(position)
            {
                won[index] = true;
                wins.push(Win {
                    draw,
                    call,
                    board: index,
                    score: u128::from(board.unmarked_sum()) * u128::from(call),
                });
            }
        }
    }

    wins
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (draws, boards) = parse_bingo(input)?;
        Ok(SharedData {
            draws,
            boards,
            wins: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        wins(shared)
            .first()
            .map(|win| win.score.to_string())
            .ok_or_else(|| SolveError::failed(BingoError::NoWinner))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        wins(shared)
            .last()
            .map(|win| win.score.to_string())
            .ok_or_else(|| SolveError::failed(BingoError::NoWinner))
    }
}

fn wins(shared: &mut SharedData) -> &[Win] {
    let SharedData {
        draws,
        boards,
        wins,
    } = shared;
    wins.get_or_insert_with(|| play(draws, boards))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
7,4,9,5,11,17,23,2,0,14,21,24,10,16,13,6,15,25,12,22,18,20,8,19,3,26,1

22 13 17 11  0
 8  2 23  4 24
21  9 14 16  7
 6 10  3 18  5
 1 12 20 15 19

 3 15  0  2 22
 9 18 13 17  5
19  8  7 25 23
20 11 10 24  4
14 21 16 12  6

14 21 17 24  4
10 16 15  9 19
18  8 23 26 20
22 11 13  6  5
 2  0 12  3  7
";

    #[test]
    fn sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "4512");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "1924");
    }

    #[test]
    fn sample_win_order() {
        let (draws, boards) = parse_bingo(SAMPLE).unwrap();
        assert_eq!(draws.len(), 27);
        assert_eq!(boards.len(), 3);

        let wins = play(&draws, &boards);
        assert_eq!(wins.len(), 3);
        assert_eq!(
            wins[0],
            Win {
                draw: 11,
                call: 24,
                board: 2,
                score: 4512
            }
        );
        assert_eq!(wins[2].board, 1);
        assert_eq!(wins[2].call, 13);
    }

    #[test]
    fn play_leaves_parsed_boards_unmarked() {
        let (draws, boards) = parse_bingo(SAMPLE).unwrap();
        play(&draws, &boards);
        assert_eq!(boards[0].cell((0, 0)).map(|c| c.marked), Some(false));
        // The first sample board holds 0 through 24
        assert_eq!(boards[0].unmarked_sum(), (0..25).sum::<u64>());
    }

    #[test]
    fn column_completion_wins() {
        let input = "1,6,11,16,21\n\n1 2 3 4 5\n6 7 8 9 10\n11 12 13 14 15\n16 17 18 19 20\n21 22 23 24 25\n";
        let (draws, boards) = parse_bingo(input).unwrap();
        let wins = play(&draws, &boards);
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].draw, 4);
        assert_eq!(wins[0].score, (325 - 55) * 21);
    }

    #[test]
    fn boards_without_separator_are_split() {
        let board = "1 2 3 4 5\n6 7 8 9 10\n11 12 13 14 15\n16 17 18 19 20\n21 22 23 24 25\n";
        let input = format!("1\n\n{}{}", board, board);
        let (_, boards) = parse_bingo(&input).unwrap();
        assert_eq!(boards.len(), 2);
    }

    #[test]
    fn no_winner_is_a_solve_failure() {
        let mut shared = Solver::parse("99\n\n1 2 3 4 5\n6 7 8 9 10\n11 12 13 14 15\n16 17 18 19 20\n21 22 23 24 25\n").unwrap();
        let err = <Solver as PartSolver<1>>::solve(&mut shared).unwrap_err();
        assert!(err.to_string().contains("no board wins"));
    }

    #[test]
    fn malformed_inputs_name_the_problem() {
        assert_eq!(parse_bingo("\n\n"), Err(BingoError::MissingDraws));
        assert_eq!(parse_bingo("1,2,3\n"), Err(BingoError::NoBoards));
        assert_eq!(
            parse_bingo("1,x\n"),
            Err(BingoError::BadNumber {
                token: "x".to_string()
            })
        );
        assert_eq!(
            parse_bingo("1\n\n1 2 3 4 5\n6 7 8 9 10\n"),
            Err(BingoError::TruncatedBoard { board: 0, rows: 2 })
        );
        assert_eq!(
            parse_bingo("1\n\n1 2 3 4 5\n6 7 8 9\n11 12 13 14 15\n16 17 18 19 20\n21 22 23 24 25\n"),
            Err(BingoError::RowWidth {
                board: 0,
                row: 1,
                found: 4
            })
        );
    }

    #[test]
    fn truncated_board_is_missing_data() {
        let err = Solver::parse("1\n\n1 2 3 4 5\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingData(_)));
    }

    #[test]
    fn largest_numbers_score_without_overflow() {
        let input = "\
4294967271,4294967272,4294967273,4294967274,4294967275

4294967271 4294967272 4294967273 4294967274 4294967275
4294967276 4294967277 4294967278 4294967279 4294967280
4294967281 4294967282 4294967283 4294967284 4294967285
4294967286 4294967287 4294967288 4294967289 4294967290
4294967291 4294967292 4294967293 4294967294 4294967295
";
        let mut game = Solver::parse(input).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut game).unwrap(), "368934878768361640250");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut game).unwrap(), "368934878768361640250");
    }
}
