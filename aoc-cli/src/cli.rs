//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; execute all solvers sequentially in order
    Sequential,
    /// Parallelize across years; days and parts run sequentially within each year
    Year,
    /// Parallelize across year/day combinations; parts run sequentially (default)
    #[default]
    Day,
    /// Parallelize across all year/day/part combinations
    Part,
}

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Puzzle input file for the selected day, `-` to read standard input
    #[arg(short, long, value_name = "FILE|-")]
    pub input: Option<PathBuf>,

    /// Directory holding `{year}_day{day:02}.txt` inputs
    #[arg(long, default_value = "~/.cache/aoc_solver")]
    pub input_dir: PathBuf,

    /// Copy the explicit input into the input directory
    #[arg(long, requires = "input")]
    pub save_input: bool,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["aoc"]).unwrap();
        assert_eq!(args.year, None);
        assert!(args.tags.is_empty());
        assert_eq!(args.input, None);
        assert_eq!(args.input_dir, PathBuf::from("~/.cache/aoc_solver"));
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert!(!args.save_input && !args.quiet);
    }

    #[test]
    fn stdin_selection() {
        let args =
            Args::try_parse_from(["aoc", "-y", "2021", "-d", "3", "--input", "-", "-q"]).unwrap();
        assert_eq!((args.year, args.day), (Some(2021), Some(3)));
        assert_eq!(args.input, Some(PathBuf::from("-")));
        assert!(args.quiet);
    }

    #[test]
    fn tags_split_on_commas() {
        let args = Args::try_parse_from(["aoc", "--tags", "2021,grid"]).unwrap();
        assert_eq!(args.tags, vec!["2021".to_string(), "grid".to_string()]);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(Args::try_parse_from(["aoc", "--day", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--day", "0"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--part", "3"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--parallelize-by", "week"]).is_err());
    }

    #[test]
    fn save_input_needs_an_input() {
        assert!(Args::try_parse_from(["aoc", "--save-input"]).is_err());
        let args = Args::try_parse_from(["aoc", "--input", "day1.txt", "--save-input"]).unwrap();
        assert!(args.save_input);
    }
}
