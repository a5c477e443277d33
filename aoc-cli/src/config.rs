//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Directory of stored inputs
    pub input_dir: PathBuf,
    /// Input read from `--input`, used for the single selected day
    pub input: Option<String>,
    /// Whether to copy the explicit input into `input_dir`
    pub save_input: bool,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args, reading `--input -` from standard input
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        Self::from_args_with_stdin(args, std::io::stdin().lock())
    }

    pub fn from_args_with_stdin(args: Args, stdin: impl Read) -> Result<Self, CliError> {
        let input_dir = expand_tilde(&args.input_dir);

        let thread_count = match args.threads {
            Some(0) => {
                return Err(CliError::Config(
                    "--threads must be at least 1".to_string(),
                ));
            }
            Some(n) => n,
            None => num_cpus(),
        };

        if args.save_input && args.input.is_none() {
            return Err(CliError::Config(
                "--save-input needs an explicit --input".to_string(),
            ));
        }

        let input = args
            .input
            .as_deref()
            .map(|source| read_input(source, stdin))
            .transpose()?;

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_dir,
            input,
            save_input: args.save_input,
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
        })
    }
}

/// Read the whole explicit input once, `-` meaning standard input
fn read_input(source: &Path, mut stdin: impl Read) -> Result<String, CliError> {
    if source == Path::new("-") {
        let mut input = String::new();
        stdin
            .read_to_string(&mut input)
            .map_err(|e| CliError::Config(format!("Failed to read standard input: {}", e)))?;
        return Ok(input);
    }

    let path = expand_tilde(source);
    std::fs::read_to_string(&path)
        .map_err(|e| CliError::Config(format!("Failed to read {}: {}", path.display(), e)))
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && let Some(rest) = path_str
            .strip_prefix("~/")
            .or_else(|| (path_str == "~").then_some(""))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
