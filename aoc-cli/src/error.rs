//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input store error
    #[error("Input store error: {0}")]
    InputStore(#[from] InputStoreError),

    /// Solver error
    #[error("Solver error: {0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// No explicit input and nothing stored for the puzzle
    #[error("No input for {year}/{day:02}: expected {}", .path.display())]
    MissingInput { year: u16, day: u8, path: PathBuf },

    /// Stored input exists but could not be read
    #[error("Input read failed for {year}/{day:02}: {source}")]
    InputRead {
        year: u16,
        day: u8,
        #[source]
        source: InputStoreError,
    },

    /// Solver execution failed
    #[error("Solver execution failed: {0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Input save warning (non-fatal)
    #[error("Input save failed for {year}/{day:02}: {message}")]
    InputSave { year: u16, day: u8, message: String },

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening either side that
    /// already is one so the list never nests
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let errors = match (first.inner(), second.inner()) {
            (ExecutorError::Multiple(v1), ExecutorError::Multiple(v2)) => {
                let mut combined = v1.clone();
                combined.extend(v2.iter().cloned());
                combined
            }
            (_, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first];
                combined.extend(v.iter().cloned());
                combined
            }
            (ExecutorError::Multiple(v), _) => {
                let mut combined = v.clone();
                combined.push(second);
                combined
            }
            _ => vec![first, second],
        };
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Input store errors
#[derive(Error, Debug)]
pub enum InputStoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input directory creation failed
    #[error("Input directory creation failed: {0}")]
    DirCreation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(day: u8) -> ArcExecutorError {
        ExecutorError::InputSave {
            year: 2021,
            day,
            message: "read-only".to_string(),
        }
        .into()
    }

    fn days(error: &ArcExecutorError) -> Vec<u8> {
        match error.inner() {
            ExecutorError::Multiple(errors) => errors
                .iter()
                .map(|e| match e.inner() {
                    ExecutorError::InputSave { day, .. } => *day,
                    other => panic!("unexpected {:?}", other),
                })
                .collect(),
            other => panic!("expected Multiple, got {:?}", other),
        }
    }

    #[test]
    fn combine_flattens_in_order() {
        let two = ArcExecutorError::combine(single(1), single(2));
        assert_eq!(days(&two), vec![1, 2]);

        let prepended = ArcExecutorError::combine(single(0), two.clone());
        assert_eq!(days(&prepended), vec![0, 1, 2]);

        let appended = ArcExecutorError::combine(two.clone(), single(3));
        assert_eq!(days(&appended), vec![1, 2, 3]);

        let merged = ArcExecutorError::combine(prepended, appended);
        assert_eq!(days(&merged), vec![0, 1, 2, 1, 2, 3]);
        assert_eq!(merged.to_string(), "Multiple errors occurred (6 total)");
    }

    #[test]
    fn combine_opt_keeps_lone_error() {
        let lone = ArcExecutorError::combine_opt(None, single(7));
        assert!(matches!(lone.inner(), ExecutorError::InputSave { day: 7, .. }));
    }

    #[test]
    fn missing_input_names_the_path() {
        let error = ExecutorError::MissingInput {
            year: 2021,
            day: 4,
            path: PathBuf::from("/inputs/2021_day04.txt"),
        };
        assert_eq!(
            error.to_string(),
            "No input for 2021/04: expected /inputs/2021_day04.txt"
        );
    }
}
