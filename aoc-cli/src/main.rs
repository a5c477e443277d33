//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod input_store;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use error::{ArcExecutorError, CliError, ExecutorError};
use executor::{Executor, WorkItem};
use input_store::InputStore;
use output::OutputFormatter;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;

    // Build registry with tag filtering (only once)
    let registry = build_registry(&config.tags)?;

    let executor = Executor::new(registry, &config).map_err(ArcExecutorError::from)?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let store = InputStore::new(config.input_dir.clone());
    match &config.input {
        Some(input) => {
            let [work] = work_items.as_slice() else {
                return Err(CliError::Config(format!(
                    "--input needs exactly one selected puzzle, but {} match; narrow it with --year/--day/--tags",
                    work_items.len()
                )));
            };
            if config.save_input {
                save_input(&store, work, input);
            }
        }
        None => warn_missing_inputs(&store, &work_items),
    }

    run_executor(executor, work_items, config.quiet)
}

/// Copy the explicit input into the store; failing to do so only warrants a warning
fn save_input(store: &InputStore, work: &WorkItem, input: &str) {
    if let Err(e) = store.put(work.year, work.day, input) {
        eprintln!(
            "Warning: {}",
            ExecutorError::InputSave {
                year: work.year,
                day: work.day,
                message: e.to_string(),
            }
        );
    }
}

/// List puzzles with nothing in the input directory before running anything
fn warn_missing_inputs(store: &InputStore, work_items: &[WorkItem]) {
    let missing: Vec<_> = work_items
        .iter()
        .filter(|w| !store.contains(w.year, w.day))
        .collect();
    if missing.is_empty() {
        return;
    }

    eprintln!("Warning: Missing {} input file(s):", missing.len());
    for w in missing {
        eprintln!("  - {}", store.path(w.year, w.day).display());
    }
}

/// Run the executor and collect results
fn run_executor(
    executor: Executor,
    work_items: Vec<WorkItem>,
    quiet: bool,
) -> Result<(), CliError> {
    if !quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected_keys = aggregator::ResultKey::expected_from(&work_items);

    let (tx, rx) = std::sync::mpsc::channel();

    // Run executor in background thread
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    // Collect and display results in order using aggregator
    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        eprintln!("Warning: Not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))??;

    formatter.print_summary(&results);

    Ok(())
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
