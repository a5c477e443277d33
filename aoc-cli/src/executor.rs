//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::input_store::InputStore;
use aoc_solver::{DynSolver, FactoryInfo, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::borrow::Cow;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    /// Title the solver declared for this part
    pub label: Option<&'static str>,
    pub answer: Result<String, ArcExecutorError>,
    /// Set on the first part solved from a parsed instance
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// Work item representing a solver to execute
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
    pub info: FactoryInfo,
}

impl WorkItem {
    fn failed(&self, part: u8, error: ArcExecutorError) -> SolverResult {
        SolverResult {
            year: self.year,
            day: self.day,
            part,
            label: self.info.label(part),
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// Where puzzle inputs come from
#[derive(Debug, Clone)]
pub enum InputSource {
    /// One input given on the command line
    Explicit(String),
    Store(InputStore),
}

impl InputSource {
    fn get(&self, year: u16, day: u8) -> Result<Cow<'_, str>, ExecutorError> {
        match self {
            InputSource::Explicit(input) => Ok(Cow::Borrowed(input)),
            InputSource::Store(store) => match store.get(year, day) {
                Ok(Some(input)) => Ok(Cow::Owned(input)),
                Ok(None) => Err(ExecutorError::MissingInput {
                    year,
                    day,
                    path: store.path(year, day),
                }),
                Err(source) => Err(ExecutorError::InputRead { year, day, source }),
            },
        }
    }
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    input: InputSource,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        let input = match &config.input {
            Some(input) => InputSource::Explicit(input.clone()),
            None => InputSource::Store(InputStore::new(config.input_dir.clone())),
        };

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                input,
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
                info,
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Filter parts based on config.part_filter and solver's max parts
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.sync_executor_config.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();

        match self.sync_executor_config.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, &self.sync_executor_config) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part additionally splits each work item in run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => self.execute_parallel(work_items, &tx),
        }
    }

    /// Execute work items in parallel, collecting errors
    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| run_work_item(&work, tx, sync_executor_config).err())
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(err1), Some(err2)) => Some(ArcExecutorError::combine(err1, err2)),
                    (err1, err2) => err1.or(err2),
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }

    /// Execute grouped work items in parallel (for year-level parallelism)
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work_item(&work, tx, sync_executor_config) {
                            err = Some(ArcExecutorError::combine_opt(err, e))
                        }
                    }
                    err
                })
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(err1), Some(err2)) => Some(ArcExecutorError::combine(err1, err2)),
                    (err1, err2) => err1.or(err2),
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Send one failed result per part of `work`
fn fail_parts(
    work: &WorkItem,
    error: ArcExecutorError,
    tx: &Sender<SolverResult>,
) -> Result<(), ArcExecutorError> {
    for part in work.parts.clone() {
        send(tx, work.failed(part, error.clone()))?;
    }
    Ok(())
}

/// Fetch the input for one work item and solve its parts.
///
/// Input and parse failures become per-part results; only a closed channel
/// is an error here.
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let input = match sync_executor_config.input.get(work.year, work.day) {
        Ok(input) => input,
        Err(e) => return fail_parts(work, e.into(), tx),
    };

    if matches!(sync_executor_config.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, &sync_executor_config.registry)
    } else {
        run_parts_sequential(work, &input, tx, &sync_executor_config.registry)
    }
}

/// Parse once and solve the parts in order
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let mut solver = match registry.create_solver(work.year, work.day, input) {
        Ok(solver) => solver,
        Err(e) => return fail_parts(work, ExecutorError::from(e).into(), tx),
    };

    let mut parse_duration = Some(solver.parse_duration());
    for part in work.parts.clone() {
        send(tx, solve_part(work, part, &mut *solver, parse_duration.take()))?;
    }
    Ok(())
}

/// Solve every part on its own instance, buffering results to emit in order
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (result_tx, result_rx) = std::sync::mpsc::channel();
    let (year, day) = (work.year, work.day);

    work.parts
        .clone()
        .into_par_iter()
        .for_each_with(result_tx, |rtx, part| {
            let result = match registry.create_solver(year, day, input) {
                Ok(mut solver) => {
                    let parse_duration = solver.parse_duration();
                    solve_part(work, part, &mut *solver, Some(parse_duration))
                }
                Err(e) => work.failed(part, ExecutorError::from(e).into()),
            };
            rtx.send(result).ok();
        });

    let start_part = *work.parts.start();
    let mut buffer: Vec<Option<SolverResult>> = work.parts.clone().map(|_| None).collect();
    let mut next_part = start_part;

    for result in result_rx {
        let idx = usize::from(result.part - start_part);
        if let Some(slot) = buffer.get_mut(idx) {
            *slot = Some(result);
        }
        while let Some(result) = buffer
            .get_mut(usize::from(next_part - start_part))
            .and_then(Option::take)
        {
            send(tx, result)?;
            next_part += 1;
        }
    }
    Ok(())
}

fn solve_part(
    work: &WorkItem,
    part: u8,
    solver: &mut dyn DynSolver,
    parse_duration: Option<TimeDelta>,
) -> SolverResult {
    let (answer, solve_duration) = match solver.solve(part) {
        Ok(result) => {
            let solve_duration = result.duration();
            (Ok(result.answer), solve_duration)
        }
        Err(e) => (
            Err(ExecutorError::Solver(e.into()).into()),
            TimeDelta::zero(),
        ),
    };

    SolverResult {
        year: work.year,
        day: work.day,
        part,
        label: work.info.label(part),
        answer,
        parse_duration,
        solve_duration,
    }
}
