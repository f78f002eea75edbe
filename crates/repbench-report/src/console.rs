// Repbench - Repeated-Run Micro-Benchmark Harness
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Comparative console report across pools.
//!
//! A [`ConsoleReport`] holds a set of named pools and one benchmark function.
//! For each test size it runs every pool, prints the results as they arrive,
//! then prints a comparison pass in which the fastest and slowest pool for
//! each step are highlighted. Every measured pool also lands in a
//! [`ResultTable`].

use crate::config::{repeat_count, MatrixConfig, PRETEST_REPEAT};
use crate::error::{validate_iterations, ReportError, Result};
use crate::format::{format_duration, pool_header, strip_ordinal_prefix};
use crate::highlight::Highlight;
use crate::output::{ReportWriter, Style};
use crate::table::ResultTable;
use repbench_core::{measure_repeated, ExecutionMode, TimedResult, Workload};
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Width of the dotted pool header line.
pub const HEADER_WIDTH: usize = 56;

/// Runs one benchmark: `(size, repeat, param)` to summed results.
pub type BenchmarkFn<P> =
    Arc<dyn Fn(u32, u32, &P) -> repbench_core::Result<Vec<TimedResult>> + Send + Sync>;

/// Builds a pool's parameter for a test size.
pub type ParamFn<P> = Box<dyn Fn(u32) -> P + Send + Sync>;

/// Wraps a workload type into a [`BenchmarkFn`].
///
/// Each call builds a fresh benchmark instance from a clone of the pool's
/// parameter, so nothing is shared between pools or sizes.
pub fn benchmark_fn<W>(mode: ExecutionMode) -> BenchmarkFn<W::Param>
where
    W: Workload + Default + Sync + 'static,
    W::Param: Clone + Sync + 'static,
{
    Arc::new(move |size: u32, repeat: u32, param: &W::Param| {
        measure_repeated::<W>(size, repeat, param.clone(), mode)
    })
}

/// Results of one pool within a batch.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PoolResult {
    /// Dotted header line printed above the results.
    pub header: String,
    /// Pool name.
    pub pool: String,
    /// Summed results, TOTAL last.
    pub results: Vec<TimedResult>,
}

/// Every pool measured at one size.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Batch {
    /// Batch title, e.g. `Repeat 2500 for size 40`.
    pub name: String,
    /// Test size.
    pub size: u32,
    /// Repeat count used for every pool.
    pub repeat: u32,
    /// Per-pool results, in registration order.
    pub pools: Vec<PoolResult>,
}

impl Batch {
    /// All results of all pools, for min/max comparison.
    pub fn all_results(&self) -> impl Iterator<Item = &TimedResult> + '_ {
        self.pools.iter().flat_map(|p| p.results.iter())
    }
}

/// Console report comparing several pools over a range of sizes.
///
/// # Example
///
/// ```no_run
/// use repbench_report::console::{benchmark_fn, ConsoleReport};
/// use repbench_core::{ExecutionMode, Steps, TimedResult, Workload};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Noop;
///
/// impl Workload for Noop {
///     type Param = &'static str;
///
///     fn steps<'a>(&'a self, _size: u32, _name: &'a &'static str) -> Steps<'a> {
///         Box::new(std::iter::once(Ok(TimedResult::new("01) Noop", Duration::ZERO))))
///     }
/// }
///
/// let mut report = ConsoleReport::new(1_000, benchmark_fn::<Noop>(ExecutionMode::Sequential))?;
/// report.add_benchmark("first", |_| "first");
/// report.add_benchmark("second", |_| "second");
/// report.test(4, 1)?;
/// # Ok::<(), repbench_report::ReportError>(())
/// ```
pub struct ConsoleReport<P> {
    iterations: u32,
    mode: Option<ExecutionMode>,
    benchmark: BenchmarkFn<P>,
    out: ReportWriter,
    benchmarks: Vec<(String, ParamFn<P>)>,
    result_labels: Option<Vec<String>>,
    results: Vec<Vec<String>>,
}

impl<P> ConsoleReport<P> {
    /// Creates a report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TooFewIterations`] for budgets below
    /// [`crate::MIN_ITERATIONS`].
    pub fn new(iterations: u32, benchmark: BenchmarkFn<P>) -> Result<Self> {
        validate_iterations(iterations)?;
        Ok(Self {
            iterations,
            mode: None,
            benchmark,
            out: ReportWriter::console(),
            benchmarks: Vec::new(),
            result_labels: None,
            results: Vec::new(),
        })
    }

    /// Creates a report for workload `W` using the matrix's iteration budget
    /// and execution mode.
    pub fn for_matrix<W>(config: &MatrixConfig) -> Result<Self>
    where
        W: Workload<Param = P> + Default + Sync + 'static,
        P: Clone + Sync + 'static,
    {
        let mut report = Self::new(config.iterations, benchmark_fn::<W>(config.mode))?;
        report.mode = Some(config.mode);
        Ok(report)
    }

    /// Mirrors the plain-text report into `sink`.
    pub fn with_output(mut self, sink: impl Write + Send + 'static) -> Self {
        self.out = self.out.with_sink(sink);
        self
    }

    /// Suppresses console output; only the sink, if any, is written.
    pub fn quiet(mut self) -> Self {
        self.out = self.out.with_console(false);
        self
    }

    /// The iteration budget.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Execution mode baked into the benchmark function, when known.
    ///
    /// Reports built with [`ConsoleReport::new`] take an opaque function
    /// and return `None`.
    pub fn mode(&self) -> Option<ExecutionMode> {
        self.mode
    }

    /// Registers a pool.
    pub fn add_benchmark<F>(&mut self, name: impl Into<String>, param: F)
    where
        F: Fn(u32) -> P + Send + Sync + 'static,
    {
        self.benchmarks.push((name.into(), Box::new(param)));
    }

    /// Names of the registered pools.
    pub fn pool_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.benchmarks.iter().map(|(name, _)| name.as_str())
    }

    /// Column labels, fixed by the first measured pool.
    pub fn result_labels(&self) -> &[String] {
        self.result_labels.as_deref().unwrap_or(&[])
    }

    /// One row per measured pool: `[batch, pool, durations...]`.
    pub fn results(&self) -> &[Vec<String>] {
        &self.results
    }

    /// Snapshot of the accumulated table.
    pub fn table(&self) -> ResultTable {
        ResultTable::new(self.result_labels().to_vec(), self.results.clone())
    }

    /// Runs every pool once and discards the results.
    pub fn pretest(&mut self, count: u32, repeat: u32) -> Result<()> {
        debug!(count, repeat, pools = self.benchmarks.len(), "running pretest");
        for (name, param) in &self.benchmarks {
            (self.benchmark)(count, repeat, &param(count)).map_err(|source| {
                ReportError::Pool {
                    pool: name.clone(),
                    source,
                }
            })?;
        }
        Ok(())
    }

    /// Measures every pool at `count` and prints the comparison.
    ///
    /// The repeat count is `multiple * iterations / count`. If a pool fails,
    /// the rows recorded for this batch are dropped and the error names the
    /// pool; text already written stays in the output.
    pub fn test(&mut self, count: u32, multiple: u32) -> Result<Batch> {
        let repeat = repeat_count(self.iterations, multiple, count)?;
        let name = format!("Repeat {} for size {}", repeat, count);
        info!(size = count, repeat, "starting batch");
        if repeat == 0 {
            warn!(size = count, "size exceeds the iteration budget, pools will report nothing");
        }

        self.out.line_styled(&name, Style::Header, false)?;
        self.out.separator(false)?;
        self.out.new_line(false)?;

        let (rows, labels_fixed) = (self.results.len(), self.result_labels.is_some());
        let benchmarks = std::mem::take(&mut self.benchmarks);
        let pools = benchmarks
            .iter()
            .map(|(pool, param)| self.test_result(&name, pool, count, repeat, param(count)))
            .collect::<Result<Vec<_>>>();
        self.benchmarks = benchmarks;

        let pools = match pools {
            Ok(pools) => pools,
            Err(err) => {
                self.results.truncate(rows);
                if !labels_fixed {
                    self.result_labels = None;
                }
                return Err(err);
            }
        };
        let batch = Batch {
            name,
            size: count,
            repeat,
            pools,
        };

        self.print_comparison(&batch)?;
        self.out.new_line(false)?;
        self.out.flush()?;
        Ok(batch)
    }

    /// Measures one pool, prints its results, and records a table row.
    pub fn test_result(
        &mut self,
        batch: &str,
        pool: &str,
        count: u32,
        repeat: u32,
        param: P,
    ) -> Result<PoolResult> {
        let header = pool_header(pool, HEADER_WIDTH);
        self.out.line(&header, false)?;

        debug!(pool, size = count, repeat, "measuring pool");
        let results = (self.benchmark)(count, repeat, &param).map_err(|source| {
            ReportError::Pool {
                pool: pool.to_string(),
                source,
            }
        })?;

        for result in &results {
            self.out.result(result, Style::Plain, false)?;
        }
        self.out.new_line(false)?;

        if self.result_labels.is_none() {
            let mut labels = vec!["Batch".to_string(), "Pool Type".to_string()];
            labels.extend(
                results
                    .iter()
                    .map(|r| strip_ordinal_prefix(&r.label).to_string()),
            );
            self.result_labels = Some(labels);
        }

        let mut row = vec![batch.to_string(), pool.to_string()];
        row.extend(results.iter().map(|r| format_duration(r.duration)));
        self.results.push(row);

        Ok(PoolResult {
            header,
            pool: pool.to_string(),
            results,
        })
    }

    fn print_comparison(&mut self, batch: &Batch) -> Result<()> {
        let all: Vec<&TimedResult> = batch.all_results().collect();
        for pool in &batch.pools {
            self.out.line(&pool.header, true)?;
            for result in &pool.results {
                let highlight = Highlight::classify(result, all.iter().copied());
                self.out.result(result, highlight.into(), true)?;
            }
            self.out.new_line(true)?;
        }
        Ok(())
    }
}

/// Runs a full matrix: optional warm-up, then one batch per size.
///
/// The report must share the matrix's iteration budget and, if it was built
/// with [`ConsoleReport::for_matrix`], its execution mode.
pub fn run_matrix<P>(report: &mut ConsoleReport<P>, config: &MatrixConfig) -> Result<Vec<Batch>> {
    config.validate()?;
    if report.iterations() != config.iterations {
        return Err(ReportError::invalid_config(
            "iterations",
            format!(
                "report uses {} but the matrix asks for {}",
                report.iterations(),
                config.iterations
            ),
        ));
    }

    if let Some(mode) = report.mode() {
        if mode != config.mode {
            return Err(ReportError::invalid_config(
                "mode",
                format!(
                    "report runs repeats {:?} but the matrix asks for {:?}",
                    mode, config.mode
                ),
            ));
        }
    }

    if config.pretest {
        if let Some(&first) = config.sizes.first() {
            report.pretest(first, PRETEST_REPEAT)?;
        }
    }

    config
        .sizes
        .iter()
        .map(|&size| report.test(size, config.multiple))
        .collect()
}
