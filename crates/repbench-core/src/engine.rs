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

//! Repeated-run aggregation with per-instance memoization.
//!
//! A [`Benchmark`] runs its workload `repeat_count` times, aligns the steps
//! of every run by ordinal, sums each position across repeats, and caches
//! the summed result set the first time it is requested.

use crate::error::{BenchError, Result};
use crate::executor::OrdinalRun;
use crate::result::{OrdinalResult, TimedResult};
use crate::workload::{Steps, Workload};
use once_cell::sync::OnceCell;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace};

/// How the repeats of one benchmark are scheduled.
///
/// Steps inside a run always execute sequentially on one thread. Only whole
/// repeats may be spread over the rayon pool, which needs a `Sync` workload
/// and parameter; the aggregated structure is the same in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionMode {
    /// Run repeats one after another.
    #[default]
    Sequential,
    /// Run repeats concurrently on the rayon thread pool.
    Parallel,
}

/// One benchmark instance: configuration, parameter, and memoized result.
///
/// [`Benchmark::result`] runs the repeats sequentially and places no thread
/// bounds on the workload or its parameter. [`Benchmark::par_result`] is
/// available when both are `Sync`. Whichever runs first fills the memo.
///
/// # Example
///
/// ```
/// use repbench_core::{Benchmark, FnWorkload, TimedResult};
/// use std::time::Duration;
///
/// let workload = FnWorkload::new(|_size: u32, _param: &()| {
///     vec![
///         Ok(TimedResult::new("A", Duration::from_millis(10))),
///         Ok(TimedResult::new("B", Duration::from_millis(20))),
///     ]
/// });
/// let bench = Benchmark::with_workload(workload, 100, 3, ());
///
/// let result = bench.result().unwrap();
/// assert_eq!(result[0], TimedResult::new("A", Duration::from_millis(30)));
/// assert_eq!(result[1], TimedResult::new("B", Duration::from_millis(60)));
/// assert_eq!(result[2], TimedResult::total(Duration::from_millis(90)));
/// ```
pub struct Benchmark<W: Workload> {
    test_size: u32,
    repeat_count: u32,
    param: W::Param,
    workload: W,
    result: OnceCell<Vec<TimedResult>>,
}

impl<W> Benchmark<W>
where
    W: Workload + Default,
{
    /// Creates an instance using the workload's default value.
    pub fn new(test_size: u32, repeat_count: u32, param: W::Param) -> Self {
        Self::with_workload(W::default(), test_size, repeat_count, param)
    }
}

impl<W: Workload> Benchmark<W> {
    /// Creates an instance around an explicit workload value.
    pub fn with_workload(workload: W, test_size: u32, repeat_count: u32, param: W::Param) -> Self {
        Self {
            test_size,
            repeat_count,
            param,
            workload,
            result: OnceCell::new(),
        }
    }

    /// Input size forwarded to the workload.
    pub fn test_size(&self) -> u32 {
        self.test_size
    }

    /// Number of independent runs aggregated into the result.
    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    /// The opaque parameter given at construction.
    pub fn param(&self) -> &W::Param {
        &self.param
    }

    /// The workload producing each run's steps.
    pub fn workload(&self) -> &W {
        &self.workload
    }

    /// Returns true once the aggregated result has been published.
    pub fn is_computed(&self) -> bool {
        self.result.get().is_some()
    }

    /// Executes the workload once.
    ///
    /// Nothing runs until the returned iterator is consumed.
    pub fn run_once(&self) -> OrdinalRun<Steps<'_>> {
        OrdinalRun::new(self.workload.steps(self.test_size, &self.param))
    }

    /// One fresh run per repeat, in order.
    pub fn repeated(&self) -> impl Iterator<Item = OrdinalRun<Steps<'_>>> + '_ {
        (0..self.repeat_count).map(move |_| self.run_once())
    }

    fn collect_run(&self, repeat: u32) -> Result<Vec<OrdinalResult>> {
        trace!(repeat, test_size = self.test_size, "executing repeat");
        self.run_once().collect()
    }

    /// The aggregated result set, computed on first access.
    ///
    /// Repeats run one after another on the calling thread. Every call, from
    /// any thread, returns the same slice. Concurrent first callers block
    /// while one of them computes. A failed attempt publishes nothing, so a
    /// later call runs the repeats again.
    ///
    /// # Errors
    ///
    /// - [`BenchError::Step`] if a measured step fails
    /// - [`BenchError::Misaligned`] or [`BenchError::RunLengthMismatch`] if
    ///   the workload's step sequence changes shape between repeats
    pub fn result(&self) -> Result<&[TimedResult]> {
        self.memoized(ExecutionMode::Sequential, |sums| {
            for repeat in 0..self.repeat_count {
                sums.merge(repeat, self.collect_run(repeat)?)?;
            }
            Ok(())
        })
    }

    /// Consumes the instance and returns the aggregated result set.
    pub fn into_result(self) -> Result<Vec<TimedResult>> {
        self.result()?;
        Ok(self.take_result())
    }

    fn take_result(self) -> Vec<TimedResult> {
        self.result.into_inner().unwrap_or_default()
    }

    fn memoized<F>(&self, mode: ExecutionMode, fill: F) -> Result<&[TimedResult]>
    where
        F: FnOnce(&mut OrdinalSums) -> Result<()>,
    {
        self.result
            .get_or_try_init(|| {
                if self.repeat_count == 0 {
                    debug!(test_size = self.test_size, "zero repeats requested, nothing to run");
                    return Ok(Vec::new());
                }

                debug!(
                    test_size = self.test_size,
                    repeat_count = self.repeat_count,
                    mode = ?mode,
                    "aggregating benchmark repeats"
                );

                let mut sums = OrdinalSums::default();
                fill(&mut sums)?;
                Ok(sums.into_results())
            })
            .map(Vec::as_slice)
    }
}

impl<W> Benchmark<W>
where
    W: Workload + Sync,
    W::Param: Sync,
{
    /// Like [`Benchmark::result`], but runs the repeats on the rayon pool.
    ///
    /// Runs are merged in repeat order once all of them have finished, so the
    /// result and its errors match the sequential path.
    pub fn par_result(&self) -> Result<&[TimedResult]> {
        self.memoized(ExecutionMode::Parallel, |sums| {
            let runs = (0..self.repeat_count)
                .into_par_iter()
                .map(|repeat| self.collect_run(repeat))
                .collect::<Result<Vec<_>>>()?;
            for (repeat, run) in (0..self.repeat_count).zip(runs) {
                sums.merge(repeat, run)?;
            }
            Ok(())
        })
    }

    /// Aggregates with the given scheduling mode.
    pub fn result_in(&self, mode: ExecutionMode) -> Result<&[TimedResult]> {
        match mode {
            ExecutionMode::Sequential => self.result(),
            ExecutionMode::Parallel => self.par_result(),
        }
    }
}

impl<W: Workload> fmt::Debug for Benchmark<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Benchmark")
            .field("test_size", &self.test_size)
            .field("repeat_count", &self.repeat_count)
            .field("computed", &self.is_computed())
            .finish_non_exhaustive()
    }
}

/// Per-ordinal running sums across repeats.
#[derive(Debug, Default)]
struct OrdinalSums {
    run_len: Option<usize>,
    sums: BTreeMap<usize, TimedResult>,
}

impl OrdinalSums {
    fn merge(&mut self, repeat: u32, run: Vec<OrdinalResult>) -> Result<()> {
        let expected = *self.run_len.get_or_insert(run.len());
        if run.len() != expected {
            return Err(BenchError::RunLengthMismatch {
                repeat,
                expected,
                found: run.len(),
            });
        }

        for OrdinalResult { ordinal, result } in run {
            match self.sums.get_mut(&ordinal) {
                Some(sum) => {
                    let next = match sum.checked_add(&result) {
                        Ok(next) => next,
                        Err(_) => {
                            return Err(BenchError::Misaligned {
                                ordinal,
                                expected: sum.label.clone(),
                                found: result.label,
                            })
                        }
                    };
                    *sum = next;
                }
                None => {
                    self.sums.insert(ordinal, result);
                }
            }
        }
        Ok(())
    }

    fn into_results(self) -> Vec<TimedResult> {
        self.sums.into_values().collect()
    }
}

/// Builds a fresh instance, aggregates it, and returns the owned result.
///
/// This is the shape the report driver consumes: `(size, repeat, param)`
/// in, summed results out.
pub fn measure_repeated<W>(
    test_size: u32,
    repeat_count: u32,
    param: W::Param,
    mode: ExecutionMode,
) -> Result<Vec<TimedResult>>
where
    W: Workload + Default + Sync,
    W::Param: Sync,
{
    let bench = Benchmark::<W>::new(test_size, repeat_count, param);
    bench.result_in(mode)?;
    Ok(bench.take_result())
}
