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

//! Single-run executor.
//!
//! Turns a workload's step sequence into ordinal-tagged results and closes
//! the run with the synthetic TOTAL entry.

use crate::error::{BenchError, Result};
use crate::result::{OrdinalResult, TimedResult};
use crate::workload::StepOutcome;
use std::iter::FusedIterator;
use std::time::Duration;

/// Lazy, ordinal-tagged view of one run.
///
/// Steps execute as this iterator is consumed. Ordinals start at 0 and are
/// contiguous; the last item is always the TOTAL entry. A failing step is
/// yielded once as [`BenchError::Step`] and ends the run without a TOTAL.
#[derive(Debug)]
pub struct OrdinalRun<I> {
    steps: I,
    next_ordinal: usize,
    total: Duration,
    finished: bool,
}

impl<I> OrdinalRun<I>
where
    I: Iterator<Item = StepOutcome>,
{
    /// Wraps a step sequence.
    pub fn new(steps: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            steps: steps.into_iter(),
            next_ordinal: 0,
            total: Duration::ZERO,
            finished: false,
        }
    }

    /// Running total of the durations seen so far.
    pub fn elapsed(&self) -> Duration {
        self.total
    }
}

impl<I> Iterator for OrdinalRun<I>
where
    I: Iterator<Item = StepOutcome>,
{
    type Item = Result<OrdinalResult>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let ordinal = self.next_ordinal;
        match self.steps.next() {
            Some(Ok(result)) => {
                self.total += result.duration;
                self.next_ordinal += 1;
                Some(Ok(OrdinalResult::new(ordinal, result)))
            }
            Some(Err(source)) => {
                self.finished = true;
                Some(Err(BenchError::step(ordinal, source)))
            }
            None => {
                self.finished = true;
                Some(Ok(OrdinalResult::new(
                    ordinal,
                    TimedResult::total(self.total),
                )))
            }
        }
    }
}

impl<I> FusedIterator for OrdinalRun<I> where I: Iterator<Item = StepOutcome> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StepError;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_ordinals_and_total() {
        let steps = vec![
            Ok(TimedResult::new("A", ms(10))),
            Ok(TimedResult::new("B", ms(20))),
        ];
        let run: Vec<_> = OrdinalRun::new(steps)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(
            run,
            vec![
                OrdinalResult::new(0, TimedResult::new("A", ms(10))),
                OrdinalResult::new(1, TimedResult::new("B", ms(20))),
                OrdinalResult::new(2, TimedResult::total(ms(30))),
            ]
        );
    }

    #[test]
    fn test_empty_run_yields_only_total() {
        let run: Vec<_> = OrdinalRun::new(Vec::<StepOutcome>::new())
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(run, vec![OrdinalResult::new(0, TimedResult::total(ms(0)))]);
    }

    #[test]
    fn test_failure_ends_run() {
        let steps: Vec<StepOutcome> = vec![
            Ok(TimedResult::new("A", ms(1))),
            Err(StepError::from("exploded")),
            Ok(TimedResult::new("C", ms(1))),
        ];
        let mut run = OrdinalRun::new(steps);

        assert!(run.next().unwrap().is_ok());
        match run.next() {
            Some(Err(BenchError::Step { ordinal, source })) => {
                assert_eq!(ordinal, 1);
                assert_eq!(source.to_string(), "exploded");
            }
            other => panic!("Expected step failure, got {:?}", other),
        }
        assert!(run.next().is_none());
        assert!(run.next().is_none());
    }

    #[test]
    fn test_steps_run_lazily() {
        use std::cell::Cell;

        let executed = Cell::new(0);
        let steps = (0..3).map(|i| {
            executed.set(executed.get() + 1);
            Ok(TimedResult::new(format!("step {}", i), ms(1)))
        });
        let mut run = OrdinalRun::new(steps);
        assert_eq!(executed.get(), 0);

        run.next();
        assert_eq!(executed.get(), 1);
        assert_eq!(run.elapsed(), ms(1));
    }
}
