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

//! Pool benchmark measured by the `repbench` binary.

use crate::pools::{Buffer, ObjectPool, PoolKind};
use repbench_core::measurement::{time_step, time_step_with};
use repbench_core::{StepOutcome, Steps, TimedResult, Workload};
use std::hint::black_box;

/// Step labels, in run order.
pub const STEP_LABELS: [&str; 4] = [
    "01) Take From Empty",
    "02) Give To Pool",
    "03) Take From Filled",
    "04) Take & Give Cycle",
];

/// Exercises one pool kind at a given size.
///
/// Each run builds a fresh pool with capacity `test_size`, so repeats share
/// no state. The steps are:
///
/// 1. take `test_size` buffers from the empty pool (all allocate)
/// 2. give them all back
/// 3. take `test_size` buffers again (all reused)
/// 4. take and immediately give back one buffer, `test_size` times
#[derive(Debug, Default, Clone, Copy)]
pub struct PoolWorkload;

impl Workload for PoolWorkload {
    type Param = PoolKind;

    fn steps<'a>(&'a self, test_size: u32, kind: &'a PoolKind) -> Steps<'a> {
        let size = test_size as usize;
        Box::new(PoolRun {
            pool: kind.build(size),
            held: Vec::new(),
            size,
            step: 0,
        })
    }
}

/// One run in progress. Each `next` call executes and times one step.
struct PoolRun {
    pool: Box<dyn ObjectPool>,
    held: Vec<Buffer>,
    size: usize,
    step: usize,
}

impl PoolRun {
    fn take_all(&mut self, label: &str) -> TimedResult {
        let (pool, size) = (&*self.pool, self.size);
        let (result, taken) =
            time_step_with(label, || (0..size).map(|_| pool.take()).collect::<Vec<_>>());
        self.held = taken;
        result
    }

    fn give_all(&mut self, label: &str) -> TimedResult {
        let (pool, held) = (&*self.pool, &mut self.held);
        time_step(label, || held.drain(..).for_each(|buffer| pool.give(buffer)))
    }

    fn cycle(&mut self, label: &str) -> TimedResult {
        // Refill untimed so the cycle starts from a full pool.
        for buffer in self.held.drain(..) {
            self.pool.give(buffer);
        }
        let (pool, size) = (&*self.pool, self.size);
        time_step(label, || {
            for _ in 0..size {
                pool.give(black_box(pool.take()));
            }
        })
    }
}

impl Iterator for PoolRun {
    type Item = StepOutcome;

    fn next(&mut self) -> Option<StepOutcome> {
        let label = *STEP_LABELS.get(self.step)?;
        let result = match self.step {
            0 | 2 => self.take_all(label),
            1 => self.give_all(label),
            _ => self.cycle(label),
        };
        self.step += 1;
        Some(Ok(result))
    }
}
