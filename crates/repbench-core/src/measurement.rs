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

//! Timing helpers for workload steps.
//!
//! The engine never reads a clock itself. Workloads time their own steps,
//! usually through these helpers, and hand back [`TimedResult`] values.

use crate::result::TimedResult;
use std::time::Instant;

/// Times a single step.
///
/// # Example
///
/// ```
/// use repbench_core::measurement::time_step;
///
/// let result = time_step("01) Allocate", || {
///     let _buf = vec![0u8; 1024];
/// });
/// assert_eq!(result.label, "01) Allocate");
/// ```
pub fn time_step<F>(label: impl Into<String>, f: F) -> TimedResult
where
    F: FnOnce(),
{
    let start = Instant::now();
    f();
    TimedResult::new(label, start.elapsed())
}

/// Times a step and returns its output alongside the result.
pub fn time_step_with<T, F>(label: impl Into<String>, f: F) -> (TimedResult, T)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let value = f();
    (TimedResult::new(label, start.elapsed()), value)
}
