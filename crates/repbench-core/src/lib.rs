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

//! Repbench Core
//!
//! Aggregation engine for repeated-run micro-benchmarks.
//!
//! ## Concepts
//!
//! - **Step**: one named, timed unit of work, reported as a [`TimedResult`]
//! - **Run**: one full pass over a [`Workload`]'s steps, closed by a
//!   synthetic `TOTAL` entry
//! - **Repeat**: one independent run; a [`Benchmark`] sums its repeats
//!   position by position
//!
//! ## Usage
//!
//! ```
//! use repbench_core::measurement::time_step;
//! use repbench_core::{Benchmark, Steps, Workload};
//!
//! #[derive(Default)]
//! struct Sorting;
//!
//! impl Workload for Sorting {
//!     type Param = u64;
//!
//!     fn steps<'a>(&'a self, test_size: u32, seed: &'a u64) -> Steps<'a> {
//!         let mut data: Vec<u64> = (0..test_size as u64).map(|i| i ^ seed).collect();
//!         Box::new(std::iter::once(Ok(time_step("01) Sort", move || data.sort()))))
//!     }
//! }
//!
//! let bench = Benchmark::<Sorting>::new(1_000, 5, 42);
//! let result = bench.result().unwrap();
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[1].label, "TOTAL");
//! ```

pub mod engine;
pub mod error;
pub mod executor;
pub mod measurement;
pub mod result;
pub mod workload;

pub use engine::{measure_repeated, Benchmark, ExecutionMode};
pub use error::{BenchError, Result, StepError};
pub use executor::OrdinalRun;
pub use measurement::{time_step, time_step_with};
pub use result::{OrdinalResult, TimedResult, TOTAL_LABEL};
pub use workload::{FnWorkload, StepOutcome, Steps, Workload};
