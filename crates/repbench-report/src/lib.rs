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

//! Repbench Report
//!
//! Runs several competing implementations ("pools") through the repbench
//! aggregation engine at a range of input sizes and renders a comparative
//! console report.
//!
//! ## Features
//!
//! - **Batches**: one per test size, repeat count scaled by the iteration budget
//! - **Comparison pass**: fastest step per pool in green, slowest in red
//! - **Tee output**: plain-text copy of the report into any `Write` sink
//! - **Table export**: every measured pool as JSON or CSV rows
//!
//! ## Usage
//!
//! ```no_run
//! use repbench_report::{run_matrix, ConsoleReport, MatrixConfig};
//! # use repbench_core::{ExecutionMode, Steps, TimedResult, Workload};
//! # #[derive(Default)]
//! # struct PoolWorkload;
//! # impl Workload for PoolWorkload {
//! #     type Param = u8;
//! #     fn steps<'a>(&'a self, _: u32, _: &'a u8) -> Steps<'a> {
//! #         Box::new(std::iter::empty())
//! #     }
//! # }
//!
//! let config = MatrixConfig::default().with_sizes(&[8, 64]);
//! let mut report = ConsoleReport::for_matrix::<PoolWorkload>(&config)?;
//! report.add_benchmark("kind-a", |_size| 0);
//! report.add_benchmark("kind-b", |_size| 1);
//! run_matrix(&mut report, &config)?;
//! report.table().save_csv("pools.csv")?;
//! # Ok::<(), repbench_report::ReportError>(())
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod format;
pub mod highlight;
pub mod output;
pub mod table;

pub use config::{MatrixConfig, DEFAULT_ITERATIONS, STANDARD_SIZES};
pub use console::{benchmark_fn, run_matrix, Batch, BenchmarkFn, ConsoleReport, PoolResult};
pub use error::{ReportError, Result, MIN_ITERATIONS};
pub use format::{format_duration, split_duration, strip_ordinal_prefix};
pub use highlight::Highlight;
pub use output::{ReportWriter, StringSink, Style};
pub use table::ResultTable;
