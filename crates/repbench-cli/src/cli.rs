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

//! Command-line arguments and their execution.

use crate::error::CliError;
use crate::pools::PoolKind;
use crate::workload::PoolWorkload;
use clap::Parser;
use repbench_core::ExecutionMode;
use repbench_report::{run_matrix, ConsoleReport, MatrixConfig, DEFAULT_ITERATIONS, STANDARD_SIZES};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

/// Repbench - compare object pool implementations across sizes
///
/// Every selected pool runs the same four steps at each size. The repeat
/// count per size is `multiple * iterations / size`, and the summed step
/// times are printed with the fastest and slowest pool highlighted.
///
/// # Examples
///
/// ```bash
/// # Default sizes, all pools
/// repbench
///
/// # Two pools at two sizes, exported as CSV
/// repbench --size 16,256 --pool std-mutex --pool parking-lot --csv pools.csv
/// ```
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "repbench")]
#[command(author, version, about = "Repbench - compare object pool implementations across sizes", long_about = None)]
pub struct Cli {
    /// Test sizes; repeat or comma-separate [default: 4,8,16,32,64,128]
    #[arg(short, long = "size", value_name = "N", value_delimiter = ',')]
    pub sizes: Vec<u32>,

    /// Iteration budget shared by every size
    #[arg(short = 'n', long, value_name = "N", default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: u32,

    /// Multiplier applied to each repeat count
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    pub multiple: u32,

    /// Pools to compare; repeatable [default: all]
    #[arg(short, long = "pool", value_name = "KIND", value_enum)]
    pub pools: Vec<PoolKind>,

    /// Skip the warm-up pass
    #[arg(long)]
    pub no_pretest: bool,

    /// Run the repeats of each benchmark on the rayon thread pool
    #[arg(long)]
    pub parallel_repeats: bool,

    /// Also write the plain-text report to FILE
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Export the result table as JSON
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Export the result table as CSV
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Do not print the report to stdout
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// The test matrix described by the arguments.
    pub fn matrix_config(&self) -> MatrixConfig {
        let sizes: &[u32] = if self.sizes.is_empty() {
            STANDARD_SIZES
        } else {
            &self.sizes
        };
        let mode = if self.parallel_repeats {
            ExecutionMode::Parallel
        } else {
            ExecutionMode::Sequential
        };
        MatrixConfig::new(sizes)
            .with_iterations(self.iterations)
            .with_multiple(self.multiple)
            .with_pretest(!self.no_pretest)
            .with_mode(mode)
    }

    /// Selected pools in report order, without duplicates.
    pub fn selected_pools(&self) -> Vec<PoolKind> {
        if self.pools.is_empty() {
            return PoolKind::ALL.to_vec();
        }
        let mut pools = Vec::with_capacity(self.pools.len());
        for &kind in &self.pools {
            if !pools.contains(&kind) {
                pools.push(kind);
            }
        }
        pools
    }

    /// Runs the report and writes the requested exports.
    pub fn execute(self) -> Result<(), CliError> {
        let config = self.matrix_config();
        config.validate()?;

        let mut report = ConsoleReport::for_matrix::<PoolWorkload>(&config)?;
        if let Some(path) = &self.output {
            let file = File::create(path).map_err(|e| CliError::io_error(path, e))?;
            report = report.with_output(BufWriter::new(file));
        }
        if self.quiet {
            report = report.quiet();
        }

        let pools = self.selected_pools();
        for kind in &pools {
            let kind = *kind;
            report.add_benchmark(kind.name(), move |_size| kind);
        }

        info!(
            sizes = ?config.sizes,
            pools = pools.len(),
            iterations = config.iterations,
            "running pool comparison"
        );
        run_matrix(&mut report, &config)?;

        let table = report.table();
        if let Some(path) = &self.json {
            table.save_json(path)?;
            info!(path = %path.display(), rows = table.rows.len(), "wrote JSON table");
        }
        if let Some(path) = &self.csv {
            table.save_csv(path)?;
            info!(path = %path.display(), rows = table.rows.len(), "wrote CSV table");
        }
        Ok(())
    }
}
