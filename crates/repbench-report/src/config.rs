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

//! Test-matrix configuration.
//!
//! Describes which sizes a report covers, the iteration budget that sets the
//! repeat count per size, and whether a warm-up pass runs first.

use crate::error::{validate_iterations, ReportError, Result};
use repbench_core::ExecutionMode;

/// Default pool sizes for a comparison matrix.
pub const STANDARD_SIZES: &[u32] = &[4, 8, 16, 32, 64, 128];

/// Default iteration budget.
///
/// The repeat count for a size is `multiple * iterations / size`, so each
/// batch handles roughly the same number of items.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Repeats used by the warm-up pass.
pub const PRETEST_REPEAT: u32 = 10;

/// Configuration of a full report run.
///
/// # Example
///
/// ```
/// use repbench_report::config::MatrixConfig;
///
/// let config = MatrixConfig::default()
///     .with_sizes(&[8, 64])
///     .with_iterations(10_000)
///     .with_pretest(false);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.repeat_for(8).unwrap(), 1_250);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixConfig {
    /// Test sizes, in run order.
    pub sizes: Vec<u32>,
    /// Iteration budget shared by every size.
    pub iterations: u32,
    /// Multiplier applied to the repeat count.
    pub multiple: u32,
    /// Whether to run every pool once before measuring.
    pub pretest: bool,
    /// How repeats of one benchmark are scheduled.
    ///
    /// Takes effect through [`crate::ConsoleReport::for_matrix`], which builds
    /// the benchmark function with it. [`crate::run_matrix`] rejects a report
    /// built for a different mode.
    pub mode: ExecutionMode,
}

impl MatrixConfig {
    /// Creates a configuration for the given sizes.
    pub fn new(sizes: &[u32]) -> Self {
        Self {
            sizes: sizes.to_vec(),
            iterations: DEFAULT_ITERATIONS,
            multiple: 1,
            pretest: true,
            mode: ExecutionMode::Sequential,
        }
    }

    /// Sets the test sizes.
    pub fn with_sizes(mut self, sizes: &[u32]) -> Self {
        self.sizes = sizes.to_vec();
        self
    }

    /// Sets the iteration budget.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the repeat multiplier.
    pub fn with_multiple(mut self, multiple: u32) -> Self {
        self.multiple = multiple;
        self
    }

    /// Enables or disables the warm-up pass.
    pub fn with_pretest(mut self, pretest: bool) -> Self {
        self.pretest = pretest;
        self
    }

    /// Sets the repeat scheduling mode.
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Checks the configuration before any benchmark runs.
    pub fn validate(&self) -> Result<()> {
        validate_iterations(self.iterations)?;
        if self.sizes.is_empty() {
            return Err(ReportError::invalid_config("sizes", "at least one size is required"));
        }
        if self.sizes.contains(&0) {
            return Err(ReportError::InvalidSize);
        }
        if self.multiple == 0 {
            return Err(ReportError::invalid_config("multiple", "must be positive"));
        }
        Ok(())
    }

    /// Repeat count used for `size`.
    pub fn repeat_for(&self, size: u32) -> Result<u32> {
        repeat_count(self.iterations, self.multiple, size)
    }
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self::new(STANDARD_SIZES)
    }
}

/// Computes `multiple * iterations / size` without intermediate overflow.
pub fn repeat_count(iterations: u32, multiple: u32, size: u32) -> Result<u32> {
    if size == 0 {
        return Err(ReportError::InvalidSize);
    }
    let repeat = u64::from(multiple) * u64::from(iterations) / u64::from(size);
    u32::try_from(repeat)
        .map_err(|_| ReportError::invalid_config("multiple", "repeat count exceeds u32::MAX"))
}
