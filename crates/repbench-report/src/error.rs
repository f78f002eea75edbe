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

//! Error types for report generation.

use repbench_core::BenchError;
use thiserror::Error;

/// Minimum iteration budget accepted by a report.
///
/// Fewer iterations make the per-size repeat counts too small to say
/// anything about the pools being compared.
pub const MIN_ITERATIONS: u32 = 10;

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while running or rendering a report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The iteration budget is below [`MIN_ITERATIONS`].
    #[error("Need at least {minimum} iterations to be certain of validity, got {iterations}")]
    TooFewIterations {
        /// Requested iteration budget
        iterations: u32,
        /// Minimum accepted value
        minimum: u32,
    },

    /// A test size of zero was requested.
    #[error("Test size must be greater than zero")]
    InvalidSize,

    /// Invalid configuration parameter
    #[error("Invalid configuration parameter '{parameter}': {reason}")]
    InvalidConfig {
        /// Parameter name
        parameter: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A pool's benchmark failed.
    #[error("Benchmark '{pool}' failed: {source}")]
    Pool {
        /// Name of the pool being measured
        pool: String,
        /// Engine error
        #[source]
        source: BenchError,
    },

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON export failed.
    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export failed.
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
}

impl ReportError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

/// Rejects iteration budgets below [`MIN_ITERATIONS`].
pub fn validate_iterations(iterations: u32) -> Result<()> {
    if iterations < MIN_ITERATIONS {
        Err(ReportError::TooFewIterations {
            iterations,
            minimum: MIN_ITERATIONS,
        })
    } else {
        Ok(())
    }
}
