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

//! Error types for the aggregation engine.
//!
//! Misalignment errors signal a programmer error in a workload definition
//! (the step sequence changed shape between repeats). Step errors carry the
//! original failure raised by a measured step as their `source`.

use thiserror::Error;

/// Failure raised by a measured step.
///
/// Boxed so that workloads can surface any error type; the original value
/// stays reachable through [`std::error::Error::source`] and downcasting.
pub type StepError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors produced while executing or aggregating benchmark runs.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Two timed results with different labels were combined.
    #[error("Cannot sum timed results with different labels: '{left}' and '{right}'")]
    LabelMismatch {
        /// Label of the left-hand operand
        left: String,
        /// Label of the right-hand operand
        right: String,
    },

    /// Entries sharing an ordinal carried different labels across repeats.
    #[error("Summing unmatched timed results at ordinal {ordinal}: expected '{expected}', found '{found}'")]
    Misaligned {
        /// Position of the step within a run
        ordinal: usize,
        /// Label recorded by the first repeat
        expected: String,
        /// Label produced by a later repeat
        found: String,
    },

    /// A repeat produced a different number of steps than the first one.
    #[error("Repeat {repeat} produced {found} entries, expected {expected}")]
    RunLengthMismatch {
        /// Zero-based repeat index
        repeat: u32,
        /// Entry count of the first repeat (including TOTAL)
        expected: usize,
        /// Entry count of the offending repeat (including TOTAL)
        found: usize,
    },

    /// A measured step failed; the run was abandoned.
    #[error("Step at ordinal {ordinal} failed: {source}")]
    Step {
        /// Position of the failing step within its run
        ordinal: usize,
        /// The error raised by the step
        #[source]
        source: StepError,
    },
}

impl BenchError {
    /// Wrap a step failure with its ordinal.
    pub fn step(ordinal: usize, source: impl Into<StepError>) -> Self {
        Self::Step {
            ordinal,
            source: source.into(),
        }
    }

    /// Returns true for errors caused by a workload whose shape differs
    /// between repeats.
    pub fn is_misalignment(&self) -> bool {
        matches!(
            self,
            BenchError::Misaligned { .. } | BenchError::RunLengthMismatch { .. }
        )
    }
}
