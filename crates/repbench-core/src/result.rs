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

//! Timed step results and their ordinal tagging.

use crate::error::{BenchError, Result};
use std::fmt;
use std::time::Duration;

/// Label of the synthetic entry closing every run.
pub const TOTAL_LABEL: &str = "TOTAL";

/// A labeled duration produced by one measured step.
///
/// Values are immutable; combining two results produces a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TimedResult {
    /// Identifier of the step, stable across repeats.
    pub label: String,
    /// Elapsed time of the step.
    pub duration: Duration,
}

impl TimedResult {
    /// Creates a new timed result.
    pub fn new(label: impl Into<String>, duration: Duration) -> Self {
        Self {
            label: label.into(),
            duration,
        }
    }

    /// Creates the synthetic TOTAL entry.
    pub fn total(duration: Duration) -> Self {
        Self::new(TOTAL_LABEL, duration)
    }

    /// Returns true if this is the synthetic TOTAL entry.
    pub fn is_total(&self) -> bool {
        self.label == TOTAL_LABEL
    }

    /// Sums two results carrying the same label.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::LabelMismatch`] when the labels differ.
    pub fn checked_add(&self, other: &TimedResult) -> Result<TimedResult> {
        if self.label != other.label {
            return Err(BenchError::LabelMismatch {
                left: self.label.clone(),
                right: other.label.clone(),
            });
        }
        Ok(TimedResult::new(
            self.label.clone(),
            self.duration + other.duration,
        ))
    }
}

impl fmt::Display for TimedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.duration, self.label)
    }
}

/// A timed result tagged with its position inside one run.
///
/// The ordinal is a positional key used to align the same step across
/// independent repeats. It is not an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdinalResult {
    /// Zero-based position within the run.
    pub ordinal: usize,
    /// The step's result.
    pub result: TimedResult,
}

impl OrdinalResult {
    /// Tags a result with its ordinal.
    pub fn new(ordinal: usize, result: TimedResult) -> Self {
        Self { ordinal, result }
    }
}
