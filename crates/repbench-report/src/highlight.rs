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

//! Min/max classification of results across pools.

use repbench_core::TimedResult;

/// How a duration compares to the same step in the other pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Shortest duration for this label, and not all durations are equal.
    Fastest,
    /// Longest duration for this label, and not all durations are equal.
    Slowest,
    /// Anything in between, or no spread at all.
    Neutral,
}

impl Highlight {
    /// Classifies `result` against every result sharing its label in `all`.
    pub fn classify<'a, I>(result: &TimedResult, all: I) -> Highlight
    where
        I: IntoIterator<Item = &'a TimedResult>,
    {
        let mut peers = all
            .into_iter()
            .filter(|r| r.label == result.label)
            .map(|r| r.duration);

        let Some(first) = peers.next() else {
            return Highlight::Neutral;
        };
        let (min, max) = peers.fold((first, first), |(min, max), d| (min.min(d), max.max(d)));

        if min == max {
            Highlight::Neutral
        } else if result.duration == min {
            Highlight::Fastest
        } else if result.duration == max {
            Highlight::Slowest
        } else {
            Highlight::Neutral
        }
    }
}
