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

//! The step-producing extension point.
//!
//! A [`Workload`] describes what one run of a benchmark measures: it yields
//! one [`TimedResult`] per named step, in a fixed order. The engine calls it
//! once per repeat and never caches anything within a run.

use crate::error::StepError;
use crate::result::TimedResult;
use std::marker::PhantomData;

/// Outcome of one measured step.
pub type StepOutcome = std::result::Result<TimedResult, StepError>;

/// Lazy sequence of step outcomes for a single run.
pub type Steps<'a> = Box<dyn Iterator<Item = StepOutcome> + 'a>;

/// A benchmark definition.
///
/// Implementations must emit the same number of steps with the same labels
/// on every call for a given instance; the engine rejects runs whose shape
/// diverges. Steps execute as the returned iterator is consumed, so timing
/// work belongs inside the iterator rather than before it is returned.
///
/// # Example
///
/// ```
/// use repbench_core::measurement::time_step;
/// use repbench_core::{Steps, Workload};
///
/// #[derive(Default)]
/// struct VecPush;
///
/// impl Workload for VecPush {
///     type Param = usize;
///
///     fn steps<'a>(&'a self, test_size: u32, capacity: &'a usize) -> Steps<'a> {
///         let mut items: Vec<u32> = Vec::with_capacity(*capacity);
///         Box::new(std::iter::once(Ok(time_step("01) Push", move || {
///             items.extend(0..test_size);
///         }))))
///     }
/// }
/// ```
pub trait Workload {
    /// Opaque parameter forwarded unchanged from the benchmark instance.
    type Param;

    /// Produces the steps of one run.
    fn steps<'a>(&'a self, test_size: u32, param: &'a Self::Param) -> Steps<'a>;
}

/// Adapts a closure into a [`Workload`].
///
/// The closure runs once per repeat and returns that run's step outcomes.
pub struct FnWorkload<P, F> {
    f: F,
    _param: PhantomData<fn(&P)>,
}

impl<P, F> FnWorkload<P, F> {
    /// Wraps `f`.
    pub fn new<I>(f: F) -> Self
    where
        F: Fn(u32, &P) -> I,
        I: IntoIterator<Item = StepOutcome>,
    {
        Self {
            f,
            _param: PhantomData,
        }
    }
}

impl<P, F, I> Workload for FnWorkload<P, F>
where
    F: Fn(u32, &P) -> I,
    I: IntoIterator<Item = StepOutcome>,
    I::IntoIter: 'static,
{
    type Param = P;

    fn steps<'a>(&'a self, test_size: u32, param: &'a P) -> Steps<'a> {
        Box::new((self.f)(test_size, param).into_iter())
    }
}
