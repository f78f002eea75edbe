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

//! Behavioral tests for the aggregation engine.

use repbench_core::{
    measure_repeated, BenchError, Benchmark, ExecutionMode, StepError, Steps, TimedResult,
    Workload,
};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;
use std::thread;
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Emits fixed durations and counts how often it is invoked.
#[derive(Default)]
struct FixedSteps {
    calls: AtomicUsize,
    steps: Vec<(&'static str, Duration)>,
    delay: Option<Duration>,
}

impl FixedSteps {
    fn new(steps: Vec<(&'static str, Duration)>) -> Self {
        Self {
            steps,
            ..Default::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Workload for FixedSteps {
    type Param = ();

    fn steps<'a>(&'a self, _test_size: u32, _param: &'a ()) -> Steps<'a> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        Box::new(
            self.steps
                .iter()
                .map(|(label, duration)| Ok(TimedResult::new(*label, *duration))),
        )
    }
}

/// Changes the label of its first step after the first run.
#[derive(Default)]
struct ShiftingLabels {
    calls: AtomicUsize,
}

impl Workload for ShiftingLabels {
    type Param = ();

    fn steps<'a>(&'a self, _test_size: u32, _param: &'a ()) -> Steps<'a> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let label = if call == 0 { "Fill" } else { "Drain" };
        Box::new(std::iter::once(Ok(TimedResult::new(label, ms(1)))))
    }
}

/// Fails its second step on the first run only.
#[derive(Default)]
struct FlakyOnce {
    calls: AtomicUsize,
}

impl Workload for FlakyOnce {
    type Param = ();

    fn steps<'a>(&'a self, _test_size: u32, _param: &'a ()) -> Steps<'a> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let second = if call == 0 {
            Err(StepError::from("pool exhausted"))
        } else {
            Ok(TimedResult::new("B", ms(2)))
        };
        Box::new(vec![Ok(TimedResult::new("A", ms(1))), second].into_iter())
    }
}

/// Records the parameter and size it was given.
#[derive(Default)]
struct Echo;

impl Workload for Echo {
    type Param = String;

    fn steps<'a>(&'a self, test_size: u32, param: &'a String) -> Steps<'a> {
        Box::new(std::iter::once(Ok(TimedResult::new(
            format!("{} x{}", param, test_size),
            ms(1),
        ))))
    }
}

/// Single-threaded workload: counts calls in a `Cell`, names its step from an
/// `Rc` parameter.
#[derive(Default)]
struct LocalOnly {
    calls: Cell<usize>,
}

impl Workload for LocalOnly {
    type Param = Rc<String>;

    fn steps<'a>(&'a self, _test_size: u32, name: &'a Rc<String>) -> Steps<'a> {
        self.calls.set(self.calls.get() + 1);
        Box::new(std::iter::once(Ok(TimedResult::new(name.as_str(), ms(5)))))
    }
}

#[test]
fn test_end_to_end_example() {
    let workload = FixedSteps::new(vec![("A", ms(10)), ("B", ms(20))]);
    let bench = Benchmark::with_workload(workload, 100, 3, ());

    let result = bench.result().unwrap();
    assert_eq!(
        result,
        &[
            TimedResult::new("A", ms(30)),
            TimedResult::new("B", ms(60)),
            TimedResult::total(ms(90)),
        ]
    );
}

#[test]
fn test_summation_correctness() {
    let durations = [ms(3), ms(7), ms(11), ms(13)];
    let labels = ["01) a", "02) b", "03) c", "04) d"];
    let steps: Vec<_> = labels.iter().copied().zip(durations).collect();

    for repeat in [1u32, 2, 5, 17] {
        let bench = Benchmark::with_workload(FixedSteps::new(steps.clone()), 10, repeat, ());
        let result = bench.result().unwrap();

        assert_eq!(result.len(), labels.len() + 1);
        for (i, label) in labels.iter().enumerate() {
            assert_eq!(result[i].label, *label);
            assert_eq!(result[i].duration, durations[i] * repeat);
        }
        let per_run: Duration = durations.iter().sum();
        assert_eq!(result[labels.len()], TimedResult::total(per_run * repeat));
    }
}

#[test]
fn test_result_is_idempotent() {
    let bench = Benchmark::with_workload(FixedSteps::new(vec![("A", ms(1))]), 1, 4, ());

    let first = bench.result().unwrap();
    let second = bench.result().unwrap();
    let third = bench.result().unwrap();

    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(second, third));
    assert!(bench.is_computed());
    assert_eq!(bench.workload().calls(), 4);
}

#[test]
fn test_zero_repeats() {
    let bench = Benchmark::with_workload(FixedSteps::new(vec![("A", ms(1))]), 8, 0, ());

    assert!(bench.result().unwrap().is_empty());
    assert!(bench.result().unwrap().is_empty());
    assert_eq!(bench.workload().calls(), 0);
}

#[test]
fn test_misalignment_detected() {
    let bench = Benchmark::with_workload(ShiftingLabels::default(), 1, 3, ());

    match bench.result() {
        Err(BenchError::Misaligned {
            ordinal,
            expected,
            found,
        }) => {
            assert_eq!(ordinal, 0);
            assert_eq!(expected, "Fill");
            assert_eq!(found, "Drain");
        }
        other => panic!("Expected Misaligned, got {:?}", other),
    }
    assert!(!bench.is_computed());
}

#[test]
fn test_step_failure_propagates_and_is_not_cached() {
    let bench = Benchmark::with_workload(FlakyOnce::default(), 1, 2, ());

    let err = bench.result().unwrap_err();
    match &err {
        BenchError::Step { ordinal, source } => {
            assert_eq!(*ordinal, 1);
            assert_eq!(source.to_string(), "pool exhausted");
        }
        other => panic!("Expected Step error, got {:?}", other),
    }
    assert!(!bench.is_computed());

    // The retry runs a full set of repeats.
    let result = bench.result().unwrap();
    assert_eq!(
        result,
        &[
            TimedResult::new("A", ms(2)),
            TimedResult::new("B", ms(4)),
            TimedResult::total(ms(6)),
        ]
    );
}

#[test]
fn test_concurrent_first_access() {
    const READERS: usize = 8;
    const REPEATS: u32 = 5;

    let mut workload = FixedSteps::new(vec![("A", ms(10)), ("B", ms(20))]);
    workload.delay = Some(Duration::from_millis(2));
    let bench = Benchmark::with_workload(workload, 64, REPEATS, ());
    let barrier = Barrier::new(READERS);
    let (bench, barrier) = (&bench, &barrier);

    let observed: Vec<(usize, Vec<TimedResult>)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..READERS)
            .map(|_| {
                scope.spawn(move || {
                    barrier.wait();
                    let result = bench.result().unwrap();
                    (result.as_ptr() as usize, result.to_vec())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let (first_ptr, first_contents) = &observed[0];
    for (ptr, contents) in &observed {
        assert_eq!(ptr, first_ptr);
        assert_eq!(contents, first_contents);
    }
    assert_eq!(bench.workload().calls(), REPEATS as usize);
    assert_eq!(first_contents[2], TimedResult::total(ms(150)));
}

#[test]
fn test_parallel_matches_sequential() {
    let steps = vec![("01) fill", ms(4)), ("02) drain", ms(6)), ("03) cycle", ms(9))];

    let sequential = Benchmark::with_workload(FixedSteps::new(steps.clone()), 32, 12, ());
    let parallel = Benchmark::with_workload(FixedSteps::new(steps), 32, 12, ());

    assert_eq!(sequential.result().unwrap(), parallel.par_result().unwrap());
    assert_eq!(parallel.workload().calls(), 12);
}

#[test]
fn test_modes_share_one_memo() {
    let bench = Benchmark::with_workload(FixedSteps::new(vec![("A", ms(1))]), 4, 3, ());

    let sequential = bench.result().unwrap();
    let parallel = bench.result_in(ExecutionMode::Parallel).unwrap();
    assert!(std::ptr::eq(sequential, parallel));
    assert_eq!(bench.workload().calls(), 3);
}

#[test]
fn test_non_sync_workload_and_param() {
    let name = Rc::new("A".to_string());
    let bench = Benchmark::<LocalOnly>::new(1, 2, Rc::clone(&name));

    assert_eq!(
        bench.result().unwrap(),
        &[TimedResult::new("A", ms(10)), TimedResult::total(ms(10))]
    );
    assert_eq!(bench.workload().calls.get(), 2);
    assert_eq!(Rc::strong_count(&name), 2);

    assert_eq!(bench.into_result().unwrap().len(), 2);
    assert_eq!(Rc::strong_count(&name), 1);
}

#[test]
fn test_param_and_size_are_forwarded() {
    let bench = Benchmark::<Echo>::new(16, 2, "std-mutex".to_string());
    assert_eq!(bench.param(), "std-mutex");
    assert_eq!(bench.test_size(), 16);
    assert_eq!(bench.repeat_count(), 2);

    let result = bench.result().unwrap();
    assert_eq!(result[0].label, "std-mutex x16");
}

#[test]
fn test_measure_repeated() {
    for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
        let result = measure_repeated::<Echo>(4, 3, "pool".to_string(), mode).unwrap();
        assert_eq!(
            result,
            vec![
                TimedResult::new("pool x4", ms(3)),
                TimedResult::total(ms(3)),
            ]
        );
    }
}
