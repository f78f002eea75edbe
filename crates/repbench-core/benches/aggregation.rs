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

//! Overhead of the aggregation engine itself.
//!
//! Workloads here report synthetic durations without doing any work, so the
//! numbers reflect ordinal tagging, merging, and memoization cost only.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use repbench_core::{Benchmark, ExecutionMode, Steps, TimedResult, Workload};
use std::time::Duration;

/// Emits `step_count` synthetic steps per run.
#[derive(Default)]
struct Synthetic;

impl Workload for Synthetic {
    type Param = Vec<String>;

    fn steps<'a>(&'a self, _test_size: u32, labels: &'a Vec<String>) -> Steps<'a> {
        Box::new(
            labels
                .iter()
                .map(|label| Ok(TimedResult::new(label.as_str(), Duration::from_nanos(100)))),
        )
    }
}

fn labels(step_count: usize) -> Vec<String> {
    (0..step_count)
        .map(|i| format!("{:02}) step", i + 1))
        .collect()
}

fn bench_aggregate_repeats(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_repeats");

    for &repeats in &[1u32, 10, 100, 1_000] {
        group.throughput(Throughput::Elements(repeats as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &repeats, |b, &r| {
            b.iter(|| {
                let bench = Benchmark::<Synthetic>::new(16, r, labels(4));
                black_box(bench.into_result().unwrap())
            })
        });
    }

    group.finish();
}

fn bench_step_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_count");

    for &steps in &[1usize, 8, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, &s| {
            b.iter(|| {
                let bench = Benchmark::<Synthetic>::new(16, 100, labels(s));
                black_box(bench.into_result().unwrap())
            })
        });
    }

    group.finish();
}

fn bench_execution_mode(c: &mut Criterion) {
    let mut group = c.benchmark_group("execution_mode");

    for (name, mode) in [
        ("sequential", ExecutionMode::Sequential),
        ("parallel", ExecutionMode::Parallel),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let bench = Benchmark::<Synthetic>::new(16, 1_000, labels(8));
                black_box(bench.result_in(mode).unwrap().len())
            })
        });
    }

    group.finish();
}

fn bench_memoized_read(c: &mut Criterion) {
    let bench = Benchmark::<Synthetic>::new(16, 100, labels(8));
    bench.result().unwrap();

    c.bench_function("memoized_read", |b| {
        b.iter(|| black_box(bench.result().unwrap().len()))
    });
}

criterion_group!(
    benches,
    bench_aggregate_repeats,
    bench_step_count,
    bench_execution_mode,
    bench_memoized_read
);
criterion_main!(benches);
