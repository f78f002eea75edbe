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

//! End-to-end tests for the `repbench` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn repbench_cmd() -> Command {
    Command::cargo_bin("repbench").expect("Failed to find repbench binary")
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    repbench_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Repbench - compare object pool implementations across sizes",
        ))
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("parking-lot"));
}

#[test]
fn test_version_output() {
    repbench_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("repbench"));
}

// ===== Report Tests =====

#[test]
fn test_single_pool_report() {
    repbench_cmd()
        .args(["--size", "4", "--iterations", "40", "--pool", "std-mutex", "--no-pretest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Repeat 10 for size 4"))
        .stdout(predicate::str::contains("std-mutex...."))
        .stdout(predicate::str::contains("01) Take From Empty"))
        .stdout(predicate::str::contains("04) Take & Give Cycle"))
        .stdout(predicate::str::contains("TOTAL"));
}

#[test]
fn test_quiet_prints_nothing() {
    repbench_cmd()
        .args(["-s", "8", "-n", "80", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_exports() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let json_path = dir.path().join("pools.json");
    let csv_path = dir.path().join("pools.csv");
    let text_path = dir.path().join("pools.txt");

    repbench_cmd()
        .args(["--size", "4,8", "--iterations", "64", "--parallel-repeats", "--quiet"])
        .arg("--json")
        .arg(&json_path)
        .arg("--csv")
        .arg(&csv_path)
        .arg("--output")
        .arg(&text_path)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    let labels = json["labels"].as_array().unwrap();
    assert_eq!(labels[0], "Batch");
    assert_eq!(labels[1], "Pool Type");
    assert_eq!(labels[2], "Take From Empty");
    assert_eq!(labels[6], "TOTAL");
    // Three pools at two sizes.
    assert_eq!(json["rows"].as_array().unwrap().len(), 6);
    assert_eq!(json["rows"][0][0], "Repeat 16 for size 4");
    assert_eq!(json["rows"][5][1], "parking-lot");

    let csv = fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Batch,Pool Type,Take From Empty,Give To Pool,Take From Filled,Take & Give Cycle,TOTAL")
    );
    assert_eq!(lines.count(), 6);

    let text = fs::read_to_string(&text_path).unwrap();
    assert!(text.contains("Repeat 8 for size 8"));
    assert!(text.contains("unpooled...."));
}

// ===== Error Tests =====

#[test]
fn test_rejects_small_iteration_budget() {
    repbench_cmd()
        .args(["--iterations", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("at least 10 iterations"));
}

#[test]
fn test_rejects_zero_size() {
    repbench_cmd()
        .args(["--size", "0", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));
}

#[test]
fn test_rejects_unknown_pool() {
    repbench_cmd()
        .args(["--pool", "lock-free"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("lock-free"));
}

#[test]
fn test_unwritable_output() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("missing").join("report.txt");

    repbench_cmd()
        .args(["--size", "4", "-n", "40", "--quiet", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}
