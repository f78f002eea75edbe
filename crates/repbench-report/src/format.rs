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

//! Text rendering of durations and step labels.

use std::time::Duration;

const NANOS_PER_TICK: u128 = 100;
const TICKS_PER_SECOND: u128 = 10_000_000;
const SECONDS_PER_DAY: u128 = 86_400;

/// Formats a duration as `[d.]hh:mm:ss[.fffffff]`.
///
/// Resolution is one tick (100ns). The fraction is omitted when it is zero,
/// and the day component only appears for durations of a day or more.
///
/// # Example
///
/// ```
/// use repbench_report::format::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_millis(1500)), "00:00:01.5000000");
/// assert_eq!(format_duration(Duration::from_secs(61)), "00:01:01");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let ticks = duration.as_nanos() / NANOS_PER_TICK;
    let fraction = ticks % TICKS_PER_SECOND;
    let total_seconds = ticks / TICKS_PER_SECOND;

    let days = total_seconds / SECONDS_PER_DAY;
    let hours = (total_seconds / 3_600) % 24;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;

    let mut out = String::with_capacity(24);
    if days > 0 {
        out.push_str(&format!("{}.", days));
    }
    out.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));
    if fraction > 0 {
        out.push_str(&format!(".{:07}", fraction));
    }
    out
}

/// Splits a formatted duration into `(zero_groups, zero_digits, significant)`.
///
/// The first part holds the leading `00:` groups (plus a leading zero of the
/// next group when another digit follows it), the second the run of zeros
/// and dots before the first significant digit, the third everything else.
/// Concatenating the parts gives back the input. Durations with a non-zero
/// leading group are returned whole as the significant part.
pub fn split_duration(text: &str) -> (&str, &str, &str) {
    let mut prefix = 0;
    while text[prefix..].starts_with("00:") {
        prefix += 3;
    }
    if prefix == 0 {
        return ("", "", text);
    }

    let rest = text[prefix..].as_bytes();
    if rest.len() > 1 && rest[0] == b'0' && rest[1].is_ascii_alphanumeric() {
        prefix += 1;
    }

    let zeros = text[prefix..]
        .find(|c: char| c != '0' && c != '.')
        .unwrap_or(text.len() - prefix);
    let split = prefix + zeros;

    (&text[..prefix], &text[prefix..split], &text[split..])
}

/// Removes a leading `"NN) "` ordinal prefix from a step label.
///
/// Labels without such a prefix, such as `TOTAL`, are returned unchanged.
pub fn strip_ordinal_prefix(label: &str) -> &str {
    if let Some(pos) = label.find(") ") {
        let digits = &label[..pos];
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return &label[pos + 2..];
        }
    }
    label
}

/// Pads a pool name with dots to a fixed header width.
pub fn pool_header(name: &str, width: usize) -> String {
    let len = name.chars().count();
    if len >= width {
        name.to_string()
    } else {
        format!("{}{}", name, ".".repeat(width - len))
    }
}
