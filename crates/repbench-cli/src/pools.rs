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

//! Object pools compared by the `repbench` binary.
//!
//! Every pool hands out fixed-size byte buffers and keeps up to `capacity`
//! returned buffers for reuse. The variants differ only in how the free list
//! is guarded.

use clap::ValueEnum;
use std::fmt;
use std::sync::PoisonError;

/// Size in bytes of every buffer handed out by a pool.
pub const BUFFER_SIZE: usize = 256;

/// A pooled byte buffer.
pub type Buffer = Vec<u8>;

/// A source of reusable buffers.
pub trait ObjectPool: Send + Sync {
    /// Takes a buffer, allocating a new one when none is available.
    fn take(&self) -> Buffer;

    /// Returns a buffer. Buffers beyond the pool's capacity are dropped.
    fn give(&self, buffer: Buffer);

    /// Number of buffers ready for reuse.
    fn available(&self) -> usize;
}

fn allocate() -> Buffer {
    vec![0; BUFFER_SIZE]
}

/// Allocates on every take and drops on every give.
#[derive(Debug, Default)]
pub struct Unpooled;

impl ObjectPool for Unpooled {
    fn take(&self) -> Buffer {
        allocate()
    }

    fn give(&self, buffer: Buffer) {
        drop(buffer);
    }

    fn available(&self) -> usize {
        0
    }
}

/// Free list behind a `std::sync::Mutex`.
#[derive(Debug)]
pub struct StdMutexPool {
    free: std::sync::Mutex<Vec<Buffer>>,
    capacity: usize,
}

impl StdMutexPool {
    /// Creates an empty pool that keeps at most `capacity` buffers.
    pub fn new(capacity: usize) -> Self {
        Self {
            free: std::sync::Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    // A panic while holding the lock cannot leave the free list invalid.
    fn free(&self) -> std::sync::MutexGuard<'_, Vec<Buffer>> {
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ObjectPool for StdMutexPool {
    fn take(&self) -> Buffer {
        self.free().pop().unwrap_or_else(allocate)
    }

    fn give(&self, mut buffer: Buffer) {
        let mut free = self.free();
        if free.len() < self.capacity {
            buffer.fill(0);
            free.push(buffer);
        }
    }

    fn available(&self) -> usize {
        self.free().len()
    }
}

/// Free list behind a `parking_lot::Mutex`.
#[derive(Debug)]
pub struct ParkingLotPool {
    free: parking_lot::Mutex<Vec<Buffer>>,
    capacity: usize,
}

impl ParkingLotPool {
    /// Creates an empty pool that keeps at most `capacity` buffers.
    pub fn new(capacity: usize) -> Self {
        Self {
            free: parking_lot::Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }
}

impl ObjectPool for ParkingLotPool {
    fn take(&self) -> Buffer {
        self.free.lock().pop().unwrap_or_else(allocate)
    }

    fn give(&self, mut buffer: Buffer) {
        let mut free = self.free.lock();
        if free.len() < self.capacity {
            buffer.fill(0);
            free.push(buffer);
        }
    }

    fn available(&self) -> usize {
        self.free.lock().len()
    }
}

/// Pool implementation selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum PoolKind {
    /// No reuse, every take allocates
    Unpooled,
    /// Free list guarded by `std::sync::Mutex`
    StdMutex,
    /// Free list guarded by `parking_lot::Mutex`
    ParkingLot,
}

impl PoolKind {
    /// Every pool kind, in report order.
    pub const ALL: [PoolKind; 3] = [PoolKind::Unpooled, PoolKind::StdMutex, PoolKind::ParkingLot];

    /// Name used in reports and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            PoolKind::Unpooled => "unpooled",
            PoolKind::StdMutex => "std-mutex",
            PoolKind::ParkingLot => "parking-lot",
        }
    }

    /// Builds an empty pool of this kind.
    pub fn build(self, capacity: usize) -> Box<dyn ObjectPool> {
        match self {
            PoolKind::Unpooled => Box::new(Unpooled),
            PoolKind::StdMutex => Box::new(StdMutexPool::new(capacity)),
            PoolKind::ParkingLot => Box::new(ParkingLotPool::new(capacity)),
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
