use serde::Serialize;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

/// Running counters, updated without taking the cache lock.
#[derive(Debug, Default)]
pub struct Stats {
    hits: AtomicUsize,
    misses: AtomicUsize,
    joins: AtomicUsize,
    solves: AtomicUsize,
    failures: AtomicUsize,
    iterations: AtomicUsize,
    flying: AtomicUsize,
}

impl Stats {
    pub fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }
    pub fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }
    pub fn join(&self) {
        self.joins.fetch_add(1, Ordering::Relaxed);
    }
    pub fn takeoff(&self) {
        self.solves.fetch_add(1, Ordering::Relaxed);
        self.flying.fetch_add(1, Ordering::Relaxed);
    }
    pub fn landed(&self, iterations: usize) {
        self.iterations.fetch_add(iterations, Ordering::Relaxed);
        self.flying.fetch_sub(1, Ordering::Relaxed);
    }
    pub fn crashed(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        self.flying.fetch_sub(1, Ordering::Relaxed);
    }
    pub fn iterations(&self) -> usize {
        self.iterations.load(Ordering::Relaxed)
    }
    pub fn solves(&self) -> usize {
        self.solves.load(Ordering::Relaxed)
    }
    pub fn snapshot(&self, size: usize, capacity: usize) -> Snapshot {
        Snapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            joins: self.joins.load(Ordering::Relaxed),
            solves: self.solves.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            iterations: self.iterations.load(Ordering::Relaxed),
            in_flight: self.flying.load(Ordering::Relaxed),
            size,
            capacity,
        }
    }
}

/// A point-in-time copy of the counters, as served over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub hits: usize,
    pub misses: usize,
    pub joins: usize,
    pub solves: usize,
    pub failures: usize,
    pub iterations: usize,
    pub in_flight: usize,
    pub size: usize,
    pub capacity: usize,
}

impl Snapshot {
    pub fn hit_rate(&self) -> f32 {
        match self.hits + self.misses {
            0 => 0.0,
            n => self.hits as f32 / n as f32,
        }
    }
}
