//! In-memory table of workers and their live load.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

/// A single worker and the number of attempts currently running against it.
#[derive(Debug)]
pub struct WorkerRecord {
    address: String,
    active_jobs: AtomicU64,
}

impl WorkerRecord {
    fn new(address: String) -> Self {
        Self {
            address,
            active_jobs: AtomicU64::new(0),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn active_jobs(&self) -> u64 {
        self.active_jobs.load(Ordering::SeqCst)
    }
}

/// Fixed set of workers, in registration order.
///
/// Each worker's counter is its own atomic, so updating one worker never
/// blocks another. [`WorkerRegistry::select_and_reserve`] claims a worker with
/// a compare-and-swap on that worker's counter alone, so concurrent selections
/// cannot pile onto one worker from a stale read and no registry-wide lock is
/// taken.
#[derive(Debug)]
pub struct WorkerRegistry {
    workers: Vec<WorkerRecord>,
}

impl WorkerRegistry {
    /// Registers `addresses` in order. Repeated addresses keep their first
    /// position.
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut workers: Vec<WorkerRecord> = Vec::new();
        for address in addresses {
            let address = address.into();
            if workers.iter().any(|w| w.address == address) {
                warn!(worker = %address, "ignoring duplicate worker address");
                continue;
            }
            workers.push(WorkerRecord::new(address));
        }
        Self { workers }
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkerRecord> {
        self.workers.iter()
    }

    /// Current load of the worker at `address`, if registered.
    pub fn active_jobs(&self, address: &str) -> Option<u64> {
        self.find(address).map(WorkerRecord::active_jobs)
    }

    /// Returns the least loaded worker whose address is not in `exclude`.
    ///
    /// Ties go to the earliest registered worker. Returns `None` when every
    /// worker is excluded. The result is a snapshot; use
    /// [`WorkerRegistry::select_and_reserve`] to claim the worker.
    pub fn select_least_loaded(&self, exclude: &HashSet<String>) -> Option<&WorkerRecord> {
        self.least_loaded(exclude).map(|(worker, _)| worker)
    }

    /// Selects the least loaded worker not in `exclude` and marks it busy in
    /// one step.
    ///
    /// The increment only succeeds if the worker's load is still the value
    /// the scan saw; otherwise the scan is repeated. Two concurrent callers
    /// therefore never both claim a worker at the same observed load.
    pub fn select_and_reserve(&self, exclude: &HashSet<String>) -> Option<JobGuard<'_>> {
        loop {
            let (worker, load) = self.least_loaded(exclude)?;
            let claimed = worker.active_jobs.compare_exchange(
                load,
                load + 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            );
            if claimed.is_ok() {
                return Some(JobGuard {
                    registry: self,
                    worker,
                });
            }
        }
    }

    fn least_loaded(&self, exclude: &HashSet<String>) -> Option<(&WorkerRecord, u64)> {
        let mut selected: Option<(&WorkerRecord, u64)> = None;
        for worker in &self.workers {
            if exclude.contains(worker.address.as_str()) {
                continue;
            }
            let load = worker.active_jobs();
            match selected {
                Some((_, best)) if best <= load => {}
                _ => selected = Some((worker, load)),
            }
        }
        selected
    }

    pub fn mark_busy(&self, address: &str) {
        match self.find(address) {
            Some(worker) => {
                worker.active_jobs.fetch_add(1, Ordering::SeqCst);
            }
            None => warn!(worker = %address, "mark_busy on unknown worker"),
        }
    }

    /// Decrements the worker's load, never below zero.
    pub fn mark_free(&self, address: &str) {
        let Some(worker) = self.find(address) else {
            warn!(worker = %address, "mark_free on unknown worker");
            return;
        };
        let result = worker
            .active_jobs
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if result.is_err() {
            warn!(worker = %address, "mark_free on idle worker");
        }
    }

    /// Marks `worker` busy until the returned guard is dropped.
    pub fn reserve<'a>(&'a self, worker: &'a WorkerRecord) -> JobGuard<'a> {
        self.mark_busy(worker.address());
        JobGuard {
            registry: self,
            worker,
        }
    }

    fn find(&self, address: &str) -> Option<&WorkerRecord> {
        self.workers.iter().find(|w| w.address == address)
    }
}

/// Releases one unit of load on drop.
#[must_use = "dropping the guard immediately frees the worker"]
pub struct JobGuard<'a> {
    registry: &'a WorkerRegistry,
    worker: &'a WorkerRecord,
}

impl<'a> JobGuard<'a> {
    pub fn worker(&self) -> &'a WorkerRecord {
        self.worker
    }

    pub fn address(&self) -> &'a str {
        self.worker.address()
    }
}

impl Drop for JobGuard<'_> {
    fn drop(&mut self) {
        self.registry.mark_free(self.worker.address());
    }
}
