//! Stress helpers for docdir.
//!
//! These run many operations from several threads against one shared
//! store and report how many succeeded.

use crate::fixtures::{sample_document, sized_document, SampleDocument};
use docdir_core::Store;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total operations performed.
    pub total_ops: usize,
    /// Successful operations.
    pub successful_ops: usize,
    /// Failed operations.
    pub failed_ops: usize,
    /// Total duration.
    pub duration: Duration,
    /// Operations per second.
    pub ops_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        let total = successful + failed;
        let ops_per_second = if duration.as_secs_f64() > 0.0 {
            total as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_ops: total,
            successful_ops: successful,
            failed_ops: failed,
            duration,
            ops_per_second,
        }
    }

    /// Prints a summary of the test.
    pub fn print_summary(&self, name: &str) {
        println!("\n=== {} ===", name);
        println!("Total operations: {}", self.total_ops);
        println!("Successful: {}", self.successful_ops);
        println!("Failed: {}", self.failed_ops);
        println!("Duration: {:?}", self.duration);
        println!("Throughput: {:.2} ops/sec", self.ops_per_second);
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Operations per thread.
    pub operations: usize,
    /// Number of concurrent threads.
    pub threads: usize,
    /// Payload size of each document in bytes.
    pub document_size: usize,
    /// Number of distinct resources per collection.
    pub resource_count: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            operations: 200,
            threads: 4,
            document_size: 256,
            resource_count: 16,
        }
    }
}

/// Counts outcomes across threads.
#[derive(Default)]
struct Tally {
    successful: AtomicUsize,
    failed: AtomicUsize,
}

impl Tally {
    fn record<T, E>(&self, result: &Result<T, E>) {
        let counter = if result.is_ok() {
            &self.successful
        } else {
            &self.failed
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn finish(&self, start: Instant) -> StressTestResult {
        StressTestResult::new(
            self.successful.load(Ordering::Relaxed),
            self.failed.load(Ordering::Relaxed),
            start.elapsed(),
        )
    }
}

fn run_threads<F>(store: &Arc<Store>, threads: usize, work: F) -> StressTestResult
where
    F: Fn(&Store, usize, &Tally) + Send + Sync + 'static,
{
    let tally = Arc::new(Tally::default());
    let work = Arc::new(work);
    let start = Instant::now();

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let store = Arc::clone(store);
            let tally = Arc::clone(&tally);
            let work = Arc::clone(&work);
            thread::spawn(move || work(&store, t, &tally))
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    tally.finish(start)
}

/// All threads write to the same collection, each to its own resources.
pub fn stress_same_collection_writes(
    store: &Arc<Store>,
    config: &StressConfig,
) -> StressTestResult {
    let config = config.clone();
    run_threads(store, config.threads, move |store, t, tally| {
        for i in 0..config.operations {
            let id = (t * config.resource_count + i % config.resource_count) as u64;
            let doc = sized_document(id, config.document_size);
            tally.record(&store.write("stress", &format!("t{t}-r{}", id), &doc));
        }
    })
}

/// Each thread writes to a collection of its own.
pub fn stress_cross_collection_writes(
    store: &Arc<Store>,
    config: &StressConfig,
) -> StressTestResult {
    let config = config.clone();
    run_threads(store, config.threads, move |store, t, tally| {
        let collection = format!("stress-{t}");
        for i in 0..config.operations {
            let id = (i % config.resource_count) as u64;
            let doc = sized_document(id, config.document_size);
            tally.record(&store.write(&collection, &format!("r{id}"), &doc));
        }
    })
}

/// Half the threads rewrite a shared set of resources while the other half
/// read them back.
///
/// A read counts as failed if it errors or returns a document that does
/// not match what some writer stored under that name, so a torn write
/// shows up in `failed_ops`.
pub fn stress_readers_vs_writers(store: &Arc<Store>, config: &StressConfig) -> StressTestResult {
    for i in 0..config.resource_count as u64 {
        store
            .write("contended", &format!("r{i}"), &sample_document(i))
            .expect("Failed to seed document");
    }

    let config = config.clone();
    run_threads(store, config.threads.max(2), move |store, t, tally| {
        for i in 0..config.operations {
            let id = (i % config.resource_count) as u64;
            let name = format!("r{id}");
            if t % 2 == 0 {
                let doc = sized_document(id, (i % 4) * config.document_size);
                tally.record(&store.write("contended", &name, &doc));
            } else {
                let result = store
                    .read::<SampleDocument>("contended", &name)
                    .map_err(|e| e.to_string())
                    .and_then(|doc| {
                        let intact = doc.id == id
                            && doc.name == format!("doc-{id}")
                            && doc.payload.bytes().all(|b| b == b'x');
                        if intact {
                            Ok(())
                        } else {
                            Err(format!("unexpected document under {name}"))
                        }
                    });
                tally.record(&result);
            }
        }
    })
}
