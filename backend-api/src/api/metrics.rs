use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use tracing::info;

/// Simple counter used to log the amount of backend requests performed.
#[derive(Debug)]
pub struct RequestMetrics {
    start: Instant,
    count: AtomicU64,
    name: &'static str,
}

impl RequestMetrics {
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            count: AtomicU64::new(0),
            name,
        })
    }

    pub fn inc(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Log how many requests went out since the client was created.
    pub fn log_summary(&self) {
        let total = self.total();
        let elapsed = self.start.elapsed().as_secs_f64();
        let avg = if elapsed > 0.0 {
            total as f64 / elapsed
        } else {
            0.0
        };
        info!(
            client = self.name,
            "📊 {} requests executed in {:.1}s (avg {:.2} req/s)", total, elapsed, avg
        );
    }
}
