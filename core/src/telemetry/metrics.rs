use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    rebuilds: usize,
    duplicate_samples: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                rebuilds: 0,
                duplicate_samples: 0,
            }),
        }
    }

    pub fn record_rebuild(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.rebuilds += 1;
        }
    }

    pub fn record_duplicates(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.duplicate_samples += count;
        }
    }

    /// (rebuilds, duplicate samples seen).
    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.rebuilds, metrics.duplicate_samples)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = MetricsRecorder::new();
        metrics.record_rebuild();
        metrics.record_rebuild();
        metrics.record_duplicates(3);
        assert_eq!(metrics.snapshot(), (2, 3));
    }
}
