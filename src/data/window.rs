//! Sliding window of recent samples for the trend chart.

use std::collections::VecDeque;

use super::sample::Sample;

/// Bounded, time-filtered buffer of the most recent samples.
///
/// The window is bounded two ways: entries older than the operator-selected
/// time range are evicted from the head, and the count never exceeds the
/// configured point ceiling. Samples are kept in insertion order; the feed is
/// assumed append-time ordered, and out-of-order arrivals are accepted at the
/// tail rather than re-sorted.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: VecDeque<Sample>,
    max_points: usize,
    range_minutes: u32,
}

impl SampleWindow {
    /// Create an empty window with the given point ceiling and initial range.
    pub fn new(max_points: usize, range_minutes: u32) -> Self {
        Self {
            samples: VecDeque::with_capacity(max_points),
            max_points,
            range_minutes,
        }
    }

    /// Append a sample at the tail and evict against the cutoff and ceiling.
    ///
    /// `now_ms` is the current wall clock in epoch milliseconds; the cutoff
    /// is `now_ms - range_minutes * 60000`.
    pub fn append(&mut self, sample: Sample, now_ms: i64) {
        self.samples.push_back(sample);
        self.evict(now_ms);
    }

    /// Change the time range and immediately re-evict existing contents.
    pub fn set_range(&mut self, minutes: u32, now_ms: i64) {
        self.range_minutes = minutes;
        self.evict(now_ms);
    }

    fn evict(&mut self, now_ms: i64) {
        let cutoff = now_ms - i64::from(self.range_minutes) * 60_000;
        while self.samples.front().is_some_and(|s| s.timestamp < cutoff) {
            self.samples.pop_front();
        }
        while self.samples.len() > self.max_points {
            self.samples.pop_front();
        }
    }

    /// Iterate over retained samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// The most recently appended sample, if any.
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Currently selected time range in minutes.
    pub fn range_minutes(&self) -> u32 {
        self.range_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::Severity;

    fn sample(timestamp: i64) -> Sample {
        Sample {
            timestamp,
            temperature: 20.0,
            vibration: 0.5,
            is_anomaly: false,
            severity: Severity::Low,
            reason: None,
        }
    }

    #[test]
    fn test_append_and_snapshot_order() {
        let mut window = SampleWindow::new(10, 5);
        let now = 10_000;
        window.append(sample(1_000), now);
        window.append(sample(2_000), now);
        window.append(sample(3_000), now);

        let timestamps: Vec<i64> = window.iter().map(|s| s.timestamp).collect();
        assert_eq!(timestamps, vec![1_000, 2_000, 3_000]);
        assert_eq!(window.latest().unwrap().timestamp, 3_000);
    }

    #[test]
    fn test_count_ceiling_drops_oldest() {
        let mut window = SampleWindow::new(3, 60);
        let now = 0;
        for ts in 1..=5 {
            window.append(sample(ts), now);
        }

        assert_eq!(window.len(), 3);
        let timestamps: Vec<i64> = window.iter().map(|s| s.timestamp).collect();
        assert_eq!(timestamps, vec![3, 4, 5]);
    }

    #[test]
    fn test_time_eviction_on_append() {
        let mut window = SampleWindow::new(100, 5);
        let now = 600_000; // 10 minutes in
        // 8 minutes old: outside a 5 minute range
        window.append(sample(120_000), now);
        // 2 minutes old: inside
        window.append(sample(480_000), now);

        let timestamps: Vec<i64> = window.iter().map(|s| s.timestamp).collect();
        assert_eq!(timestamps, vec![480_000]);
    }

    #[test]
    fn test_set_range_evicts_immediately() {
        let mut window = SampleWindow::new(100, 60);
        let now = 600_000;
        // 10 minutes old: fine under a 60 minute range
        window.append(sample(0), now);
        assert_eq!(window.len(), 1);

        // Narrowing to 5 minutes must take effect without another append
        window.set_range(5, now);
        assert!(window.is_empty());
        assert_eq!(window.range_minutes(), 5);
    }

    #[test]
    fn test_out_of_order_sample_stays_at_tail() {
        let mut window = SampleWindow::new(10, 60);
        let now = 10_000;
        window.append(sample(5_000), now);
        window.append(sample(4_000), now);

        let timestamps: Vec<i64> = window.iter().map(|s| s.timestamp).collect();
        assert_eq!(timestamps, vec![5_000, 4_000]);
    }

    #[test]
    fn test_never_exceeds_ceiling_after_any_append() {
        let mut window = SampleWindow::new(50, 60);
        for ts in 0..500 {
            window.append(sample(ts), 500);
            assert!(window.len() <= 50);
        }
    }
}
