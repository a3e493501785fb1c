//! Bounded, most-recent-first log of anomaly events.

use std::collections::VecDeque;

use super::sample::AnomalyEvent;

/// Ring buffer of the most recent anomaly events.
///
/// New events are inserted at the head; once the capacity is reached the
/// oldest entries fall off the tail. Ordering is strictly insertion recency,
/// not timestamp, so an out-of-order-arriving anomaly still lands at the head.
#[derive(Debug, Clone)]
pub struct AnomalyLog {
    events: VecDeque<AnomalyEvent>,
    capacity: usize,
}

impl AnomalyLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert an event at the head, dropping tail entries past capacity.
    pub fn push(&mut self, event: AnomalyEvent) {
        self.events.push_front(event);
        self.events.truncate(self.capacity);
    }

    /// Iterate over retained events, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &AnomalyEvent> {
        self.events.iter()
    }

    /// The most recently pushed event, if any.
    pub fn latest(&self) -> Option<&AnomalyEvent> {
        self.events.front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::Severity;

    fn event(id: &str, timestamp: i64) -> AnomalyEvent {
        AnomalyEvent {
            id: id.to_string(),
            timestamp,
            severity: Severity::High,
            reason: "Temperature spike".to_string(),
            temperature: 40.0,
            vibration: 3.0,
        }
    }

    #[test]
    fn test_head_is_most_recent() {
        let mut log = AnomalyLog::new(10);
        log.push(event("a", 1));
        log.push(event("b", 2));

        assert_eq!(log.latest().unwrap().id, "b");
        let ids: Vec<&str> = log.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = AnomalyLog::new(2);
        log.push(event("a", 1));
        log.push(event("b", 2));
        log.push(event("c", 3));

        assert_eq!(log.len(), 2);
        let ids: Vec<&str> = log.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn test_out_of_order_anomaly_still_heads() {
        let mut log = AnomalyLog::new(10);
        log.push(event("late", 5_000));
        log.push(event("early", 1_000));

        // Insertion recency wins over timestamp.
        assert_eq!(log.latest().unwrap().id, "early");
    }

    #[test]
    fn test_duplicate_timestamps_with_distinct_ids_retained() {
        let mut log = AnomalyLog::new(10);
        log.push(event("x1", 42));
        log.push(event("x2", 42));

        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        let mut log = AnomalyLog::new(5);
        for i in 0..100 {
            log.push(event(&format!("e{i}"), i));
            assert!(log.len() <= 5);
        }
    }
}
