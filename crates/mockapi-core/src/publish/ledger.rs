//! Publish ledger.

use crate::types::message::QueueMessage;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Insertion-ordered log of published messages.
///
/// Entries are appended under a single lock, so concurrent records are never
/// lost or duplicated and records made in sequence keep their order.
#[derive(Debug, Default)]
pub struct Ledger {
    messages: Mutex<Vec<QueueMessage>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message stamped with the current time and return a copy of it.
    pub fn record(
        &self,
        destination: &str,
        virtual_host: Option<&str>,
        content: &str,
        is_json: bool,
    ) -> QueueMessage {
        let mut messages = self.lock();
        // Stamped under the lock so timestamps never go backwards in the log.
        let message = QueueMessage {
            destination: destination.to_string(),
            virtual_host: virtual_host.map(str::to_string),
            content: content.to_string(),
            is_json,
            timestamp: Utc::now(),
        };
        messages.push(message.clone());
        message
    }

    /// Snapshot of all messages, oldest first.
    pub fn list(&self) -> Vec<QueueMessage> {
        self.lock().clone()
    }

    /// Drop every message and return how many were dropped.
    pub fn clear(&self) -> usize {
        let mut messages = self.lock();
        let cleared = messages.len();
        messages.clear();
        cleared
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<QueueMessage>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[fixture]
    fn ledger() -> Ledger {
        Ledger::new()
    }

    #[rstest]
    fn test_record_keeps_fields(ledger: Ledger) {
        let recorded = ledger.record("Queue: orders", Some("staging"), "{\"id\":1}", true);

        let messages = ledger.list();
        assert_eq!(messages, vec![recorded]);
        assert_eq!(messages[0].destination, "Queue: orders");
        assert_eq!(messages[0].virtual_host.as_deref(), Some("staging"));
        assert_eq!(messages[0].content, "{\"id\":1}");
        assert!(messages[0].is_json);
    }

    #[rstest]
    fn test_list_preserves_call_order(ledger: Ledger) {
        for i in 0..5 {
            ledger.record("Queue: q", None, &i.to_string(), false);
        }

        let contents: Vec<String> = ledger.list().into_iter().map(|m| m.content).collect();
        assert_eq!(contents, vec!["0", "1", "2", "3", "4"]);
    }

    #[rstest]
    fn test_timestamps_are_non_decreasing(ledger: Ledger) {
        for _ in 0..20 {
            ledger.record("Queue: q", None, "x", false);
        }
        let messages = ledger.list();
        assert!(messages
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp));
    }

    #[rstest]
    fn test_list_is_a_copy(ledger: Ledger) {
        ledger.record("Queue: q", None, "x", false);
        let snapshot = ledger.list();
        ledger.clear();

        assert_eq!(snapshot.len(), 1);
        assert!(ledger.is_empty());
    }

    #[rstest]
    fn test_clear_empties_ledger(ledger: Ledger) {
        ledger.record("Queue: a", None, "1", false);
        ledger.record("Queue: b", None, "2", true);

        assert_eq!(ledger.clear(), 2);

        assert_eq!(ledger.len(), 0);
        assert!(ledger.list().is_empty());
    }

    #[rstest]
    #[case(2)]
    #[case(16)]
    #[case(64)]
    fn test_concurrent_records_are_not_lost(#[case] threads: usize) {
        let ledger = Arc::new(Ledger::new());
        let handles: Vec<_> = (0..threads)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    ledger.record("Queue: q", None, &format!("message-{}", i), false);
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("Worker should not panic");
        }

        let messages = ledger.list();
        assert_eq!(messages.len(), threads);
        let distinct: HashSet<String> = messages.into_iter().map(|m| m.content).collect();
        assert_eq!(distinct.len(), threads);
    }
}
