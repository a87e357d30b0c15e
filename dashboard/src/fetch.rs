//! Stale-response guard for refreshable data sections
//!
//! None of the fetch flows support cancellation, so a user refreshing twice
//! leaves the first request in flight. Its late response must not overwrite
//! the newer one. Each data section owns a sequencer; a completion is
//! applied only while its ticket is still the newest issued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic ticket issued for one fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Per-section issuer of fetch tickets
#[derive(Clone, Default)]
pub struct FetchSequencer {
    latest: Arc<AtomicU64>,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch, superseding any still in flight
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether this ticket's response may still be applied
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Keep the result only when the ticket is still the newest; a
    /// superseded response is discarded
    pub fn accept<T>(&self, ticket: FetchTicket, result: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(result)
        } else {
            tracing::debug!("discarding response from superseded fetch");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_fetch_wins() {
        let seq = FetchSequencer::new();
        let first = seq.begin();
        let second = seq.begin();

        // The older response is discarded, the newer one applied
        assert_eq!(seq.accept(first, "stale"), None);
        assert_eq!(seq.accept(second, "fresh"), Some("fresh"));
    }

    #[test]
    fn test_single_fetch_is_applied() {
        let seq = FetchSequencer::new();
        let ticket = seq.begin();
        assert!(seq.is_current(ticket));
        assert_eq!(seq.accept(ticket, 7), Some(7));
    }

    #[test]
    fn test_sections_are_independent() {
        let inventory = FetchSequencer::new();
        let orders = FetchSequencer::new();

        let inv = inventory.begin();
        orders.begin();
        orders.begin();

        // Churn in one section never invalidates another
        assert!(inventory.is_current(inv));
    }
}
