//! Ticket list state container.
//!
//! A push-based replacement for shared mutable list state: one
//! [`TicketFeed`] per session owns the current snapshot and emits
//! immutable copies to subscribers whenever it is refreshed.

use serde::Serialize;
use tokio::sync::watch;

use crate::models::Ticket;
use crate::store::{Result, TicketStore};

/// Aggregate counts over the stored tickets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
}

/// Immutable view of the ticket list at one point in time.
#[derive(Debug, Clone, Default)]
pub struct TicketListSnapshot {
    /// Most recently processed first.
    pub tickets: Vec<Ticket>,
    pub stats: TicketStats,
}

/// Owner of the current ticket-list snapshot.
pub struct TicketFeed {
    tx: watch::Sender<TicketListSnapshot>,
}

impl TicketFeed {
    /// Create a feed with an empty initial snapshot.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(TicketListSnapshot::default());
        Self { tx }
    }

    /// Register an observer. The receiver immediately holds the current
    /// snapshot and is notified on every refresh.
    pub fn subscribe(&self) -> watch::Receiver<TicketListSnapshot> {
        self.tx.subscribe()
    }

    /// Recompute the snapshot from the store and publish it.
    pub fn refresh(&self, store: &TicketStore) -> Result<TicketListSnapshot> {
        let tickets = store.list_all()?;
        let processed = tickets.iter().filter(|t| t.is_processed).count();
        let snapshot = TicketListSnapshot {
            stats: TicketStats {
                total: tickets.len(),
                processed,
                failed: tickets.len() - processed,
            },
            tickets,
        };
        self.tx.send_replace(snapshot.clone());
        Ok(snapshot)
    }
}

impl Default for TicketFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ticket;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn refresh_publishes_stats_to_subscribers() {
        let store = TicketStore::open_in_memory().unwrap();
        let at = NaiveDate::from_ymd_opt(2023, 12, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        store.insert(&Ticket::processed("a.pdf", "/t/a.pdf", "fp-a", at)).unwrap();
        store.insert(&Ticket::failed("b.pdf", "/t/b.pdf", "boom", at)).unwrap();

        let feed = TicketFeed::new();
        let rx = feed.subscribe();
        assert_eq!(rx.borrow().stats, TicketStats::default());

        feed.refresh(&store).unwrap();
        let snapshot = rx.borrow();
        assert_eq!(snapshot.stats, TicketStats { total: 2, processed: 1, failed: 1 });
        assert_eq!(snapshot.tickets.len(), 2);
    }
}
