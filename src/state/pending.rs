//! Tickets for in-flight simulated operations
//!
//! Every delayed operation (voice capture, photo analysis, tile download,
//! location acquisition) is started with a fresh [`Ticket`]. The owning
//! screen state remembers the ticket of its live operation in a [`Pending`]
//! slot; a completion is applied only when it carries that exact ticket.
//! Cancelling, superseding and tearing a screen down all come down to
//! forgetting the live ticket.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of ticket ids. Ids are unique for the whole process so a completion
/// from a torn-down screen can never match a ticket issued by its successor.
static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identifier of one pending operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Issue a ticket that has never been handed out before
    pub fn issue() -> Self {
        Ticket(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id, for log lines
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Slot holding at most one live ticket
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pending {
    live: Option<Ticket>,
}

impl Pending {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new operation, superseding whatever was live
    pub fn start(&mut self) -> Ticket {
        let ticket = Ticket::issue();
        self.live = Some(ticket);
        ticket
    }

    /// Forget the live operation; its completion will be rejected
    pub fn cancel(&mut self) -> Option<Ticket> {
        self.live.take()
    }

    /// Accept a completion. Returns `true` (and clears the slot) only when
    /// `ticket` is the live one.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if self.live == Some(ticket) {
            self.live = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.live.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_are_unique() {
        let a = Ticket::issue();
        let b = Ticket::issue();
        assert_ne!(a, b);
        assert!(b.id() > a.id());
    }

    #[test]
    fn test_settle_accepts_live_ticket_once() {
        let mut pending = Pending::new();
        let ticket = pending.start();
        assert!(pending.is_pending());

        assert!(pending.settle(ticket));
        assert!(!pending.is_pending());

        // A duplicate completion is ignored
        assert!(!pending.settle(ticket));
    }

    #[test]
    fn test_cancel_rejects_later_completion() {
        let mut pending = Pending::new();
        let ticket = pending.start();
        assert_eq!(pending.cancel(), Some(ticket));
        assert!(!pending.settle(ticket));
    }

    #[test]
    fn test_restart_supersedes_previous_ticket() {
        let mut pending = Pending::new();
        let first = pending.start();
        let second = pending.start();

        assert!(!pending.settle(first));
        assert!(pending.is_pending());
        assert!(pending.settle(second));
    }

    #[test]
    fn test_fresh_slot_never_matches_old_ticket() {
        // A ticket from a previous screen instance must not match a new one
        let mut old = Pending::new();
        let stale = old.start();

        let mut fresh = Pending::new();
        let _live = fresh.start();
        assert!(!fresh.settle(stale));
    }
}
