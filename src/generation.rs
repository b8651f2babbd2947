//! Latest-request-wins guard for re-issuable async updates.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// Monotonic counter handing out tickets. Starting a new request makes every
/// older ticket stale, so a slow response can tell it must be dropped.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration(Arc<AtomicU64>);

/// Proof of which request a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersede everything issued so far.
    pub fn next(&self) -> Ticket {
        Ticket(self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0.load(Ordering::SeqCst) == ticket.0
    }
}
