//! # Cart Ledger
//!
//! Records scan events for one checkout session.
//!
//! ## Ledger Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger Operations                                    │
//! │                                                                         │
//! │  Register Event           Ledger Call              Tally Change         │
//! │  ──────────────           ───────────              ────────────         │
//! │                                                                         │
//! │  Barcode read ───────────► scan(sku) ────────────► tally[sku] += 1     │
//! │                                                                         │
//! │  Total requested ────────► snapshot() ───────────► (read only copy)    │
//! │                                                                         │
//! │  Void all ───────────────► clear() ──────────────► tally emptied       │
//! │                                                                         │
//! │  NOTE: scan() never checks the catalog. Unknown SKUs are reported by    │
//! │        the pricing engine, so a scan can never fail.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! [`CartLedger`] is a plain value for single-threaded sessions.
//! [`SharedLedger`] wraps it in `Arc<Mutex<T>>` when several scanners feed
//! the same session: each `scan` is a read-modify-write on one counter and
//! must not interleave with another.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::tally::Tally;

// =============================================================================
// Cart Ledger
// =============================================================================

/// Tally of SKUs scanned so far.
#[derive(Debug, Clone, Default)]
pub struct CartLedger {
    tally: Tally,
}

impl CartLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        CartLedger::default()
    }

    /// Records one unit of `sku`.
    pub fn scan(&mut self, sku: &str) {
        self.tally.add(sku, 1);
        trace!(sku, quantity = self.tally.quantity_of(sku), "Scanned");
    }

    /// Copy of the tally as of now. Later scans do not show up in it.
    pub fn snapshot(&self) -> Tally {
        self.tally.clone()
    }

    /// Read-only view without copying.
    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    pub fn is_empty(&self) -> bool {
        self.tally.is_empty()
    }

    /// Drops every scan recorded so far.
    pub fn clear(&mut self) {
        self.tally.clear();
    }
}

// =============================================================================
// Shared Ledger
// =============================================================================

/// A ledger that several threads can scan into.
///
/// ## Why Mutex, Not RwLock?
/// Nearly every call is a write, and the critical section is one map
/// update, so a reader/writer split buys nothing.
///
/// ## Poisoning
/// A panic cannot leave the tally half-updated (every mutation is a single
/// counter increment), so a poisoned lock is recovered rather than
/// propagated.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    ledger: Arc<Mutex<CartLedger>>,
}

impl SharedLedger {
    pub fn new() -> Self {
        SharedLedger::default()
    }

    /// Records one unit of `sku` under the lock.
    pub fn scan(&self, sku: &str) {
        self.lock().scan(sku);
    }

    /// Tally taken atomically with respect to concurrent scans.
    pub fn snapshot(&self) -> Tally {
        self.lock().snapshot()
    }

    /// Executes a function with read access to the ledger.
    ///
    /// ## Usage
    /// ```rust
    /// use till_core::ledger::SharedLedger;
    ///
    /// let ledger = SharedLedger::new();
    /// ledger.scan("atv");
    /// let units = ledger.with_ledger(|l| l.tally().total_units());
    /// assert_eq!(units, 1);
    /// ```
    pub fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartLedger) -> R,
    {
        f(&self.lock())
    }

    /// Executes a function with write access to the ledger.
    pub fn with_ledger_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartLedger) -> R,
    {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, CartLedger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = CartLedger::new();
        assert!(ledger.is_empty());
        assert!(ledger.snapshot().is_empty());
    }

    #[test]
    fn test_scan_increments() {
        let mut ledger = CartLedger::new();
        ledger.scan("ipd");
        ledger.scan("ipd");
        ledger.scan("mbp");

        let tally = ledger.snapshot();
        assert_eq!(tally.quantity_of("ipd"), 2);
        assert_eq!(tally.quantity_of("mbp"), 1);
    }

    #[test]
    fn test_scan_accepts_unknown_sku() {
        let mut ledger = CartLedger::new();
        ledger.scan("not-in-any-catalog");
        assert_eq!(ledger.tally().quantity_of("not-in-any-catalog"), 1);
    }

    #[test]
    fn test_snapshot_is_frozen() {
        let mut ledger = CartLedger::new();
        ledger.scan("atv");
        let before = ledger.snapshot();
        ledger.scan("atv");

        assert_eq!(before.quantity_of("atv"), 1);
        assert_eq!(ledger.snapshot().quantity_of("atv"), 2);
    }

    #[test]
    fn test_clear() {
        let mut ledger = CartLedger::new();
        ledger.scan("vga");
        ledger.clear();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_shared_ledger_loses_no_scans() {
        let ledger = SharedLedger::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = ledger.clone();
                thread::spawn(move || {
                    for _ in 0..250 {
                        ledger.scan("atv");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(ledger.snapshot().quantity_of("atv"), 2000);
    }

    #[test]
    fn test_shared_ledger_survives_poisoning() {
        let ledger = SharedLedger::new();
        ledger.scan("mbp");

        let poisoner = ledger.clone();
        let _ = thread::spawn(move || {
            poisoner.with_ledger_mut(|_| panic!("scanner crashed"));
        })
        .join();

        ledger.scan("mbp");
        assert_eq!(ledger.snapshot().quantity_of("mbp"), 2);
    }
}
