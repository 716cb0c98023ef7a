//! # Checkout Session
//!
//! One customer's trip through the till: a ledger bound to a shared
//! pricing engine.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Checkout::open(engine)                                               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ┌─────────┐   scan(sku)  ──► ledger += 1                             │
//! │   │  OPEN   │   total()    ──► engine.compute_total(snapshot)          │
//! │   └────┬────┘                                                           │
//! │        │ close()  (consumes the session)                               │
//! │        ▼                                                                │
//! │   ┌─────────┐                                                           │
//! │   │ CLOSED  │   no value left to call methods on                       │
//! │   └─────────┘                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::engine::PricingEngine;
use crate::error::CoreResult;
use crate::ledger::CartLedger;
use crate::money::Money;
use crate::tally::Tally;

/// An open checkout session.
#[derive(Debug)]
pub struct Checkout {
    id: Uuid,
    opened_at: DateTime<Utc>,
    engine: Arc<PricingEngine>,
    ledger: CartLedger,
}

impl Checkout {
    /// Opens a session with an empty ledger.
    pub fn open(engine: Arc<PricingEngine>) -> Self {
        let checkout = Checkout {
            id: Uuid::new_v4(),
            opened_at: Utc::now(),
            engine,
            ledger: CartLedger::new(),
        };
        info!(session = %checkout.id, "Checkout opened");
        checkout
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Records one unit of `sku`. Never fails.
    pub fn scan(&mut self, sku: &str) {
        self.ledger.scan(sku);
    }

    /// Current tally.
    pub fn tally(&self) -> &Tally {
        self.ledger.tally()
    }

    /// Prices everything scanned so far.
    pub fn total(&self) -> CoreResult<Money> {
        self.engine.compute_total(self.ledger.tally())
    }

    /// Ends the session, returning the final total.
    ///
    /// On error the session is still consumed; the caller keeps the
    /// scans only if it took a [`tally`](Self::tally) copy beforehand.
    pub fn close(self) -> CoreResult<Money> {
        let total = self.engine.compute_total(self.ledger.tally())?;
        info!(session = %self.id, %total, units = self.ledger.tally().total_units(), "Checkout closed");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PricingConfig;
    use crate::error::CoreError;

    fn engine() -> Arc<PricingEngine> {
        Arc::new(PricingConfig::reference().build_engine().unwrap())
    }

    #[test]
    fn test_scan_and_total() {
        let mut checkout = Checkout::open(engine());
        for sku in ["mbp", "vga", "ipd"] {
            checkout.scan(sku);
        }

        assert_eq!(checkout.tally().total_units(), 3);
        assert_eq!(checkout.total().unwrap().to_string(), "1949.98");
    }

    #[test]
    fn test_total_tracks_scans() {
        let mut checkout = Checkout::open(engine());
        checkout.scan("atv");
        checkout.scan("atv");
        assert_eq!(checkout.total().unwrap().to_string(), "219.00");

        checkout.scan("atv");
        assert_eq!(checkout.total().unwrap().to_string(), "219.00");

        checkout.scan("atv");
        assert_eq!(checkout.close().unwrap().to_string(), "328.50");
    }

    #[test]
    fn test_sessions_share_engine_but_not_carts() {
        let engine = engine();
        let mut first = Checkout::open(Arc::clone(&engine));
        let second = Checkout::open(engine);

        first.scan("mbp");

        assert_ne!(first.id(), second.id());
        assert!(second.tally().is_empty());
        assert!(second.total().unwrap().is_zero());
    }

    #[test]
    fn test_unknown_sku_does_not_poison_session() {
        let mut checkout = Checkout::open(engine());
        checkout.scan("ipd");
        checkout.scan("bogus");

        assert!(matches!(checkout.total(), Err(CoreError::UnknownSku(_))));
        assert_eq!(checkout.tally().quantity_of("ipd"), 1);
        assert!(checkout.opened_at() <= Utc::now());
    }
}
