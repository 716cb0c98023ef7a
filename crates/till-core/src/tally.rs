//! # Cart Tally
//!
//! The count of each SKU scanned in a checkout session, as consumed by the
//! pricing engine and by discount rules.

use std::collections::BTreeMap;

use serde::Serialize;

/// Units of one SKU. Only ever incremented, so unsigned.
pub type Quantity = u32;

/// SKU → quantity scanned.
///
/// ## Invariants
/// - Only SKUs with quantity > 0 are stored
/// - Key order never affects a price: each SKU is priced independently and
///   the subtotals are summed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tally {
    counts: BTreeMap<String, Quantity>,
}

impl Tally {
    pub fn new() -> Self {
        Tally::default()
    }

    /// Quantity of `sku`, 0 if it was never scanned.
    ///
    /// Rules read other SKUs through this, e.g. a free adapter per laptop.
    pub fn quantity_of(&self, sku: &str) -> Quantity {
        self.counts.get(sku).copied().unwrap_or(0)
    }

    /// Adds `count` units of `sku`. Adding zero is a no-op.
    pub fn add(&mut self, sku: &str, count: Quantity) {
        if count == 0 {
            return;
        }
        match self.counts.get_mut(sku) {
            Some(qty) => *qty = qty.saturating_add(count),
            None => {
                self.counts.insert(sku.to_string(), count);
            }
        }
    }

    /// Iterates `(sku, quantity)` pairs, every quantity > 0.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Quantity)> {
        self.counts.iter().map(|(sku, qty)| (sku.as_str(), *qty))
    }

    /// Number of distinct SKUs.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Units across all SKUs.
    pub fn total_units(&self) -> u64 {
        self.counts.values().map(|&q| u64::from(q)).sum()
    }

    pub(crate) fn clear(&mut self) {
        self.counts.clear();
    }
}

impl<'a> FromIterator<&'a str> for Tally {
    /// Builds a tally from a scan sequence.
    fn from_iter<I: IntoIterator<Item = &'a str>>(scans: I) -> Self {
        let mut tally = Tally::new();
        for sku in scans {
            tally.add(sku, 1);
        }
        tally
    }
}

impl FromIterator<String> for Tally {
    fn from_iter<I: IntoIterator<Item = String>>(scans: I) -> Self {
        let mut tally = Tally::new();
        for sku in scans {
            tally.add(&sku, 1);
        }
        tally
    }
}

impl FromIterator<(String, Quantity)> for Tally {
    fn from_iter<I: IntoIterator<Item = (String, Quantity)>>(counts: I) -> Self {
        let mut tally = Tally::new();
        for (sku, qty) in counts {
            tally.add(&sku, qty);
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_sku_is_zero() {
        let tally = Tally::new();
        assert_eq!(tally.quantity_of("mbp"), 0);
        assert!(tally.is_empty());
    }

    #[test]
    fn test_from_scan_sequence() {
        let tally: Tally = ["atv", "ipd", "ipd", "atv", "ipd"].into_iter().collect();

        assert_eq!(tally.quantity_of("atv"), 2);
        assert_eq!(tally.quantity_of("ipd"), 3);
        assert_eq!(tally.len(), 2);
        assert_eq!(tally.total_units(), 5);
    }

    #[test]
    fn test_zero_count_not_stored() {
        let mut tally = Tally::new();
        tally.add("vga", 0);
        assert!(tally.is_empty());
        assert_eq!(tally.iter().count(), 0);
    }

    #[test]
    fn test_scan_order_irrelevant() {
        let a: Tally = ["ipd", "mbp", "ipd"].into_iter().collect();
        let b: Tally = ["ipd", "ipd", "mbp"].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let tally: Tally = vec![("atv".to_string(), 3), ("vga".to_string(), 1)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(json, r#"{"atv":3,"vga":1}"#);
    }
}
