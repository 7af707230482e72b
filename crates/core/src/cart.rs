//! Cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::items::{CheckoutLine, DropId, LineItem, NewLineItem, VariantId};

/// The shopper's line items plus transient checkout state.
///
/// Line items keep insertion order and there is at most one item per variant. Totals are
/// recomputed from the items on every read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<LineItem>,
    is_loading: bool,
    checkout_url: Option<String>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a cart read back from storage.
    ///
    /// Zero-quantity items are dropped, repeated variants are merged into their first
    /// occurrence, and the loading flag is reset: no checkout request survives a restart.
    pub fn rehydrate(self) -> Self {
        let mut cart = Cart {
            items: Vec::with_capacity(self.items.len()),
            is_loading: false,
            checkout_url: self.checkout_url,
        };

        for item in self.items.into_iter().filter(|item| item.quantity > 0) {
            match cart.position(&item.variant_id) {
                Some(idx) => cart.increment(idx, item.quantity),
                None => cart.items.push(item),
            }
        }

        cart
    }

    /// Add `quantity` of a variant.
    ///
    /// An existing line item for the same variant has its quantity increased; otherwise a new
    /// line item is appended. Adding a quantity of zero changes nothing.
    pub fn add_item(&mut self, item: NewLineItem, quantity: u32) {
        if quantity == 0 {
            return;
        }

        match self.position(&item.variant_id) {
            Some(idx) => self.increment(idx, quantity),
            None => self.items.push(item.with_quantity(quantity)),
        }
    }

    /// Set a line item's quantity exactly. Zero or less removes it.
    pub fn update_quantity(&mut self, variant_id: &VariantId, quantity: i64) {
        let Ok(quantity) = u64::try_from(quantity) else {
            self.remove_item(variant_id);
            return;
        };

        if quantity == 0 {
            self.remove_item(variant_id);
            return;
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| &item.variant_id == variant_id)
        {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Remove the line item for a variant, if present.
    pub fn remove_item(&mut self, variant_id: &VariantId) {
        self.items.retain(|item| &item.variant_id != variant_id);
    }

    /// Empty the cart and forget the last checkout URL.
    pub fn clear(&mut self) {
        self.items.clear();
        self.checkout_url = None;
    }

    /// Mark a checkout session request as outstanding.
    pub fn begin_checkout(&mut self) {
        self.is_loading = true;
    }

    /// Resolve the outstanding checkout request, recording the URL when one was issued.
    pub fn finish_checkout(&mut self, checkout_url: Option<String>) {
        self.is_loading = false;

        if checkout_url.is_some() {
            self.checkout_url = checkout_url;
        }
    }

    /// Sum of quantities across all line items.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of unit price times quantity across all line items.
    ///
    /// `None` if any line total or the running sum leaves the [`Decimal`] range.
    pub fn total_price(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.line_total()?))
    }

    /// Quantity in the cart belonging to the given drop.
    pub fn quantity_for_drop(&self, drop_id: &DropId) -> u64 {
        self.items
            .iter()
            .filter(|item| &item.drop_id == drop_id)
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// The line item list in the shape the external checkout expects.
    pub fn checkout_lines(&self) -> Vec<CheckoutLine> {
        self.items.iter().map(LineItem::checkout_line).collect()
    }

    /// Look up the line item for a variant.
    pub fn find(&self, variant_id: &VariantId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.variant_id == variant_id)
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether a checkout session request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The last checkout URL issued for this cart. Informational only.
    pub fn checkout_url(&self) -> Option<&str> {
        self.checkout_url.as_deref()
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, variant_id: &VariantId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.variant_id == variant_id)
    }

    fn increment(&mut self, idx: usize, quantity: u32) {
        if let Some(item) = self.items.get_mut(idx) {
            item.quantity = item.quantity.saturating_add(quantity);
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn variant(id: &str, price: Decimal) -> NewLineItem {
        NewLineItem {
            drop_id: DropId::new("drop-1"),
            variant_id: VariantId::new(id),
            title: format!("Variant {id}"),
            price,
            image: None,
        }
    }

    fn ten() -> Decimal {
        Decimal::new(10_00, 2)
    }

    #[test]
    fn totals_for_two_variants() {
        let mut cart = Cart::new();

        cart.add_item(variant("A", ten()), 2);
        cart.add_item(variant("B", Decimal::new(25_00, 2)), 1);

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Some(Decimal::new(45_00, 2)));
    }

    #[test]
    fn adding_same_variant_merges_quantities() {
        let mut cart = Cart::new();

        cart.add_item(variant("A", ten()), 2);
        cart.add_item(variant("A", ten()), 3);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.find(&VariantId::new("A")).map(|item| item.quantity), Some(5));
    }

    #[test]
    fn repeated_adds_sum_to_one_line_item() {
        let mut cart = Cart::new();
        let quantities = [1, 4, 2, 7, 1];

        for quantity in quantities {
            cart.add_item(variant("A", ten()), quantity);
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), quantities.iter().map(|q| u64::from(*q)).sum::<u64>());
    }

    #[test]
    fn new_variants_keep_insertion_order() {
        let mut cart = Cart::new();

        cart.add_item(variant("B", ten()), 1);
        cart.add_item(variant("A", ten()), 1);
        cart.add_item(variant("B", ten()), 1);

        let order: Vec<&str> = cart.items().iter().map(|i| i.variant_id.as_str()).collect();

        assert_eq!(order, ["B", "A"]);
    }

    #[test]
    fn adding_zero_quantity_is_a_no_op() {
        let mut cart = Cart::new();

        cart.add_item(variant("A", ten()), 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_replaces_rather_than_increments() {
        let mut cart = Cart::new();

        cart.add_item(variant("A", ten()), 2);
        cart.update_quantity(&VariantId::new("A"), 7);

        assert_eq!(cart.total_items(), 7);
    }

    #[test]
    fn update_quantity_zero_matches_remove_item() {
        let mut updated = Cart::new();
        let mut removed = Cart::new();

        for cart in [&mut updated, &mut removed] {
            cart.add_item(variant("A", ten()), 2);
            cart.add_item(variant("B", ten()), 1);
        }

        updated.update_quantity(&VariantId::new("A"), 0);
        removed.remove_item(&VariantId::new("A"));

        assert_eq!(updated, removed);
        assert!(updated.find(&VariantId::new("A")).is_none());
    }

    #[test]
    fn negative_quantity_removes_item() {
        let mut cart = Cart::new();

        cart.add_item(variant("A", ten()), 2);
        cart.update_quantity(&VariantId::new("A"), -3);

        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_for_unknown_variant_does_nothing() {
        let mut cart = Cart::new();

        cart.add_item(variant("A", ten()), 2);
        cart.update_quantity(&VariantId::new("Z"), 4);

        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn remove_missing_variant_is_a_no_op() {
        let mut cart = Cart::new();

        cart.add_item(variant("A", ten()), 1);
        cart.remove_item(&VariantId::new("B"));

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn totals_follow_every_mutation() {
        let mut cart = Cart::new();

        cart.add_item(variant("A", ten()), 2);
        assert_eq!(cart.total_price(), Some(Decimal::new(20_00, 2)));

        cart.update_quantity(&VariantId::new("A"), 1);
        assert_eq!(cart.total_price(), Some(ten()));

        cart.remove_item(&VariantId::new("A"));
        assert_eq!(cart.total_price(), Some(Decimal::ZERO));
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn clear_empties_items_and_checkout_url() {
        let mut cart = Cart::new();

        cart.add_item(variant("A", ten()), 2);
        cart.begin_checkout();
        cart.finish_checkout(Some("https://shop.example/checkout".to_string()));
        cart.clear();

        assert_eq!(cart.total_items(), 0);
        assert!(cart.checkout_url().is_none());
    }

    #[test]
    fn finish_checkout_without_url_keeps_previous_url() {
        let mut cart = Cart::new();

        cart.begin_checkout();
        cart.finish_checkout(Some("https://shop.example/c/1".to_string()));
        cart.begin_checkout();
        assert!(cart.is_loading());

        cart.finish_checkout(None);

        assert!(!cart.is_loading());
        assert_eq!(cart.checkout_url(), Some("https://shop.example/c/1"));
    }

    #[test]
    fn quantity_additions_saturate() {
        let mut cart = Cart::new();

        cart.add_item(variant("A", ten()), u32::MAX);
        cart.add_item(variant("A", ten()), 5);

        assert_eq!(cart.total_items(), u64::from(u32::MAX));
    }

    #[test]
    fn total_price_out_of_range_is_none() {
        let mut cart = Cart::new();
        let huge = Decimal::from(10_000_000_000_000_000_000_u64) * Decimal::from(5);

        cart.add_item(variant("A", huge), 2_000_000_000);

        assert_eq!(cart.total_items(), 2_000_000_000);
        assert_eq!(cart.total_price(), None);
    }

    #[test]
    fn total_price_sum_out_of_range_is_none() {
        let mut cart = Cart::new();

        cart.add_item(variant("A", Decimal::MAX), 1);
        cart.add_item(variant("B", Decimal::MAX), 1);

        assert_eq!(cart.total_price(), None);
    }

    #[test]
    fn quantity_for_drop_only_counts_that_drop() {
        let mut cart = Cart::new();
        let mut other = variant("C", ten());
        other.drop_id = DropId::new("drop-2");

        cart.add_item(variant("A", ten()), 2);
        cart.add_item(variant("B", ten()), 1);
        cart.add_item(other, 4);

        assert_eq!(cart.quantity_for_drop(&DropId::new("drop-1")), 3);
        assert_eq!(cart.quantity_for_drop(&DropId::new("drop-2")), 4);
    }

    #[test]
    fn serialises_to_persisted_shape() -> TestResult {
        let mut cart = Cart::new();
        cart.add_item(variant("A", ten()), 2);

        let json = serde_json::to_value(&cart)?;

        assert_eq!(
            json,
            serde_json::json!({
                "items": [{
                    "dropId": "drop-1",
                    "variantId": "A",
                    "title": "Variant A",
                    "price": 10.0,
                    "quantity": 2,
                }],
                "isLoading": false,
                "checkoutUrl": null,
            })
        );

        Ok(())
    }

    #[test]
    fn rehydrate_restores_invariants() -> TestResult {
        let raw = serde_json::json!({
            "items": [
                { "dropId": "d", "variantId": "A", "title": "A", "price": 10, "quantity": 2 },
                { "dropId": "d", "variantId": "B", "title": "B", "price": 5.5, "quantity": 0 },
                { "dropId": "d", "variantId": "A", "title": "A", "price": 10, "quantity": 1 },
            ],
            "isLoading": true,
            "checkoutUrl": "https://shop.example/c/1",
        });

        let cart = serde_json::from_value::<Cart>(raw)?.rehydrate();

        assert!(!cart.is_loading());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.find(&VariantId::new("A")).map(|i| i.quantity), Some(3));
        assert_eq!(cart.checkout_url(), Some("https://shop.example/c/1"));

        Ok(())
    }
}
