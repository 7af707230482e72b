//! Items

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of a drop record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DropId(String);

impl DropId {
    /// Wraps a raw drop identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DropId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// The external commerce system's key for a purchasable variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(String);

impl VariantId {
    /// Wraps a raw variant identifier, e.g. `gid://shopify/ProductVariant/1`.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VariantId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// A variant the shopper wants to add, before a quantity is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLineItem {
    /// Drop the variant belongs to.
    pub drop_id: DropId,

    /// External variant key.
    pub variant_id: VariantId,

    /// Display title.
    pub title: String,

    /// Unit price.
    pub price: Decimal,

    /// Optional image reference.
    pub image: Option<String>,
}

impl NewLineItem {
    pub(crate) fn with_quantity(self, quantity: u32) -> LineItem {
        LineItem {
            drop_id: self.drop_id,
            variant_id: self.variant_id,
            title: self.title,
            price: self.price,
            quantity,
            image: self.image,
        }
    }
}

/// One product variant and its quantity within a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Drop the variant belongs to.
    pub drop_id: DropId,

    /// External variant key. Unique within a cart.
    pub variant_id: VariantId,

    /// Display title.
    pub title: String,

    /// Unit price, persisted as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Quantity, at least 1.
    pub quantity: u32,

    /// Optional image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl LineItem {
    /// Unit price multiplied by quantity, or `None` if the product does not fit a [`Decimal`].
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    /// The (variant, quantity) pair handed to the checkout.
    pub fn checkout_line(&self) -> CheckoutLine {
        CheckoutLine {
            merchandise_id: self.variant_id.clone(),
            quantity: self.quantity,
        }
    }
}

/// A variant and quantity submitted to the external checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    /// External variant key.
    pub merchandise_id: VariantId,

    /// Quantity to purchase.
    pub quantity: u32,
}
