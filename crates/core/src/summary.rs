//! Cart Summary

use std::io;

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{cart::Cart, prices::format_price};

/// Shown in place of a total that does not fit a [`Decimal`].
const OUT_OF_RANGE: &str = "out of range";

/// Errors raised while writing a cart summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The output could not be written.
    #[error("failed to write cart summary")]
    Io(#[from] io::Error),
}

/// Tabular rendering of a cart's line items and totals.
#[derive(Debug)]
pub struct CartSummary<'a> {
    cart: &'a Cart,
    currency_code: &'a str,
}

impl<'a> CartSummary<'a> {
    /// Summarise `cart`, rendering prices in `currency_code`.
    pub fn new(cart: &'a Cart, currency_code: &'a str) -> Self {
        Self {
            cart,
            currency_code,
        }
    }

    /// Write the summary table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        if self.cart.is_empty() {
            writeln!(out, "Cart is empty")?;

            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["Item", "Variant", "Qty", "Unit Price", "Line Total"]);

        for item in self.cart.items() {
            builder.push_record([
                item.title.clone(),
                item.variant_id.to_string(),
                item.quantity.to_string(),
                format_price(item.price, self.currency_code),
                format_total(item.line_total(), self.currency_code),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(out, " Items: {}", self.cart.total_items())?;
        writeln!(
            out,
            " Total: {}",
            format_total(self.cart.total_price(), self.currency_code)
        )?;

        Ok(())
    }
}

fn format_total(amount: Option<Decimal>, currency_code: &str) -> String {
    amount.map_or_else(
        || OUT_OF_RANGE.to_string(),
        |amount| format_price(amount, currency_code),
    )
}
