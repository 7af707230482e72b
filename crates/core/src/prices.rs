//! Prices

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// The storefront's settlement currency.
pub const DEFAULT_CURRENCY: &Currency = iso::EUR;

/// Look up an ISO 4217 currency, falling back to [`DEFAULT_CURRENCY`].
pub fn currency(code: &str) -> &'static Currency {
    iso::find(code.trim()).unwrap_or(DEFAULT_CURRENCY)
}

/// Render a decimal amount in the given currency, e.g. `€45,00`.
pub fn format_price(amount: Decimal, currency_code: &str) -> String {
    Money::from_decimal(amount, currency(currency_code)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_currency_is_found() {
        assert_eq!(currency("USD"), iso::USD);
        assert_eq!(currency(" GBP "), iso::GBP);
    }

    #[test]
    fn unknown_currency_falls_back_to_euro() {
        assert_eq!(currency("XYZ"), iso::EUR);
        assert_eq!(
            format_price(Decimal::new(45_00, 2), "XYZ"),
            format_price(Decimal::new(45_00, 2), "EUR")
        );
    }

    #[test]
    fn formatting_includes_the_currency_symbol() {
        let rendered = format_price(Decimal::new(45_00, 2), "EUR");

        assert!(rendered.contains('€'), "expected euro sign in {rendered}");
        assert!(rendered.contains("45"), "expected amount in {rendered}");
    }
}
