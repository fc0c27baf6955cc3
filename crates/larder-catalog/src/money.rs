//! Money type for representing monetary values.
//!
//! Prices are stored in the smallest unit of the currency (cents for
//! USD) to avoid floating-point precision issues. Sale pricing and the
//! discount badge math live here as well.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies the catalog can be priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::CAD => "C$",
            Currency::AUD => "A$",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "$49.99", "\u{00a5}100").
    pub fn display(&self) -> String {
        let decimal = self.to_decimal();
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), decimal)
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let decimal = self.to_decimal();
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", decimal)
    }

    /// Amount saved relative to another price, clamped at zero.
    pub fn savings_from(&self, original: &Money) -> Money {
        Money::new(
            (original.amount_cents - self.amount_cents).max(0),
            self.currency,
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Calculate the discount percentage between a base and a sale price.
///
/// Returns `None` unless the sale price is strictly below the base price.
pub fn discount_percentage(price_cents: i64, sale_cents: i64) -> Option<u8> {
    if price_cents <= 0 || sale_cents >= price_cents {
        return None;
    }
    let savings = price_cents - sale_cents;
    let pct = (savings as f64 / price_cents as f64 * 100.0).round();
    Some(pct as u8)
}

/// Price formatting projection used by price badges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedPrice {
    /// The base price, formatted.
    pub original: String,
    /// The sale price, formatted, when a valid discount applies.
    pub sale: Option<String>,
    /// Whether a valid discount applies.
    pub has_discount: bool,
    /// Discount percentage, rounded to whole percent.
    pub discount_percentage: Option<u8>,
}

impl FormattedPrice {
    /// Format a base price with an optional sale price.
    ///
    /// A populated sale price that is not strictly below the base price
    /// is ignored rather than rendered as a discount.
    pub fn from_cents(price_cents: i64, sale_cents: Option<i64>, currency: Currency) -> Self {
        let original = Money::new(price_cents, currency).display();

        match sale_cents {
            Some(sale) if sale < price_cents => Self {
                original,
                sale: Some(Money::new(sale, currency).display()),
                has_discount: true,
                discount_percentage: discount_percentage(price_cents, sale),
            },
            _ => Self {
                original,
                sale: None,
                has_discount: false,
                discount_percentage: None,
            },
        }
    }

    /// "Save $2.00 (20%)" text for sale badges.
    pub fn savings_text(price_cents: i64, sale_cents: i64, currency: Currency) -> Option<String> {
        let pct = discount_percentage(price_cents, sale_cents)?;
        let savings = Money::new(price_cents - sale_cents, currency);
        Some(format!("Save {} ({}%)", savings.display(), pct))
    }
}
