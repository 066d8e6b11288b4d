//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are whole currency units (roubles, dollars), never minor
//! units, so `89900` RUB is displayed as `89 900 ₽`.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Group separator used by locales that group with spaces (U+00A0).
const NBSP: char = '\u{a0}';

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., roubles, not kopecks).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display, e.g. `229 700 ₽` or `$19.99`.
    ///
    /// Whole amounts are shown without a fractional part. Anything else is
    /// rounded to two places.
    #[must_use]
    pub fn display(&self) -> String {
        let style = self.currency_code.style();
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let abs = rounded.abs();
        let whole = abs.trunc();
        let fraction = abs - whole;

        let mut number = group_digits(&whole.trunc().to_string(), style.group);
        if !fraction.is_zero() {
            let cents = (fraction * Decimal::ONE_HUNDRED).trunc().to_string();
            number.push(style.decimal);
            number.push_str(&format!("{cents:0>2}"));
        }

        let sign = if negative { "-" } else { "" };
        if style.prefix {
            format!("{sign}{}{number}", style.symbol)
        } else {
            format!("{sign}{number} {}", style.symbol)
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Insert `separator` between every group of three digits, from the right.
fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(digits.len() + len / 3 * separator.len_utf8());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    #[default]
    RUB,
}

/// How a currency writes its amounts.
struct CurrencyStyle {
    symbol: &'static str,
    prefix: bool,
    group: char,
    decimal: char,
}

impl CurrencyCode {
    /// Currency symbol, e.g. `₽`.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        (*self).style().symbol
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            Self::RUB => "RUB",
        }
    }

    const fn style(self) -> CurrencyStyle {
        match self {
            Self::USD | Self::CAD | Self::AUD => CurrencyStyle {
                symbol: "$",
                prefix: true,
                group: ',',
                decimal: '.',
            },
            Self::GBP => CurrencyStyle {
                symbol: "£",
                prefix: true,
                group: ',',
                decimal: '.',
            },
            Self::EUR => CurrencyStyle {
                symbol: "€",
                prefix: false,
                group: NBSP,
                decimal: ',',
            },
            Self::RUB => CurrencyStyle {
                symbol: "₽",
                prefix: false,
                group: NBSP,
                decimal: ',',
            },
        }
    }
}
