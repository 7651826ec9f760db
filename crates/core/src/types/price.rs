//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., reais, not centavos).
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

    /// Format for display, following the currency's locale conventions.
    ///
    /// ```
    /// use rocketshoes_core::{CurrencyCode, Price};
    /// use rust_decimal::Decimal;
    ///
    /// let price = Price::new(Decimal::new(123_456, 2), CurrencyCode::BRL);
    /// assert_eq!(price.display(), "R$\u{a0}1.234,56");
    ///
    /// let price = Price::new(Decimal::new(123_456, 2), CurrencyCode::USD);
    /// assert_eq!(price.display(), "$1,234.56");
    /// ```
    #[must_use]
    pub fn display(&self) -> String {
        let (thousands, decimal) = self.currency_code.separators();
        let rounded = format!("{:.2}", self.amount.abs().round_dp(2));
        let (whole, cents) = rounded
            .split_once('.')
            .unwrap_or((rounded.as_str(), "00"));

        let sign = if self.amount.is_sign_negative() && !self.amount.is_zero() {
            "-"
        } else {
            ""
        };

        format!(
            "{sign}{}{}{decimal}{cents}",
            self.currency_code.symbol(),
            group_thousands(whole, thousands)
        )
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
}

impl CurrencyCode {
    /// Currency symbol as rendered in front of the amount.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            // pt-BR puts a non-breaking space between the symbol and the amount
            Self::BRL => "R$\u{a0}",
            Self::USD => "$",
        }
    }

    /// Thousands and decimal separators.
    const fn separators(self) -> (char, char) {
        match self {
            Self::BRL => ('.', ','),
            Self::USD => (',', '.'),
        }
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
