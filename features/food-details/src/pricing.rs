//! Price display formatting.

use crate::error::ConfigError;
use crate::types::Money;

/// Turns an amount into the string the screen displays
///
/// Implementations are pure: the same amount always renders the same way.
pub trait PriceFormatter: Send + Sync {
    /// Formats an amount for display
    fn format(&self, amount: Money) -> String;
}

/// Fixed two-decimal currency rendering
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// Prefix, followed by a space when not empty
    pub symbol: &'static str,
    /// Separates units from cents
    pub decimal_separator: char,
    /// Groups thousands, `None` for no grouping
    pub thousands_separator: Option<char>,
}

impl CurrencyFormat {
    /// `1,234.50`
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            symbol: "",
            decimal_separator: '.',
            thousands_separator: Some(','),
        }
    }

    /// Brazilian real: `R$ 1.234,50`
    #[must_use]
    pub const fn brl() -> Self {
        Self {
            symbol: "R$",
            decimal_separator: ',',
            thousands_separator: Some('.'),
        }
    }

    /// Looks a format up by its configuration name (`brl` or `plain`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for any other name.
    pub fn from_code(code: &str) -> Result<Self, ConfigError> {
        match code.trim().to_ascii_lowercase().as_str() {
            "brl" => Ok(Self::brl()),
            "plain" => Ok(Self::plain()),
            _ => Err(ConfigError::Invalid {
                var: "FOOD_CURRENCY",
                value: code.to_string(),
                reason: "expected `brl` or `plain`",
            }),
        }
    }

    fn group(&self, units: u64) -> String {
        let digits = units.to_string();
        let Some(separator) = self.thousands_separator else {
            return digits;
        };

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(separator);
            }
            grouped.push(digit);
        }
        grouped
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::brl()
    }
}

impl PriceFormatter for CurrencyFormat {
    fn format(&self, amount: Money) -> String {
        let cents = amount.cents().unsigned_abs();
        let sign = if amount.cents() < 0 { "-" } else { "" };
        let number = format!(
            "{}{}{:02}",
            self.group(cents / 100),
            self.decimal_separator,
            cents % 100
        );

        if self.symbol.is_empty() {
            format!("{sign}{number}")
        } else {
            format!("{sign}{} {number}", self.symbol)
        }
    }
}
