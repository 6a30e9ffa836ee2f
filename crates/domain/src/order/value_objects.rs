//! Value objects for the order domain.

use serde::{Deserialize, Serialize};

/// Money amount represented in cents to avoid floating point issues.
///
/// On the wire the amount is a decimal number (`150.00`); it is rounded to
/// the nearest cent when parsed. Amounts whose cent value exceeds
/// [`Money::MAX_WIRE_CENTS`] are rejected rather than rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money {
    /// Amount in cents (e.g., 15000 = 150.00)
    cents: i64,
}

impl Money {
    /// Largest cent value an `f64` amount can carry exactly (2^53).
    pub const MAX_WIRE_CENTS: i64 = 1 << 53;

    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates a new Money amount from whole currency units.
    pub fn from_units(units: i64) -> Self {
        Self { cents: units * 100 }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the whole-unit portion.
    pub fn units(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents portion (remainder after units).
    pub fn cents_part(&self) -> i64 {
        self.cents.abs() % 100
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }

}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents + rhs.cents,
        }
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl TryFrom<f64> for Money {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(format!("amount must be a finite number, got {value}"));
        }
        let cents = (value * 100.0).round();
        if cents.abs() > Money::MAX_WIRE_CENTS as f64 {
            return Err(format!("amount {value} is out of range"));
        }
        Ok(Money {
            cents: cents as i64,
        })
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.cents as f64 / 100.0
    }
}

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    CreditCard,
    Visa,
    MasterCard,
    Paypal,
    Bitcoin,
}

impl PaymentMethod {
    /// Returns the canonical upper-case name, as stored and sent downstream.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::Visa => "VISA",
            PaymentMethod::MasterCard => "MASTER_CARD",
            PaymentMethod::Paypal => "PAYPAL",
            PaymentMethod::Bitcoin => "BITCOIN",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unrecognised payment method name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl std::str::FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CARD" => Ok(PaymentMethod::Card),
            "CREDIT_CARD" => Ok(PaymentMethod::CreditCard),
            "VISA" => Ok(PaymentMethod::Visa),
            "MASTER_CARD" => Ok(PaymentMethod::MasterCard),
            "PAYPAL" => Ok(PaymentMethod::Paypal),
            "BITCOIN" => Ok(PaymentMethod::Bitcoin),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}
