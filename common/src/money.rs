//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] amount in [Peruvian soles].
    ///
    /// [Peruvian soles]: Currency::Pen
    #[must_use]
    pub fn soles(amount: Decimal) -> Self {
        Self {
            amount,
            currency: Currency::Pen,
        }
    }

    /// Returns whole units of this [`Money`] amount, discarding the
    /// fractional part.
    ///
    /// [`None`] is returned if the amount doesn't fit into an [`i64`].
    #[must_use]
    pub fn whole_units(&self) -> Option<i64> {
        self.amount.trunc().to_i64()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if amount.is_integer() {
            write!(f, "{}{currency}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{amount}{currency}")
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "Peruvian Sol."]
        Pen = 1,

        #[doc = "US Dollar."]
        Usd = 2,
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("150.00PEN").unwrap(),
            Money {
                amount: decimal("150.00"),
                currency: Currency::Pen,
            },
        );

        assert_eq!(
            Money::from_str("123.45USD").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            },
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Pe").is_err());
        assert!(Money::from_str("123.45Soles").is_err());

        assert!(Money::from_str("123.00PEN").is_ok());
        assert!(Money::from_str("123.0PEN").is_ok());
        assert!(Money::from_str("123PEN").is_ok());
    }

    #[test]
    fn to_string() {
        assert_eq!(
            Money {
                amount: decimal("150.50"),
                currency: Currency::Pen,
            }
            .to_string(),
            "150.50PEN",
        );

        assert_eq!(
            Money {
                amount: decimal("123.00"),
                currency: Currency::Usd,
            }
            .to_string(),
            "123USD",
        );
    }

    #[test]
    fn whole_units() {
        assert_eq!(Money::soles(decimal("150.99")).whole_units(), Some(150));
        assert_eq!(Money::soles(decimal("0.99")).whole_units(), Some(0));
        assert_eq!(Money::soles(decimal("42")).whole_units(), Some(42));
    }
}
