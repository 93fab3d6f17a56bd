//! [`Item`] definitions.

use common::Money;
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{order, ticket_type};
#[cfg(doc)]
use crate::domain::{Order, Ticket, TicketType};

/// Line item of an [`Order`]: a quantity of one [`TicketType`].
///
/// The per-attendee assignments live on the reserved [`Ticket`]s
/// referencing this [`Item`].
#[derive(Clone, Debug)]
pub struct Item {
    /// ID of this [`Item`].
    pub id: Id,

    /// ID of the [`Order`] this [`Item`] belongs to.
    pub order_id: order::Id,

    /// ID of the purchased [`TicketType`].
    pub ticket_type_id: ticket_type::Id,

    /// Number of [`Ticket`]s purchased.
    pub quantity: Quantity,

    /// Price of one [`Ticket`] at the moment of purchase.
    pub unit_price: Money,
}

impl Item {
    /// Returns the subtotal of this [`Item`].
    #[must_use]
    pub fn subtotal(&self) -> Money {
        Money {
            amount: self.unit_price.amount
                * rust_decimal::Decimal::from(self.quantity.get()),
            currency: self.unit_price.currency,
        }
    }
}

/// ID of an [`Item`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Number of [`Ticket`]s an [`Item`] purchases.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Quantity(i32);

impl Quantity {
    /// Creates a new [`Quantity`] if the given `value` is positive.
    #[must_use]
    pub fn new(value: i32) -> Option<Self> {
        (value >= 1).then_some(Self(value))
    }

    /// Returns this [`Quantity`] as an [`i32`].
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;

    use crate::domain::{order, ticket_type};

    use super::{Id, Item, Quantity};

    #[test]
    fn subtotal_multiplies_unit_price() {
        let item = Item {
            id: Id::new(),
            order_id: order::Id::from(1),
            ticket_type_id: ticket_type::Id::new(),
            quantity: Quantity::new(3).unwrap(),
            unit_price: Money::soles(Decimal::new(5_000, 2)),
        };

        assert_eq!(item.subtotal(), Money::soles(Decimal::new(15_000, 2)));
    }
}
