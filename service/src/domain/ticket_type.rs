//! [`TicketType`] definitions.

use common::{unit, DateTime, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{event, zone};
#[cfg(doc)]
use crate::domain::{Event, Ticket, Zone};

/// Priced, time-windowed category of [`Ticket`]s for an [`Event`]
/// (e.g. "VIP").
#[derive(Clone, Debug)]
pub struct TicketType {
    /// ID of this [`TicketType`].
    pub id: Id,

    /// ID of the [`Event`] this [`TicketType`] belongs to.
    pub event_id: event::Id,

    /// ID of the [`Zone`] this [`TicketType`] sells seats of.
    pub zone_id: zone::Id,

    /// [`Name`] of this [`TicketType`].
    pub name: Name,

    /// Price of one [`Ticket`] of this [`TicketType`].
    pub price: Money,

    /// Total number of [`Ticket`]s this [`TicketType`] was created with.
    pub stock: Stock,

    /// [`DateTime`] when the sale of this [`TicketType`] opens.
    pub sale_starts_at: SaleStartDateTime,

    /// [`DateTime`] when the sale of this [`TicketType`] closes.
    pub sale_ends_at: SaleEndDateTime,

    /// Indicates whether this [`TicketType`] is on sale.
    pub active: bool,
}

impl TicketType {
    /// Indicates whether the sale window of this [`TicketType`] is open at
    /// the provided `now` moment.
    #[must_use]
    pub fn is_on_sale(&self, now: DateTime) -> bool {
        self.active
            && self.sale_starts_at.coerce() <= now
            && now <= self.sale_ends_at.coerce()
    }
}

/// ID of a [`TicketType`].
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

/// Name of a [`TicketType`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 128
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Number of [`Ticket`]s a [`TicketType`] is created with.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Stock(i32);

impl Stock {
    /// Creates a new [`Stock`] if the given `value` is positive.
    #[must_use]
    pub fn new(value: i32) -> Option<Self> {
        (value >= 1).then_some(Self(value))
    }

    /// Returns this [`Stock`] as an [`i32`].
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// [`DateTime`] when the sale of a [`TicketType`] opens.
pub type SaleStartDateTime = DateTimeOf<(TicketType, unit::SaleStart)>;

/// [`DateTime`] when the sale of a [`TicketType`] closes.
pub type SaleEndDateTime = DateTimeOf<(TicketType, unit::SaleEnd)>;

#[cfg(test)]
mod spec {
    use common::{DateTime, Money};
    use rust_decimal::Decimal;

    use crate::domain::{event, zone};

    use super::{Id, Stock, TicketType};

    fn vip(starts_at: DateTime, ends_at: DateTime, active: bool) -> TicketType {
        TicketType {
            id: Id::new(),
            event_id: event::Id::new(),
            zone_id: zone::Id::new(),
            name: "VIP".parse().unwrap(),
            price: Money::soles(Decimal::new(25_000, 2)),
            stock: Stock::new(100).unwrap(),
            sale_starts_at: starts_at.coerce(),
            sale_ends_at: ends_at.coerce(),
            active,
        }
    }

    #[test]
    fn on_sale_within_window_only() {
        let start = DateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let end = DateTime::from_unix_timestamp(1_700_003_600).unwrap();
        let ty = vip(start, end, true);

        let within = DateTime::from_unix_timestamp(1_700_001_800).unwrap();
        assert!(ty.is_on_sale(within));
        assert!(ty.is_on_sale(start));
        assert!(ty.is_on_sale(end));

        let before = DateTime::from_unix_timestamp(1_699_999_999).unwrap();
        assert!(!ty.is_on_sale(before));
        let after = DateTime::from_unix_timestamp(1_700_003_601).unwrap();
        assert!(!ty.is_on_sale(after));
    }

    #[test]
    fn inactive_is_never_on_sale() {
        let start = DateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let end = DateTime::from_unix_timestamp(1_700_003_600).unwrap();
        let ty = vip(start, end, false);

        let within = DateTime::from_unix_timestamp(1_700_001_800).unwrap();
        assert!(!ty.is_on_sale(within));
    }

    #[test]
    fn stock_is_positive() {
        assert!(Stock::new(1).is_some());
        assert!(Stock::new(0).is_none());
        assert!(Stock::new(-5).is_none());
    }
}
