//! [`Venue`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::geo;

/// Physical location hosting events, with a fixed total capacity.
#[derive(Clone, Debug)]
pub struct Venue {
    /// ID of this [`Venue`].
    pub id: Id,

    /// [`Name`] of this [`Venue`].
    pub name: Name,

    /// Street address of this [`Venue`].
    pub address: Address,

    /// District this [`Venue`] is located in.
    pub district_id: Option<geo::district::Id>,

    /// Total [`Capacity`] of this [`Venue`].
    ///
    /// The capacities of its zones must never sum above this value.
    pub total_capacity: Capacity,
}

/// ID of a [`Venue`].
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

/// Name of a [`Venue`].
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
        name.trim() == name && !name.is_empty() && name.len() <= 256
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Street address of a [`Venue`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        (!address.trim().is_empty() && address.len() <= 512)
            .then_some(Self(address))
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

/// Count of attendees a [`Venue`] or a [`Zone`] can hold.
///
/// [`Zone`]: crate::domain::Zone
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Capacity(i32);

impl Capacity {
    /// Creates a new [`Capacity`] if the given `value` is positive.
    #[must_use]
    pub fn new(value: i32) -> Option<Self> {
        (value >= 1).then_some(Self(value))
    }

    /// Returns this [`Capacity`] as an [`i32`].
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod spec {
    use super::Capacity;

    #[test]
    fn capacity_is_positive() {
        assert!(Capacity::new(1).is_some());
        assert!(Capacity::new(500).is_some());

        assert!(Capacity::new(0).is_none());
        assert!(Capacity::new(-10).is_none());
    }
}
