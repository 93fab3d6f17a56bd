//! [`Event`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::venue;
#[cfg(doc)]
use crate::domain::{TicketType, Venue, Zone};

/// Sellable event of the catalog.
#[derive(Clone, Debug)]
pub struct Event {
    /// ID of this [`Event`].
    pub id: Id,

    /// [`Name`] of this [`Event`].
    pub name: Name,

    /// [`Description`] of this [`Event`].
    pub description: Option<Description>,

    /// ID of the [`Venue`] hosting this [`Event`], once assigned.
    pub venue_id: Option<venue::Id>,

    /// [`DateTime`] when this [`Event`] starts.
    pub starts_at: Option<StartDateTime>,

    /// [`Status`] of this [`Event`].
    pub status: Status,

    /// [`DateTime`] when this [`Event`] was created.
    pub created_at: CreationDateTime,
}

impl Event {
    /// Indicates whether structural mutations ([`Zone`]s, [`TicketType`]s)
    /// are allowed on this [`Event`].
    ///
    /// Only a [`Status::Draft`] [`Event`] accepts them.
    #[must_use]
    pub fn accepts_structural_changes(&self) -> bool {
        self.status == Status::Draft
    }
}

/// ID of an [`Event`].
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

define_kind! {
    #[doc = "Lifecycle status of an [`Event`]."]
    enum Status {
        #[doc = "Draft: the only state accepting structural edits."]
        Draft = 1,

        #[doc = "Published and on sale."]
        Published = 2,

        #[doc = "Cancelled by an administrator."]
        Cancelled = 3,
    }
}

/// Name of an [`Event`].
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

/// Description of an [`Event`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq)]
#[as_ref(str, String)]
#[from(&str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Description(String);

/// [`DateTime`] when an [`Event`] starts.
pub type StartDateTime = DateTimeOf<(Event, unit::Start)>;

/// [`DateTime`] when an [`Event`] was created.
pub type CreationDateTime = DateTimeOf<(Event, unit::Creation)>;
