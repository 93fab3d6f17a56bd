//! [`Ticket`] definitions.

use common::define_kind;
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{order, ticket_type, user};
#[cfg(doc)]
use crate::domain::{Order, TicketType};

/// One individually sellable unit of a [`TicketType`], eventually bound to
/// an attendee.
#[derive(Clone, Debug)]
pub struct Ticket {
    /// ID of this [`Ticket`].
    pub id: Id,

    /// ID of the [`TicketType`] this [`Ticket`] belongs to.
    pub ticket_type_id: ticket_type::Id,

    /// [`Status`] of this [`Ticket`].
    pub status: Status,

    /// ID of the [`Order`] item this [`Ticket`] is reserved for, if any.
    pub order_item_id: Option<order::item::Id>,

    /// [`Attendee`] this [`Ticket`] is assigned to, if any.
    pub attendee: Option<Attendee>,
}

/// ID of a [`Ticket`].
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
    #[doc = "Sale status of a [`Ticket`]."]
    enum Status {
        #[doc = "Available for sale."]
        Available = 1,

        #[doc = "Sold and bound to an attendee."]
        Sold = 2,
    }
}

/// Identity of the person attending with a [`Ticket`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attendee {
    /// Full name of the attendee.
    pub name: user::Name,

    /// Identity document of the attendee.
    pub document: user::Document,
}

/// Operation payload creating the initial stock of [`Status::Available`]
/// [`Ticket`]s for a freshly added [`TicketType`].
#[derive(Clone, Copy, Debug)]
pub struct CreateStock {
    /// ID of the [`TicketType`] to create [`Ticket`]s of.
    pub ticket_type_id: ticket_type::Id,

    /// Number of [`Ticket`]s to create.
    pub count: ticket_type::Stock,
}

/// Operation payload reserving [`Ticket`]s of one [`TicketType`] for an
/// [`Order`] item, one per [`Attendee`].
#[derive(Clone, Debug)]
pub struct Reserve {
    /// ID of the [`Order`] item the [`Ticket`]s are reserved for.
    pub item_id: order::item::Id,

    /// ID of the [`TicketType`] to reserve [`Ticket`]s of.
    pub ticket_type_id: ticket_type::Id,

    /// [`Attendee`]s to assign to the reserved [`Ticket`]s.
    pub attendees: Vec<Attendee>,
}

/// Operation payload flipping all [`Ticket`]s reserved for an [`Order`]
/// to [`Status::Sold`].
#[derive(Clone, Copy, Debug)]
pub struct SellForOrder(pub order::Id);

/// Operation payload releasing all [`Ticket`]s of an [`Order`] back to
/// [`Status::Available`], unbinding their [`Attendee`]s.
#[derive(Clone, Copy, Debug)]
pub struct ReleaseForOrder(pub order::Id);
