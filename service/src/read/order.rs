//! [`Order`]-related read definitions.
//!
//! [`Order`]: crate::domain::Order

use crate::domain::{event, ticket, venue};
#[cfg(doc)]
use crate::domain::{Event, Order, Ticket, Venue};

/// Confirmation summary of an [`Order`]: the [`Event`] details and the
/// [`Ticket`] attendees, as printed on a receipt.
#[derive(Clone, Debug)]
pub struct Summary {
    /// Name of the purchased [`Event`].
    pub event_name: event::Name,

    /// Name of the [`Venue`] hosting the [`Event`], if assigned.
    pub venue_name: Option<venue::Name>,

    /// Moment the [`Event`] starts at, if scheduled.
    pub starts_at: Option<event::StartDateTime>,

    /// [`Ticket`] attendees of the [`Order`].
    pub attendees: Vec<ticket::Attendee>,
}
