//! [`Command`] for adding a [`TicketType`] to an [`Event`].

use common::{
    operations::{By, Commit, Insert, Perform, Select, Transact, Transacted},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{event, ticket, ticket_type, venue, zone, Event, TicketType, Zone},
    infra::{database, Database},
    Service,
};
#[cfg(doc)]
use crate::domain::Ticket;

use super::Command;

/// [`Command`] for adding a [`TicketType`] to an [`Event`].
///
/// Creates the [`TicketType`] together with its full stock of
/// [`Ticket`]s, all of them available for sale.
#[derive(Clone, Debug)]
pub struct AddTicketTypeToEvent {
    /// ID of the [`Event`] to add a [`TicketType`] to.
    pub event_id: event::Id,

    /// ID of the [`Zone`] the [`TicketType`] sells seats of.
    pub zone_id: zone::Id,

    /// Name of the new [`TicketType`].
    pub name: ticket_type::Name,

    /// Price of one [`Ticket`] of the new [`TicketType`].
    pub price: Money,

    /// Stock of the new [`TicketType`].
    pub stock: ticket_type::Stock,

    /// Moment the sale of the new [`TicketType`] opens.
    pub sale_starts_at: ticket_type::SaleStartDateTime,

    /// Moment the sale of the new [`TicketType`] closes.
    pub sale_ends_at: ticket_type::SaleEndDateTime,
}

impl<Db> Command<AddTicketTypeToEvent> for Service<Db>
where
    Db: Database<
            Select<By<Option<Event>, event::Id>>,
            Ok = Option<Event>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Zone>, zone::Id>>,
            Ok = Option<Zone>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Insert<TicketType>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Perform<ticket::CreateStock>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = TicketType;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AddTicketTypeToEvent,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddTicketTypeToEvent {
            event_id,
            zone_id,
            name,
            price,
            stock,
            sale_starts_at,
            sale_ends_at,
        } = cmd;

        if sale_ends_at.coerce::<()>() < sale_starts_at.coerce::<()>() {
            return Err(tracerr::new!(E::SaleWindowInverted));
        }

        let event = self
            .database()
            .execute(Select(By::<Option<Event>, _>::new(event_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::EventNotExists(event_id))
            .map_err(tracerr::wrap!())?;
        if !event.accepts_structural_changes() {
            return Err(tracerr::new!(E::EventNotDraft(event_id)));
        }

        let zone = self
            .database()
            .execute(Select(By::<Option<Zone>, _>::new(zone_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|z| Some(z.venue_id) == event.venue_id)
            .ok_or(E::ZoneNotExists(zone_id))
            .map_err(tracerr::wrap!())?;
        if stock.get() > zone.max_capacity.get() {
            return Err(tracerr::new!(E::StockExceedsZoneCapacity {
                stock,
                max_capacity: zone.max_capacity,
            }));
        }

        let ty = TicketType {
            id: ticket_type::Id::new(),
            event_id,
            zone_id,
            name,
            price,
            stock,
            sale_starts_at,
            sale_ends_at,
            active: true,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(ty.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Perform(ticket::CreateStock {
            ticket_type_id: ty.id,
            count: stock,
        }))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(ty)
    }
}

/// Error of [`AddTicketTypeToEvent`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Event`] is not a draft anymore.
    #[display("`Event(id: {_0})` is not a draft")]
    #[from(ignore)]
    EventNotDraft(#[error(not(source))] event::Id),

    /// [`Event`] with the provided ID does not exist.
    #[display("`Event(id: {_0})` does not exist")]
    #[from(ignore)]
    EventNotExists(#[error(not(source))] event::Id),

    /// Sale window closes before it opens.
    #[display("Sale window closes before it opens")]
    SaleWindowInverted,

    /// Stock is above the [`Zone`] maximum capacity.
    #[display("Stock of {stock} exceeds the zone capacity of {max_capacity}")]
    StockExceedsZoneCapacity {
        /// Requested stock.
        stock: ticket_type::Stock,

        /// Maximum capacity of the [`Zone`].
        max_capacity: venue::Capacity,
    },

    /// [`Zone`] with the provided ID does not exist on the [`Event`]'s
    /// venue.
    #[display("`Zone(id: {_0})` does not exist")]
    #[from(ignore)]
    ZoneNotExists(#[error(not(source))] zone::Id),
}
