//! [`Command`] for adding a [`Zone`] to an [`Event`]'s venue.

use common::operations::{
    By, Commit, Insert, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{event, venue, zone, Event, Venue, Zone},
    infra::{database, Database},
    read,
    Service,
};

use super::Command;

/// [`Command`] for adding a [`Zone`] to an [`Event`]'s venue.
///
/// Only allowed while the [`Event`] is a draft, and only while the venue
/// capacity admits the new [`Zone`].
#[derive(Clone, Debug)]
pub struct AddZoneToEvent {
    /// ID of the [`Event`] to add a [`Zone`] to.
    pub event_id: event::Id,

    /// Name of the new [`Zone`].
    pub name: zone::Name,

    /// Maximum capacity of the new [`Zone`].
    pub max_capacity: venue::Capacity,
}

impl<Db> Command<AddZoneToEvent> for Service<Db>
where
    Db: Database<
            Select<By<Option<Event>, event::Id>>,
            Ok = Option<Event>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Venue>, venue::Id>>,
            Ok = Option<Venue>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Venue, venue::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::zone::CapacitySum, venue::Id>>,
            Ok = read::zone::CapacitySum,
            Err = Traced<database::Error>,
        > + Database<Insert<Zone>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Zone;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AddZoneToEvent,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddZoneToEvent {
            event_id,
            name,
            max_capacity,
        } = cmd;

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
        let venue_id = event
            .venue_id
            .ok_or(E::EventHasNoVenue(event_id))
            .map_err(tracerr::wrap!())?;

        let venue = self
            .database()
            .execute(Select(By::<Option<Venue>, _>::new(venue_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::VenueNotExists(venue_id))
            .map_err(tracerr::wrap!())?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Serialize capacity checks upon the same `Venue`.
        tx.execute(Lock(By::new(venue_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let sum = tx
            .execute(Select(By::<read::zone::CapacitySum, _>::new(venue_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !sum.admits(max_capacity, venue.total_capacity) {
            let overage = i64::from(sum) + i64::from(max_capacity.get())
                - i64::from(venue.total_capacity.get());
            return Err(tracerr::new!(E::VenueCapacityExceeded { overage }));
        }

        let zone = Zone {
            id: zone::Id::new(),
            venue_id,
            name,
            max_capacity,
        };
        tx.execute(Insert(zone.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(zone)
    }
}

/// Error of [`AddZoneToEvent`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Event`] has no venue assigned yet.
    #[display("`Event(id: {_0})` has no venue assigned")]
    #[from(ignore)]
    EventHasNoVenue(#[error(not(source))] event::Id),

    /// [`Event`] is not a draft anymore.
    #[display("`Event(id: {_0})` is not a draft")]
    #[from(ignore)]
    EventNotDraft(#[error(not(source))] event::Id),

    /// [`Event`] with the provided ID does not exist.
    #[display("`Event(id: {_0})` does not exist")]
    #[from(ignore)]
    EventNotExists(#[error(not(source))] event::Id),

    /// New [`Zone`] would exceed the [`Venue`] total capacity.
    #[display("`Zone` capacities would exceed the venue total by {overage}")]
    VenueCapacityExceeded {
        /// Number of seats above the [`Venue`] total capacity.
        overage: i64,
    },

    /// [`Venue`] with the provided ID does not exist.
    #[display("`Venue(id: {_0})` does not exist")]
    #[from(ignore)]
    VenueNotExists(#[error(not(source))] venue::Id),
}
