//! [`Command`] for deleting a [`Zone`].

use common::operations::{
    By, Commit, Delete, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{zone, TicketType, Zone},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Zone`].
///
/// A [`Zone`] with [`TicketType`]s selling its seats cannot be deleted.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteZone {
    /// ID of the [`Zone`] to delete.
    pub zone_id: zone::Id,
}

impl<Db> Command<DeleteZone> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Zone>, zone::Id>>,
            Ok = Option<Zone>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<TicketType>, zone::Id>>,
            Ok = Vec<TicketType>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Zone, zone::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteZone) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteZone { zone_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        drop(
            tx.execute(Select(By::<Option<Zone>, _>::new(zone_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::ZoneNotExists(zone_id))
                .map_err(tracerr::wrap!())?,
        );

        let types = tx
            .execute(Select(By::<Vec<TicketType>, _>::new(zone_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !types.is_empty() {
            return Err(tracerr::new!(E::ZoneInUse(zone_id)));
        }

        tx.execute(Delete(By::new(zone_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(())
    }
}

/// Error of [`DeleteZone`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Zone`] still has [`TicketType`]s selling its seats.
    #[display("`Zone(id: {_0})` still has ticket types")]
    #[from(ignore)]
    ZoneInUse(#[error(not(source))] zone::Id),

    /// [`Zone`] with the provided ID does not exist.
    #[display("`Zone(id: {_0})` does not exist")]
    #[from(ignore)]
    ZoneNotExists(#[error(not(source))] zone::Id),
}
