//! [`Event`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{event, Event},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Event>, event::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Event>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Event>, event::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: event::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, description, \
                   venue_id, starts_at, status, created_at \
            FROM events \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Event {
                id: row.get("id"),
                name: row.get("name"),
                description: row.get("description"),
                venue_id: row.get("venue_id"),
                starts_at: row.get("starts_at"),
                status: row.get("status"),
                created_at: row.get("created_at"),
            }))
    }
}
