//! [`Venue`]-related [`Database`] implementations.

use common::operations::{By, Lock, Select};
use tracerr::Traced;

use crate::{
    domain::{venue, Venue},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Venue>, venue::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Venue>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Venue>, venue::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: venue::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, address, district_id, total_capacity \
            FROM venues \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Venue {
                id: row.get("id"),
                name: row.get("name"),
                address: row.get("address"),
                district_id: row.get("district_id"),
                total_capacity: row.get("total_capacity"),
            }))
    }
}

impl<C> Database<Lock<By<Venue, venue::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Venue, venue::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: venue::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO venues_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
