//! [`Zone`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{event, venue, zone, Zone},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Option<Zone>, zone::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Zone>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Zone>, zone::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: zone::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, venue_id, name, max_capacity \
            FROM zones \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Zone {
                id: row.get("id"),
                venue_id: row.get("venue_id"),
                name: row.get("name"),
                max_capacity: row.get("max_capacity"),
            }))
    }
}

impl<C> Database<Select<By<Vec<Zone>, event::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Zone>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Zone>, event::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: event::Id = by.into_inner();

        const SQL: &str = "\
            SELECT z.id, z.venue_id, z.name, z.max_capacity \
            FROM zones AS z \
            JOIN events AS e ON e.venue_id = z.venue_id \
            WHERE e.id = $1::UUID \
            ORDER BY z.name";
        Ok(self
            .query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Zone {
                id: row.get("id"),
                venue_id: row.get("venue_id"),
                name: row.get("name"),
                max_capacity: row.get("max_capacity"),
            })
            .collect())
    }
}

impl<C> Database<Select<By<read::zone::CapacitySum, venue::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::zone::CapacitySum;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::zone::CapacitySum, venue::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: venue::Id = by.into_inner();

        const SQL: &str = "\
            SELECT COALESCE(SUM(max_capacity), 0)::INT8 AS total \
            FROM zones \
            WHERE venue_id = $1::UUID";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.expect("always exists").get::<_, i64>("total").into()
            })
    }
}

impl<C> Database<Insert<Zone>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(zone): Insert<Zone>,
    ) -> Result<Self::Ok, Self::Err> {
        let Zone {
            id,
            venue_id,
            name,
            max_capacity,
        } = zone;

        const SQL: &str = "\
            INSERT INTO zones (id, venue_id, name, max_capacity) \
            VALUES ($1::UUID, $2::UUID, $3::VARCHAR, $4::INT4)";
        self.exec(SQL, &[&id, &venue_id, &name, &max_capacity])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Zone, zone::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Zone, zone::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: zone::Id = by.into_inner();

        const SQL: &str = "DELETE FROM zones WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
