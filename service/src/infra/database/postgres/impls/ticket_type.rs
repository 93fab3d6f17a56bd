//! [`TicketType`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Lock, Select},
    Money,
};
use tracerr::Traced;

use crate::{
    domain::{event, ticket_type, zone, TicketType},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns selected for a [`TicketType`] row.
const COLUMNS: &str = "\
    id, event_id, zone_id, name, \
    price_amount, price_currency, stock, \
    sale_starts_at, sale_ends_at, active";

/// Maps a [`TicketType`] row.
fn from_row(row: &tokio_postgres::Row) -> TicketType {
    TicketType {
        id: row.get("id"),
        event_id: row.get("event_id"),
        zone_id: row.get("zone_id"),
        name: row.get("name"),
        price: Money {
            amount: row.get("price_amount"),
            currency: row.get("price_currency"),
        },
        stock: row.get("stock"),
        sale_starts_at: row.get("sale_starts_at"),
        sale_ends_at: row.get("sale_ends_at"),
        active: row.get("active"),
    }
}

impl<C> Database<Select<By<Option<TicketType>, ticket_type::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<TicketType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<TicketType>, ticket_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: ticket_type::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM ticket_types \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C> Database<Select<By<Vec<TicketType>, event::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<TicketType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<TicketType>, event::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: event::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM ticket_types \
             WHERE event_id = $1::UUID \
             ORDER BY name",
        );
        Ok(self
            .query(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<TicketType>, zone::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<TicketType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<TicketType>, zone::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: zone::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM ticket_types \
             WHERE zone_id = $1::UUID \
             ORDER BY name",
        );
        Ok(self
            .query(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<TicketType>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(ty): Insert<TicketType>,
    ) -> Result<Self::Ok, Self::Err> {
        let TicketType {
            id,
            event_id,
            zone_id,
            name,
            price,
            stock,
            sale_starts_at,
            sale_ends_at,
            active,
        } = ty;

        const SQL: &str = "\
            INSERT INTO ticket_types (\
                id, event_id, zone_id, name, \
                price_amount, price_currency, stock, \
                sale_starts_at, sale_ends_at, active\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::VARCHAR, \
                $5::NUMERIC, $6::INT2, $7::INT4, \
                $8::TIMESTAMPTZ, $9::TIMESTAMPTZ, $10::BOOLEAN\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &event_id,
                &zone_id,
                &name,
                &price.amount,
                &price.currency,
                &stock,
                &sale_starts_at,
                &sale_ends_at,
                &active,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<TicketType, ticket_type::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<TicketType, ticket_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: ticket_type::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO ticket_types_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
