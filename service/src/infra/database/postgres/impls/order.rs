//! [`Order`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Lock, Perform, Select, Update},
    Money,
};
use tracerr::Traced;

use crate::{
    domain::{order, ticket, user, Order},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Option<Order>, order::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Order>, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: order::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, customer_id, event_id, status, \
                   total_amount, total_currency, promo_code_id, \
                   created_at, expires_at \
            FROM orders \
            WHERE id = $1::INT8 \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Order {
                id: row.get("id"),
                customer_id: row.get("customer_id"),
                event_id: row.get("event_id"),
                status: row.get("status"),
                total: Money {
                    amount: row.get("total_amount"),
                    currency: row.get("total_currency"),
                },
                promo_code_id: row.get("promo_code_id"),
                created_at: row.get("created_at"),
                expires_at: row.get("expires_at"),
            }))
    }
}

impl<C> Database<Insert<order::New>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Order;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<order::New>,
    ) -> Result<Self::Ok, Self::Err> {
        let order::New {
            customer_id,
            event_id,
            status,
            total,
            promo_code_id,
            created_at,
            expires_at,
        } = new;

        const SQL: &str = "\
            INSERT INTO orders (\
                customer_id, event_id, status, \
                total_amount, total_currency, promo_code_id, \
                created_at, expires_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::INT2, \
                $4::NUMERIC, $5::INT2, $6::UUID, \
                $7::TIMESTAMPTZ, $8::TIMESTAMPTZ\
            ) \
            RETURNING id";
        let row = self
            .query_opt(
                SQL,
                &[
                    &customer_id,
                    &event_id,
                    &status,
                    &total.amount,
                    &total.currency,
                    &promo_code_id,
                    &created_at,
                    &expires_at,
                ],
            )
            .await
            .map_err(tracerr::wrap!())?
            .expect("`RETURNING` always yields a row");

        Ok(Order {
            id: row.get("id"),
            customer_id,
            event_id,
            status,
            total,
            promo_code_id,
            created_at,
            expires_at,
        })
    }
}

impl<C> Database<Update<Order>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(order): Update<Order>,
    ) -> Result<Self::Ok, Self::Err> {
        let Order {
            id,
            customer_id: _,
            event_id: _,
            status,
            total,
            promo_code_id,
            created_at: _,
            expires_at,
        } = order;

        const SQL: &str = "\
            UPDATE orders \
            SET status = $2::INT2, \
                total_amount = $3::NUMERIC, \
                total_currency = $4::INT2, \
                promo_code_id = $5::UUID, \
                expires_at = $6::TIMESTAMPTZ \
            WHERE id = $1::INT8";
        self.exec(
            SQL,
            &[
                &id,
                &status,
                &total.amount,
                &total.currency,
                &promo_code_id,
                &expires_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Order, order::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Order, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: order::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO orders_lock \
            VALUES ($1::INT8) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Insert<order::Item>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(item): Insert<order::Item>,
    ) -> Result<Self::Ok, Self::Err> {
        let order::Item {
            id,
            order_id,
            ticket_type_id,
            quantity,
            unit_price,
        } = item;

        const SQL: &str = "\
            INSERT INTO order_items (\
                id, order_id, ticket_type_id, quantity, \
                unit_price_amount, unit_price_currency\
            ) \
            VALUES (\
                $1::UUID, $2::INT8, $3::UUID, $4::INT4, \
                $5::NUMERIC, $6::INT2\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &order_id,
                &ticket_type_id,
                &quantity,
                &unit_price.amount,
                &unit_price.currency,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Perform<order::ExpireBefore>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<order::Id>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Perform(op): Perform<order::ExpireBefore>,
    ) -> Result<Self::Ok, Self::Err> {
        let order::ExpireBefore(deadline) = op;

        // Flips stale pending orders and releases their tickets in one
        // statement, so a concurrent payment cannot observe a half-expired
        // order.
        const SQL: &str = "\
            WITH expired AS (\
                UPDATE orders \
                SET status = 5::INT2 \
                WHERE status = 2::INT2 \
                      AND expires_at IS NOT NULL \
                      AND expires_at < $1::TIMESTAMPTZ \
                RETURNING id\
            ), \
            released AS (\
                UPDATE tickets AS t \
                SET status = 1::INT2, \
                    order_item_id = NULL, \
                    attendee_name = NULL, \
                    attendee_document = NULL \
                FROM order_items AS oi, expired AS e \
                WHERE t.order_item_id = oi.id \
                      AND oi.order_id = e.id\
            ) \
            SELECT id FROM expired";
        Ok(self
            .query(SQL, &[&deadline])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| row.get("id"))
            .collect())
    }
}

impl<C> Database<Select<By<read::order::Summary, order::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::order::Summary;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::order::Summary, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: order::Id = by.into_inner();

        const SQL: &str = "\
            SELECT e.name AS event_name, \
                   v.name AS venue_name, \
                   e.starts_at \
            FROM orders AS o \
            JOIN events AS e ON e.id = o.event_id \
            LEFT JOIN venues AS v ON v.id = e.venue_id \
            WHERE o.id = $1::INT8 \
            LIMIT 1";
        let row = self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .expect("`Order` existence checked by the caller");

        const ATTENDEES_SQL: &str = "\
            SELECT t.attendee_name, t.attendee_document \
            FROM tickets AS t \
            JOIN order_items AS oi ON oi.id = t.order_item_id \
            WHERE oi.order_id = $1::INT8 \
                  AND t.attendee_name IS NOT NULL \
            ORDER BY t.id";
        let attendees = self
            .query(ATTENDEES_SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|r| ticket::Attendee {
                name: r.get::<_, user::Name>("attendee_name"),
                document: r.get::<_, user::Document>("attendee_document"),
            })
            .collect();

        Ok(read::order::Summary {
            event_name: row.get("event_name"),
            venue_name: row.get("venue_name"),
            starts_at: row.get("starts_at"),
            attendees,
        })
    }
}
