//! [`Ticket`]-related [`Database`] implementations.

use common::{
    operations::{By, Perform, Select},
    Money,
};
use tracerr::Traced;

use crate::{
    domain::{order, ticket, user, Ticket},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Perform<ticket::CreateStock>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Perform(op): Perform<ticket::CreateStock>,
    ) -> Result<Self::Ok, Self::Err> {
        let ticket::CreateStock {
            ticket_type_id,
            count,
        } = op;

        const SQL: &str = "\
            INSERT INTO tickets (id, ticket_type_id, status) \
            SELECT gen_random_uuid(), $1::UUID, 1::INT2 \
            FROM generate_series(1, $2::INT4)";
        self.exec(SQL, &[&ticket_type_id, &count])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Perform<ticket::Reserve>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<ticket::Id>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Perform(op): Perform<ticket::Reserve>,
    ) -> Result<Self::Ok, Self::Err> {
        let ticket::Reserve {
            item_id,
            ticket_type_id,
            attendees,
        } = op;

        let (names, documents): (Vec<user::Name>, Vec<user::Document>) =
            attendees
                .into_iter()
                .map(|a| (a.name, a.document))
                .unzip();
        let count = i32::try_from(names.len()).unwrap();

        const SQL: &str = "\
            WITH available AS (\
                SELECT id, ROW_NUMBER() OVER (ORDER BY id) AS rn \
                FROM tickets \
                WHERE ticket_type_id = $1::UUID \
                      AND status = 1::INT2 \
                      AND order_item_id IS NULL \
                ORDER BY id \
                LIMIT $2::INT4 \
                FOR UPDATE SKIP LOCKED\
            ), \
            assignment AS (\
                SELECT a.id, n.name, d.document \
                FROM available AS a \
                JOIN unnest($3::VARCHAR[]) \
                     WITH ORDINALITY AS n(name, rn) USING (rn) \
                JOIN unnest($4::VARCHAR[]) \
                     WITH ORDINALITY AS d(document, rn) USING (rn)\
            ) \
            UPDATE tickets AS t \
            SET order_item_id = $5::UUID, \
                attendee_name = assignment.name, \
                attendee_document = assignment.document \
            FROM assignment \
            WHERE t.id = assignment.id \
            RETURNING t.id";
        Ok(self
            .query(SQL, &[&ticket_type_id, &count, &names, &documents, &item_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| row.get("id"))
            .collect())
    }
}

impl<C> Database<Perform<ticket::SellForOrder>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Perform(op): Perform<ticket::SellForOrder>,
    ) -> Result<Self::Ok, Self::Err> {
        let ticket::SellForOrder(order_id) = op;

        const SQL: &str = "\
            UPDATE tickets AS t \
            SET status = 2::INT2 \
            FROM order_items AS oi \
            WHERE t.order_item_id = oi.id \
                  AND oi.order_id = $1::INT8";
        self.exec(SQL, &[&order_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Perform<ticket::ReleaseForOrder>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Perform(op): Perform<ticket::ReleaseForOrder>,
    ) -> Result<Self::Ok, Self::Err> {
        let ticket::ReleaseForOrder(order_id) = op;

        const SQL: &str = "\
            UPDATE tickets AS t \
            SET status = 1::INT2, \
                order_item_id = NULL, \
                attendee_name = NULL, \
                attendee_document = NULL \
            FROM order_items AS oi \
            WHERE t.order_item_id = oi.id \
                  AND oi.order_id = $1::INT8";
        self.exec(SQL, &[&order_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Vec<(Ticket, Money)>, order::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<(Ticket, Money)>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<(Ticket, Money)>, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: order::Id = by.into_inner();

        const SQL: &str = "\
            SELECT t.id, t.ticket_type_id, t.status, t.order_item_id, \
                   t.attendee_name, t.attendee_document, \
                   oi.unit_price_amount, oi.unit_price_currency \
            FROM tickets AS t \
            JOIN order_items AS oi ON oi.id = t.order_item_id \
            WHERE oi.order_id = $1::INT8 \
            ORDER BY t.id";
        Ok(self
            .query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let attendee = row
                    .get::<_, Option<user::Name>>("attendee_name")
                    .zip(row.get::<_, Option<user::Document>>(
                        "attendee_document",
                    ))
                    .map(|(name, document)| ticket::Attendee {
                        name,
                        document,
                    });
                (
                    Ticket {
                        id: row.get("id"),
                        ticket_type_id: row.get("ticket_type_id"),
                        status: row.get("status"),
                        order_item_id: row.get("order_item_id"),
                        attendee,
                    },
                    Money {
                        amount: row.get("unit_price_amount"),
                        currency: row.get("unit_price_currency"),
                    },
                )
            })
            .collect())
    }
}
