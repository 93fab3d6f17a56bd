//! [`Payment`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Select},
    Money,
};
use tracerr::Traced;

use crate::{
    domain::{
        order,
        payment::{self, receipt, Receipt},
        Payment,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Insert<payment::New>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Payment;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<payment::New>,
    ) -> Result<Self::Ok, Self::Err> {
        let payment::New {
            order_id,
            method,
            masked_card,
            amount,
            status,
            payer_id,
            paid_at,
        } = new;

        const SQL: &str = "\
            INSERT INTO payments (\
                order_id, method, masked_card, \
                amount, currency, status, payer_id, paid_at\
            ) \
            VALUES (\
                $1::INT8, $2::VARCHAR, $3::VARCHAR, \
                $4::NUMERIC, $5::INT2, $6::INT2, $7::UUID, $8::TIMESTAMPTZ\
            ) \
            RETURNING id";
        let row = self
            .query_opt(
                SQL,
                &[
                    &order_id,
                    &method,
                    &masked_card,
                    &amount.amount,
                    &amount.currency,
                    &status,
                    &payer_id,
                    &paid_at,
                ],
            )
            .await
            .map_err(tracerr::wrap!())?
            .expect("`RETURNING` always yields a row");

        Ok(Payment {
            id: row.get("id"),
            order_id,
            method,
            masked_card,
            amount,
            status,
            payer_id,
            paid_at,
        })
    }
}

impl<C> Database<Insert<Receipt>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(receipt): Insert<Receipt>,
    ) -> Result<Self::Ok, Self::Err> {
        let Receipt {
            id,
            payment_id,
            serial,
            total,
            emitted_at,
        } = receipt;

        const SQL: &str = "\
            INSERT INTO receipts (\
                id, payment_id, serial, \
                total_amount, total_currency, emitted_at\
            ) \
            VALUES (\
                $1::UUID, $2::INT8, $3::VARCHAR, \
                $4::NUMERIC, $5::INT2, $6::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &payment_id,
                &serial,
                &total.amount,
                &total.currency,
                &emitted_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Insert<receipt::Boleta>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(boleta): Insert<receipt::Boleta>,
    ) -> Result<Self::Ok, Self::Err> {
        let receipt::Boleta {
            id,
            receipt_id,
            ticket_id,
            holder_name,
            holder_document,
            price,
        } = boleta;

        const SQL: &str = "\
            INSERT INTO boletas (\
                id, receipt_id, ticket_id, \
                holder_name, holder_document, \
                price_amount, price_currency\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, \
                $4::VARCHAR, $5::VARCHAR, \
                $6::NUMERIC, $7::INT2\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &receipt_id,
                &ticket_id,
                &holder_name,
                &holder_document,
                &price.amount,
                &price.currency,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Option<Receipt>, order::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Receipt>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Receipt>, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: order::Id = by.into_inner();

        const SQL: &str = "\
            SELECT r.id, r.payment_id, r.serial, \
                   r.total_amount, r.total_currency, r.emitted_at \
            FROM receipts AS r \
            JOIN payments AS p ON p.id = r.payment_id \
            WHERE p.order_id = $1::INT8 \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Receipt {
                id: row.get("id"),
                payment_id: row.get("payment_id"),
                serial: row.get("serial"),
                total: Money {
                    amount: row.get("total_amount"),
                    currency: row.get("total_currency"),
                },
                emitted_at: row.get("emitted_at"),
            }))
    }
}
