//! Reporting-related [`Database`] implementations.

use std::ops::RangeInclusive;

use common::{
    operations::{By, Select},
    Money,
};
use tracerr::Traced;

use crate::{
    domain::order,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    query::report::sales,
};

impl<C>
    Database<
        Select<By<Vec<sales::Row>, RangeInclusive<order::CreationDateTime>>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<sales::Row>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<sales::Row>, RangeInclusive<order::CreationDateTime>>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let range: RangeInclusive<order::CreationDateTime> = by.into_inner();
        let (start, end) = range.into_inner();

        // Confirmed orders only.
        const SQL: &str = "\
            SELECT e.id AS event_id, \
                   e.name AS event_name, \
                   COUNT(o.id) AS orders, \
                   SUM(o.total_amount) AS revenue_amount, \
                   MIN(o.total_currency) AS revenue_currency \
            FROM orders AS o \
            JOIN events AS e ON e.id = o.event_id \
            WHERE o.status = 3::INT2 \
                  AND o.created_at >= $1::TIMESTAMPTZ \
                  AND o.created_at <= $2::TIMESTAMPTZ \
            GROUP BY e.id, e.name \
            ORDER BY revenue_amount DESC";
        Ok(self
            .query(SQL, &[&start, &end])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| sales::Row {
                event_id: row.get("event_id"),
                event_name: row.get("event_name"),
                orders: row.get("orders"),
                revenue: Money {
                    amount: row.get("revenue_amount"),
                    currency: row.get("revenue_currency"),
                },
            })
            .collect())
    }
}
