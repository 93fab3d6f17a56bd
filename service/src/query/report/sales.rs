//! [`Sales`] definition.

use std::ops::RangeInclusive;

use common::{
    operations::{By, Select},
    DateTime, Money,
};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Event, Order};
use crate::{
    domain::{event, order},
    infra::{database, Database},
    Query, Service,
};

/// [`Query`] to build a sales report for a given period.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Sales {
    /// Start of the period.
    pub start: DateTime,

    /// End of the period.
    pub end: DateTime,
}

/// Output of the [`Sales`] [`Query`].
#[derive(Clone, Debug, PartialEq)]
pub struct Output {
    /// Total count of confirmed [`Order`]s in the period.
    pub total_orders: i64,

    /// Total revenue in the period, when any.
    pub total_revenue: Option<Money>,

    /// Rows of the report.
    pub rows: Vec<Row>,
}

/// Row in the [`Output`] of the [`Sales`] [`Query`].
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    /// ID of the [`Event`] the row aggregates.
    pub event_id: event::Id,

    /// Name of the [`Event`].
    pub event_name: event::Name,

    /// Number of confirmed [`Order`]s for the [`Event`] in the period.
    pub orders: i64,

    /// Revenue the [`Event`] generated in the period.
    pub revenue: Money,
}

impl<Db> Query<Sales> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Row>, RangeInclusive<order::CreationDateTime>>>,
        Ok = Vec<Row>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Sales { start, end }: Sales,
    ) -> Result<Self::Ok, Self::Err> {
        let range = RangeInclusive::new(start.coerce(), end.coerce());

        let rows = self
            .database()
            .execute(Select(By::<Vec<Row>, _>::new(range)))
            .await
            .map_err(tracerr::wrap!())?;

        let total_orders = rows.iter().map(|r| r.orders).sum();
        let total_revenue =
            rows.iter().fold(None, |acc: Option<Money>, r| match acc {
                Some(t) if t.currency == r.revenue.currency => Some(Money {
                    amount: t.amount + r.revenue.amount,
                    currency: t.currency,
                }),
                Some(t) => Some(t),
                None => Some(r.revenue),
            });

        Ok(Output {
            total_orders,
            total_revenue,
            rows,
        })
    }
}
