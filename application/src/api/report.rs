//! Sales reporting endpoint.

use axum::{extract::Query, Json};
use common::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service::{
    domain::{event, user},
    query, Query as _,
};

use crate::{api::Validator, AsError, Context, Error};

/// Query parameters of the sales report endpoint.
#[derive(Debug, Deserialize)]
pub struct SalesParams {
    /// [RFC 3339] start of the reported period.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub desde: String,

    /// [RFC 3339] end of the reported period.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub hasta: String,
}

/// Response body of the sales report endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesResponse {
    /// Total count of confirmed orders in the period.
    pub total_ordenes: i64,

    /// Total revenue in the period, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingresos_totales: Option<Decimal>,

    /// Currency of the total revenue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moneda: Option<String>,

    /// Per-event rows, ordered by revenue.
    pub filas: Vec<SalesRow>,
}

/// Per-event row of the sales report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRow {
    /// ID of the aggregated event.
    pub id_evento: event::Id,

    /// Name of the event.
    pub evento: String,

    /// Number of confirmed orders for the event in the period.
    pub ordenes: i64,

    /// Revenue the event generated in the period.
    pub ingresos: Decimal,

    /// Currency of the revenue.
    pub moneda: String,
}

impl From<query::report::sales::Output> for SalesResponse {
    fn from(out: query::report::sales::Output) -> Self {
        Self {
            total_ordenes: out.total_orders,
            ingresos_totales: out.total_revenue.map(|m| m.amount),
            moneda: out.total_revenue.map(|m| m.currency.to_string()),
            filas: out
                .rows
                .into_iter()
                .map(|r| SalesRow {
                    id_evento: r.event_id,
                    evento: r.event_name.to_string(),
                    ordenes: r.orders,
                    ingresos: r.revenue.amount,
                    moneda: r.revenue.currency.to_string(),
                })
                .collect(),
        }
    }
}

/// `GET /api/v1/reportes/ventas`
///
/// Builds a sales report for the requested period.
pub async fn sales(
    ctx: Context,
    Query(params): Query<SalesParams>,
) -> Result<Json<SalesResponse>, Error> {
    _ = ctx.require_role(user::Role::Administrator).await?;

    let SalesParams { desde, hasta } = params;

    let mut v = Validator::default();
    let start = DateTime::from_rfc3339(&desde);
    v.expect("desde", start.is_ok(), "must be an RFC 3339 timestamp");
    let end = DateTime::from_rfc3339(&hasta);
    v.expect("hasta", end.is_ok(), "must be an RFC 3339 timestamp");
    if let (Ok(start), Ok(end)) = (&start, &end) {
        v.expect("hasta", start <= end, "must not precede `desde`");
    }
    v.finish()?;
    let (Ok(start), Ok(end)) = (start, end) else {
        // `Validator::finish()` errors on any parsing failure.
        return Err(Error::internal(&"unvalidated field"));
    };

    ctx.service()
        .execute(query::report::Sales { start, end })
        .await
        .map(|out| Json(out.into()))
        .map_err(AsError::into_error)
}
