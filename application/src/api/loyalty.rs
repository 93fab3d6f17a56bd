//! Loyalty points endpoints.

use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{promo, user},
    query,
};

use crate::{define_error, AsError, Context, Error};

/// Response body of the balance endpoint.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Current loyalty points balance.
    pub puntos: i64,
}

/// Request body of the redemption endpoint.
#[derive(Debug, Deserialize)]
pub struct RedeemRequest {
    /// Point cost to redeem.
    pub puntos: i64,
}

/// Wire representation of a minted [`promo::PromoCode`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCodeResponse {
    /// Code to type in at checkout.
    pub codigo: String,

    /// Discount the code grants, in percent.
    pub descuento: Decimal,

    /// [RFC 3339] timestamp the code stops being applicable at.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub valido_hasta: String,
}

impl From<promo::PromoCode> for PromoCodeResponse {
    fn from(p: promo::PromoCode) -> Self {
        Self {
            codigo: p.code.to_string(),
            descuento: p.discount.get(),
            valido_hasta: p.valid_until.coerce::<()>().to_rfc3339(),
        }
    }
}

/// `GET /api/v1/puntos`
///
/// Returns the loyalty points balance of the authenticated customer.
pub async fn balance(ctx: Context) -> Result<Json<BalanceResponse>, Error> {
    let session = ctx.require_role(user::Role::Customer).await?;

    ctx.service()
        .execute(query::loyalty::BalanceByUserId::by(session.user_id))
        .await
        .map(|b| {
            Json(BalanceResponse {
                puntos: b.into(),
            })
        })
        .map_err(AsError::into_error)
}

/// `POST /api/v1/puntos/canje`
///
/// Redeems loyalty points for a fresh promo code.
pub async fn redeem(
    ctx: Context,
    Json(body): Json<RedeemRequest>,
) -> Result<(http::StatusCode, Json<PromoCodeResponse>), Error> {
    let session = ctx.require_role(user::Role::Customer).await?;

    ctx.service()
        .execute(command::RedeemPoints {
            customer_id: session.user_id,
            points: body.puntos.into(),
        })
        .await
        .map(|p| (http::StatusCode::CREATED, Json(p.into())))
        .map_err(AsError::into_error)
}

impl AsError for command::redeem_points::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InsufficientPoints { .. } => {
                Some(RedeemError::InsufficientPoints.into())
            }
            Self::TooFewPoints(_) => Some(RedeemError::TooFewPoints.into()),
        }
    }
}

define_error! {
    enum RedeemError {
        #[code = "INSUFFICIENT_POINTS"]
        #[status = BAD_REQUEST]
        #[message = "Balance does not cover the requested points"]
        InsufficientPoints,

        #[code = "TOO_FEW_POINTS"]
        #[status = BAD_REQUEST]
        #[message = "Too few points for the smallest discount"]
        TooFewPoints,
    }
}
