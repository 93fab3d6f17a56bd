//! Payment registration endpoint.

use axum::Json;
use common::Money;
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{order, payment::receipt, ticket, user},
    query, read,
};

use crate::{api::Validator, define_error, AsError, Context, Error};

/// Request body of the payment registration endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// ID of the order to pay for.
    pub id_orden: order::Id,

    /// Name of the card holder.
    pub nombre_titular: String,

    /// Email the receipt is sent to.
    pub correo: String,

    /// Full card number, never persisted.
    pub numero_tarjeta: String,

    /// Expiration of the card, `MM/YY`.
    pub fecha_caducidad: String,

    /// Security code of the card.
    pub cvv: String,

    /// Number of installments.
    pub numero_cuotas: i32,

    /// Amount submitted, matched against the order total.
    pub monto: Decimal,
}

/// Wire representation of a [`read::receipt::View`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResponse {
    /// Serial number of the receipt.
    pub serie: String,

    /// Total the receipt proves payment of.
    pub total: Decimal,

    /// Currency of the total.
    pub moneda: String,

    /// [RFC 3339] timestamp of the receipt emission.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub emitido_en: String,

    /// Method label of the payment.
    pub metodo_pago: String,

    /// Masked card reference of the payment.
    pub tarjeta: String,

    /// Summary of the paid order.
    pub orden: OrderSummary,

    /// Boletas emitted under the receipt.
    pub boletas: Vec<BoletaResponse>,
}

/// Confirmation summary of a paid order, as printed on a receipt.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Name of the purchased event.
    pub evento: String,

    /// Name of the venue hosting the event, if assigned.
    pub lugar: Option<String>,

    /// [RFC 3339] timestamp the event starts at, if scheduled.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fecha_inicio: Option<String>,

    /// Ticket attendees of the order.
    pub asistentes: Vec<Attendee>,
}

/// Attendee a ticket was issued for.
#[derive(Debug, Serialize)]
pub struct Attendee {
    /// Full name of the attendee.
    pub nombre: String,

    /// Identity document of the attendee.
    pub documento: String,
}

impl From<ticket::Attendee> for Attendee {
    fn from(a: ticket::Attendee) -> Self {
        Self {
            nombre: a.name.to_string(),
            documento: a.document.to_string(),
        }
    }
}

/// Wire representation of a [`receipt::Boleta`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoletaResponse {
    /// Unique identifier of the boleta.
    pub id: receipt::BoletaId,

    /// ID of the ticket the boleta covers.
    pub id_entrada: ticket::Id,

    /// Full name of the purchaser the boleta is stamped with.
    pub titular: String,

    /// Identity document of the purchaser.
    pub documento_titular: String,

    /// Price of the covered ticket.
    pub precio: Decimal,

    /// Currency of the price.
    pub moneda: String,
}

impl From<receipt::Boleta> for BoletaResponse {
    fn from(b: receipt::Boleta) -> Self {
        Self {
            id: b.id,
            id_entrada: b.ticket_id,
            titular: b.holder_name.to_string(),
            documento_titular: b.holder_document.to_string(),
            precio: b.price.amount,
            moneda: b.price.currency.to_string(),
        }
    }
}

impl From<read::receipt::View> for ReceiptResponse {
    fn from(view: read::receipt::View) -> Self {
        Self {
            serie: view.receipt.serial.to_string(),
            total: view.receipt.total.amount,
            moneda: view.receipt.total.currency.to_string(),
            emitido_en: view.receipt.emitted_at.coerce::<()>().to_rfc3339(),
            metodo_pago: view.method.to_string(),
            tarjeta: view.masked_card.to_string(),
            orden: OrderSummary {
                evento: view.order.event_name.to_string(),
                lugar: view.order.venue_name.map(|n| n.to_string()),
                fecha_inicio: view
                    .order
                    .starts_at
                    .map(|at| at.coerce::<()>().to_rfc3339()),
                asistentes: view
                    .order
                    .attendees
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            },
            boletas: view.boletas.into_iter().map(Into::into).collect(),
        }
    }
}

/// `POST /api/v1/pagos/registrar`
///
/// Registers a payment of an order, confirming it and emitting its
/// receipt.
pub async fn register(
    ctx: Context,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<ReceiptResponse>, Error> {
    let session = ctx.require_role(user::Role::Customer).await?;

    let RegisterRequest {
        id_orden,
        nombre_titular,
        correo,
        numero_tarjeta,
        fecha_caducidad,
        cvv,
        numero_cuotas,
        monto,
    } = body;

    validate(
        &nombre_titular,
        &correo,
        &numero_tarjeta,
        &fecha_caducidad,
        &cvv,
        numero_cuotas,
        monto,
    )?;

    // Customers may only pay for their own orders.
    let owned = ctx
        .service()
        .execute(query::order::ById::by(id_orden))
        .await
        .map_err(AsError::into_error)?
        .is_some_and(|o| o.customer_id == session.user_id);
    if !owned {
        return Err(PaymentError::OrderNotExists.into());
    }

    ctx.service()
        .execute(command::RegisterPayment {
            order_id: id_orden,
            card_number: SecretString::from(numero_tarjeta),
            amount: Money::soles(monto),
        })
        .await
        .map(|view| Json(view.into()))
        .map_err(AsError::into_error)
}

/// Validates the card details of a [`RegisterRequest`] for presence only.
///
/// A too-short card number surfaces as a business-rule error of the
/// command, not as a format violation here.
fn validate(
    nombre_titular: &str,
    correo: &str,
    numero_tarjeta: &str,
    fecha_caducidad: &str,
    cvv: &str,
    numero_cuotas: i32,
    monto: Decimal,
) -> Result<(), Error> {
    let mut v = Validator::default();
    v.expect(
        "nombreTitular",
        !nombre_titular.trim().is_empty(),
        "must not be blank",
    );
    _ = v.parse::<user::Email>("correo", correo);
    v.expect(
        "numeroTarjeta",
        !numero_tarjeta.trim().is_empty(),
        "must not be blank",
    );
    v.expect(
        "fechaCaducidad",
        !fecha_caducidad.trim().is_empty(),
        "must not be blank",
    );
    v.expect("cvv", !cvv.trim().is_empty(), "must not be blank");
    v.expect("numeroCuotas", numero_cuotas >= 1, "must be positive");
    v.expect("monto", monto > Decimal::ZERO, "must be positive");
    v.finish()
}

impl AsError for command::register_payment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::AmountMismatch(_) => {
                Some(PaymentError::AmountMismatch.into())
            }
            Self::Db(e) => e.try_as_error(),
            Self::InvalidCardNumber => {
                Some(PaymentError::InvalidCardNumber.into())
            }
            Self::OrderNotExists(_) => Some(PaymentError::OrderNotExists.into()),
            Self::OrderNotPayable(_) => {
                Some(PaymentError::OrderNotPayable.into())
            }
            Self::UserNotExists(_) => None,
        }
    }
}

define_error! {
    enum PaymentError {
        #[code = "AMOUNT_MISMATCH"]
        #[status = BAD_REQUEST]
        #[message = "Submitted amount differs from the order total"]
        AmountMismatch,

        #[code = "INVALID_CARD_NUMBER"]
        #[status = BAD_REQUEST]
        #[message = "Invalid card number"]
        InvalidCardNumber,

        #[code = "ORDER_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Order does not exist"]
        OrderNotExists,

        #[code = "ORDER_NOT_PAYABLE"]
        #[status = CONFLICT]
        #[message = "Order cannot be paid for"]
        OrderNotPayable,
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::validate;

    #[test]
    fn accepts_card_details_of_any_format() {
        validate(
            "Ana Quispe",
            "ana@example.com",
            "12",
            "non-sense",
            "12345678",
            1,
            Decimal::ONE,
        )
        .unwrap();
    }

    #[test]
    fn rejects_blank_fields_only() {
        let err = validate(
            " ",
            "not-an-email",
            "",
            " ",
            "",
            0,
            Decimal::ZERO,
        )
        .unwrap_err();

        assert_eq!(err.code, "VALIDATION_FAILED");
        for field in [
            "nombreTitular",
            "correo",
            "numeroTarjeta",
            "fechaCaducidad",
            "cvv",
            "numeroCuotas",
            "monto",
        ] {
            assert!(err.fields.contains_key(field), "missing `{field}`");
        }
    }
}
