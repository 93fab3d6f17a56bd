//! Order checkout endpoints.

use axum::{extract::Path, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{event, order, promo, ticket, ticket_type, user, Order},
};

use crate::{api::Validator, define_error, AsError, Context, Error};

/// Request body of the order creation endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    /// ID of the event to purchase tickets for.
    pub id_evento: event::Id,

    /// Requested line items.
    pub entradas: Vec<ItemRequest>,

    /// Promotional code to apply, if any.
    #[serde(default)]
    pub codigo_promocional: Option<String>,
}

/// Requested line item of an order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    /// ID of the ticket type to purchase.
    pub id_tipo_entrada: ticket_type::Id,

    /// Attendees to issue tickets for, one ticket each.
    pub asistentes: Vec<AttendeeRequest>,
}

/// Attendee a ticket is issued for.
#[derive(Debug, Deserialize)]
pub struct AttendeeRequest {
    /// Full name of the attendee.
    pub nombre: String,

    /// Identity document of the attendee.
    pub documento: String,
}

/// Wire representation of a created [`Order`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// Unique identifier of the order.
    pub id: order::Id,

    /// Lifecycle status of the order.
    pub estado: Status,

    /// Total of the order, net of the applied discount.
    pub total: Decimal,

    /// Currency of the total.
    pub moneda: String,

    /// [RFC 3339] timestamp when the order expires unless paid.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expira_en: Option<String>,

    /// Line items of the order.
    pub entradas: Vec<ItemResponse>,
}

impl From<command::create_order::Output> for OrderResponse {
    fn from(out: command::create_order::Output) -> Self {
        Self {
            id: out.order.id,
            estado: out.order.status.into(),
            total: out.order.total.amount,
            moneda: out.order.total.currency.to_string(),
            expira_en: out
                .order
                .expires_at
                .map(|at| at.coerce::<()>().to_rfc3339()),
            entradas: out.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Wire representation of an [`order::Item`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    /// Unique identifier of the line item.
    pub id: order::item::Id,

    /// ID of the purchased ticket type.
    pub id_tipo_entrada: ticket_type::Id,

    /// Number of tickets purchased.
    pub cantidad: i32,

    /// Price of a single ticket at purchase time.
    pub precio_unitario: Decimal,
}

impl From<order::Item> for ItemResponse {
    fn from(item: order::Item) -> Self {
        Self {
            id: item.id,
            id_tipo_entrada: item.ticket_type_id,
            cantidad: item.quantity.get(),
            precio_unitario: item.unit_price.amount,
        }
    }
}

/// Wire representation of an annulled [`Order`].
#[derive(Debug, Serialize)]
pub struct AnnulResponse {
    /// Unique identifier of the order.
    pub id: order::Id,

    /// Lifecycle status of the order.
    pub estado: Status,
}

impl From<Order> for AnnulResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            estado: o.status.into(),
        }
    }
}

/// Wire representation of an [`order::Status`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Status {
    /// Open shopping cart.
    #[serde(rename = "CARRITO")]
    Carrito,

    /// Awaiting payment.
    #[serde(rename = "PENDIENTE")]
    Pendiente,

    /// Paid and confirmed.
    #[serde(rename = "CONFIRMADA")]
    Confirmada,

    /// Annulled by an administrator.
    #[serde(rename = "ANULADA")]
    Anulada,

    /// Expired without payment.
    #[serde(rename = "EXPIRADA")]
    Expirada,
}

impl From<order::Status> for Status {
    fn from(status: order::Status) -> Self {
        match status {
            order::Status::Cart => Self::Carrito,
            order::Status::Pending => Self::Pendiente,
            order::Status::Confirmed => Self::Confirmada,
            order::Status::Annulled => Self::Anulada,
            order::Status::Expired => Self::Expirada,
        }
    }
}

/// `POST /api/v1/ordenes`
///
/// Places a new order reserving the requested tickets.
pub async fn create(
    ctx: Context,
    Json(body): Json<CreateRequest>,
) -> Result<(http::StatusCode, Json<OrderResponse>), Error> {
    let session = ctx.require_role(user::Role::Customer).await?;

    let CreateRequest {
        id_evento,
        entradas,
        codigo_promocional,
    } = body;

    let mut v = Validator::default();
    v.expect("entradas", !entradas.is_empty(), "must not be empty");
    let mut items = Vec::with_capacity(entradas.len());
    for entrada in entradas {
        v.expect(
            "entradas",
            !entrada.asistentes.is_empty(),
            "every item must name at least one attendee",
        );
        let mut attendees = Vec::with_capacity(entrada.asistentes.len());
        for asistente in entrada.asistentes {
            let name = v.parse::<user::Name>("entradas", &asistente.nombre);
            let document =
                v.parse::<user::Document>("entradas", &asistente.documento);
            if let (Some(name), Some(document)) = (name, document) {
                attendees.push(ticket::Attendee { name, document });
            }
        }
        items.push(command::create_order::Item {
            ticket_type_id: entrada.id_tipo_entrada,
            attendees,
        });
    }
    let promo_code = match codigo_promocional {
        Some(c) => v.parse::<promo::Code>("codigoPromocional", &c).map(Some),
        None => Some(None),
    };
    v.finish()?;
    let Some(promo_code) = promo_code else {
        // `Validator::finish()` errors on any parsing failure.
        return Err(Error::internal(&"unvalidated field"));
    };

    ctx.service()
        .execute(command::CreateOrder {
            customer_id: session.user_id,
            event_id: id_evento,
            items,
            promo_code,
        })
        .await
        .map(|out| (http::StatusCode::CREATED, Json(out.into())))
        .map_err(AsError::into_error)
}

/// `PUT /api/v1/ordenes/{id}/anular`
///
/// Annuls an order, releasing its tickets back for sale.
pub async fn annul(
    ctx: Context,
    Path(order_id): Path<order::Id>,
) -> Result<Json<AnnulResponse>, Error> {
    _ = ctx.require_role(user::Role::Administrator).await?;

    ctx.service()
        .execute(command::AnnulOrder { order_id })
        .await
        .map(|o| Json(o.into()))
        .map_err(AsError::into_error)
}

impl AsError for command::create_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EventNotExists(_) => {
                Some(super::event::EventError::NotExists.into())
            }
            Self::EventNotOnSale(_) => {
                Some(CreateOrderError::EventNotOnSale.into())
            }
            Self::MixedCurrencies => {
                Some(CreateOrderError::MixedCurrencies.into())
            }
            Self::NoAttendees => Some(CreateOrderError::NoAttendees.into()),
            Self::NotEnoughTickets(_) => {
                Some(CreateOrderError::NotEnoughTickets.into())
            }
            Self::PromoCodeInvalid(_) => {
                Some(CreateOrderError::PromoCodeInvalid.into())
            }
            Self::TicketTypeNotExists(_) => {
                Some(CreateOrderError::TicketTypeNotExists.into())
            }
            Self::TicketTypeNotOnSale(_) => {
                Some(CreateOrderError::TicketTypeNotOnSale.into())
            }
        }
    }
}

impl AsError for command::annul_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OrderNotAnnullable(_) => {
                Some(OrderError::NotAnnullable.into())
            }
            Self::OrderNotExists(_) => Some(OrderError::NotExists.into()),
        }
    }
}

define_error! {
    enum CreateOrderError {
        #[code = "EVENT_NOT_ON_SALE"]
        #[status = CONFLICT]
        #[message = "Event is not on sale"]
        EventNotOnSale,

        #[code = "MIXED_CURRENCIES"]
        #[status = BAD_REQUEST]
        #[message = "Order items mix different currencies"]
        MixedCurrencies,

        #[code = "NO_ATTENDEES"]
        #[status = BAD_REQUEST]
        #[message = "No attendees provided"]
        NoAttendees,

        #[code = "NOT_ENOUGH_TICKETS"]
        #[status = CONFLICT]
        #[message = "Not enough available tickets"]
        NotEnoughTickets,

        #[code = "PROMO_CODE_INVALID"]
        #[status = BAD_REQUEST]
        #[message = "Promo code is not applicable"]
        PromoCodeInvalid,

        #[code = "TICKET_TYPE_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Ticket type does not exist on the event"]
        TicketTypeNotExists,

        #[code = "TICKET_TYPE_NOT_ON_SALE"]
        #[status = CONFLICT]
        #[message = "Ticket type sale window is closed"]
        TicketTypeNotOnSale,
    }
}

define_error! {
    enum OrderError {
        #[code = "ORDER_NOT_ANNULLABLE"]
        #[status = CONFLICT]
        #[message = "Order cannot be annulled"]
        NotAnnullable,

        #[code = "ORDER_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Order does not exist"]
        NotExists,
    }
}

#[cfg(test)]
mod spec {
    use super::Status;

    #[test]
    fn status_wire_names() {
        for (status, expected) in [
            (Status::Carrito, "\"CARRITO\""),
            (Status::Pendiente, "\"PENDIENTE\""),
            (Status::Confirmada, "\"CONFIRMADA\""),
            (Status::Anulada, "\"ANULADA\""),
            (Status::Expirada, "\"EXPIRADA\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), expected);
        }
    }
}
