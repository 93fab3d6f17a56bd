//! Event catalog endpoints: zones and ticket types.

use axum::{extract::Path, Json};
use common::{DateTime, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{event, ticket_type, user, venue, zone, TicketType, Zone},
    query,
};

use crate::{api::Validator, define_error, AsError, Context, Error};

/// Request body of the zone creation endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddZoneRequest {
    /// Name of the new zone.
    pub nombre: String,

    /// Maximum capacity of the new zone.
    pub capacidad_maxima: i32,
}

/// Request body of the ticket type creation endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTicketTypeRequest {
    /// ID of the zone the new ticket type sells seats of.
    pub id_zona: zone::Id,

    /// Name of the new ticket type.
    pub nombre: String,

    /// Price of a single ticket, in soles.
    pub precio: Decimal,

    /// Number of tickets to mint.
    pub stock: i32,

    /// [RFC 3339] timestamp when the sale opens.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub inicio_venta: String,

    /// [RFC 3339] timestamp when the sale closes.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fin_venta: String,
}

/// Wire representation of a [`Zone`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneResponse {
    /// Unique identifier of the zone.
    pub id: zone::Id,

    /// Name of the zone.
    pub nombre: String,

    /// Maximum capacity of the zone.
    pub capacidad_maxima: i32,
}

impl From<Zone> for ZoneResponse {
    fn from(z: Zone) -> Self {
        Self {
            id: z.id,
            nombre: z.name.to_string(),
            capacidad_maxima: z.max_capacity.get(),
        }
    }
}

/// Wire representation of a [`TicketType`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketTypeResponse {
    /// Unique identifier of the ticket type.
    pub id: ticket_type::Id,

    /// ID of the zone the ticket type sells seats of.
    pub id_zona: zone::Id,

    /// Name of the ticket type.
    pub nombre: String,

    /// Price of a single ticket.
    pub precio: Decimal,

    /// Currency of the price.
    pub moneda: String,

    /// Number of tickets minted.
    pub stock: i32,

    /// [RFC 3339] timestamp when the sale opens.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub inicio_venta: String,

    /// [RFC 3339] timestamp when the sale closes.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fin_venta: String,
}

impl From<TicketType> for TicketTypeResponse {
    fn from(ty: TicketType) -> Self {
        Self {
            id: ty.id,
            id_zona: ty.zone_id,
            nombre: ty.name.to_string(),
            precio: ty.price.amount,
            moneda: ty.price.currency.to_string(),
            stock: ty.stock.get(),
            inicio_venta: ty.sale_starts_at.coerce::<()>().to_rfc3339(),
            fin_venta: ty.sale_ends_at.coerce::<()>().to_rfc3339(),
        }
    }
}

/// `POST /api/v1/eventos/{id}/zonas`
///
/// Adds a new zone to the venue of a draft event.
pub async fn add_zone(
    ctx: Context,
    Path(event_id): Path<event::Id>,
    Json(body): Json<AddZoneRequest>,
) -> Result<(http::StatusCode, Json<ZoneResponse>), Error> {
    _ = ctx.require_role(user::Role::Administrator).await?;

    let AddZoneRequest {
        nombre,
        capacidad_maxima,
    } = body;

    let mut v = Validator::default();
    let name = v.parse::<zone::Name>("nombre", &nombre);
    let max_capacity = venue::Capacity::new(capacidad_maxima);
    v.expect("capacidadMaxima", max_capacity.is_some(), "must be positive");
    v.finish()?;
    let (Some(name), Some(max_capacity)) = (name, max_capacity) else {
        // `Validator::finish()` errors on any parsing failure.
        return Err(Error::internal(&"unvalidated field"));
    };

    ctx.service()
        .execute(command::AddZoneToEvent {
            event_id,
            name,
            max_capacity,
        })
        .await
        .map(|z| (http::StatusCode::CREATED, Json(z.into())))
        .map_err(AsError::into_error)
}

/// `GET /api/v1/eventos/{id}/zonas`
///
/// Lists the zones available to an event.
pub async fn list_zones(
    ctx: Context,
    Path(event_id): Path<event::Id>,
) -> Result<Json<Vec<ZoneResponse>>, Error> {
    ctx.service()
        .execute(query::zone::ByEventId::by(event_id))
        .await
        .map(|zs| Json(zs.into_iter().map(Into::into).collect()))
        .map_err(AsError::into_error)
}

/// `POST /api/v1/eventos/{id}/entradas`
///
/// Adds a new ticket type to a draft event, minting its stock.
pub async fn add_ticket_type(
    ctx: Context,
    Path(event_id): Path<event::Id>,
    Json(body): Json<AddTicketTypeRequest>,
) -> Result<(http::StatusCode, Json<TicketTypeResponse>), Error> {
    _ = ctx.require_role(user::Role::Administrator).await?;

    let AddTicketTypeRequest {
        id_zona,
        nombre,
        precio,
        stock,
        inicio_venta,
        fin_venta,
    } = body;

    let mut v = Validator::default();
    let name = v.parse::<ticket_type::Name>("nombre", &nombre);
    v.expect("precio", precio > Decimal::ZERO, "must be positive");
    let stock = ticket_type::Stock::new(stock);
    v.expect("stock", stock.is_some(), "must be positive");
    let sale_starts_at = DateTime::from_rfc3339(&inicio_venta);
    v.expect(
        "inicioVenta",
        sale_starts_at.is_ok(),
        "must be an RFC 3339 timestamp",
    );
    let sale_ends_at = DateTime::from_rfc3339(&fin_venta);
    v.expect(
        "finVenta",
        sale_ends_at.is_ok(),
        "must be an RFC 3339 timestamp",
    );
    v.finish()?;
    let (Some(name), Some(stock), Ok(sale_starts_at), Ok(sale_ends_at)) =
        (name, stock, sale_starts_at, sale_ends_at)
    else {
        // `Validator::finish()` errors on any parsing failure.
        return Err(Error::internal(&"unvalidated field"));
    };

    ctx.service()
        .execute(command::AddTicketTypeToEvent {
            event_id,
            zone_id: id_zona,
            name,
            price: Money::soles(precio),
            stock,
            sale_starts_at: sale_starts_at.coerce(),
            sale_ends_at: sale_ends_at.coerce(),
        })
        .await
        .map(|ty| (http::StatusCode::CREATED, Json(ty.into())))
        .map_err(AsError::into_error)
}

/// `DELETE /api/v1/zonas/{id}`
///
/// Deletes an unused zone.
pub async fn delete_zone(
    ctx: Context,
    Path(zone_id): Path<zone::Id>,
) -> Result<http::StatusCode, Error> {
    _ = ctx.require_role(user::Role::Administrator).await?;

    ctx.service()
        .execute(command::DeleteZone { zone_id })
        .await
        .map(|()| http::StatusCode::NO_CONTENT)
        .map_err(AsError::into_error)
}

impl AsError for command::add_zone_to_event::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EventHasNoVenue(_) => Some(EventError::HasNoVenue.into()),
            Self::EventNotDraft(_) => Some(EventError::NotDraft.into()),
            Self::EventNotExists(_) => Some(EventError::NotExists.into()),
            Self::VenueCapacityExceeded { .. } => {
                Some(VenueError::CapacityExceeded.into())
            }
            Self::VenueNotExists(_) => Some(VenueError::NotExists.into()),
        }
    }
}

impl AsError for command::add_ticket_type_to_event::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EventNotDraft(_) => Some(EventError::NotDraft.into()),
            Self::EventNotExists(_) => Some(EventError::NotExists.into()),
            Self::SaleWindowInverted => {
                Some(TicketTypeError::SaleWindowInverted.into())
            }
            Self::StockExceedsZoneCapacity { .. } => {
                Some(TicketTypeError::StockExceedsZoneCapacity.into())
            }
            Self::ZoneNotExists(_) => Some(ZoneError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_zone::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ZoneInUse(_) => Some(ZoneError::InUse.into()),
            Self::ZoneNotExists(_) => Some(ZoneError::NotExists.into()),
        }
    }
}

define_error! {
    enum EventError {
        #[code = "EVENT_HAS_NO_VENUE"]
        #[status = CONFLICT]
        #[message = "Event has no venue assigned"]
        HasNoVenue,

        #[code = "EVENT_NOT_DRAFT"]
        #[status = CONFLICT]
        #[message = "Event does not accept structural changes anymore"]
        NotDraft,

        #[code = "EVENT_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Event does not exist"]
        NotExists,
    }
}

define_error! {
    enum VenueError {
        #[code = "VENUE_CAPACITY_EXCEEDED"]
        #[status = CONFLICT]
        #[message = "Zone capacities would exceed the venue total capacity"]
        CapacityExceeded,

        #[code = "VENUE_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Venue does not exist"]
        NotExists,
    }
}

define_error! {
    enum ZoneError {
        #[code = "ZONE_IN_USE"]
        #[status = CONFLICT]
        #[message = "Zone is referenced by ticket types"]
        InUse,

        #[code = "ZONE_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Zone does not exist"]
        NotExists,
    }
}

define_error! {
    enum TicketTypeError {
        #[code = "SALE_WINDOW_INVERTED"]
        #[status = BAD_REQUEST]
        #[message = "Sale window ends before it starts"]
        SaleWindowInverted,

        #[code = "STOCK_EXCEEDS_ZONE_CAPACITY"]
        #[status = CONFLICT]
        #[message = "Stock exceeds the zone maximum capacity"]
        StockExceedsZoneCapacity,
    }
}
