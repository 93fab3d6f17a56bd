//! [`Receipt`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{payment, ticket, user};
#[cfg(doc)]
use crate::domain::{Order, Payment, Ticket, User};

/// Proof-of-payment document (comprobante de pago) emitted for an approved
/// [`Payment`].
#[derive(Clone, Debug)]
pub struct Receipt {
    /// ID of this [`Receipt`].
    pub id: Id,

    /// ID of the [`Payment`] this [`Receipt`] proves.
    pub payment_id: payment::Id,

    /// [`Serial`] number of this [`Receipt`].
    pub serial: Serial,

    /// Total amount this [`Receipt`] certifies.
    pub total: Money,

    /// [`DateTime`] when this [`Receipt`] was emitted.
    pub emitted_at: EmissionDateTime,
}

/// ID of a [`Receipt`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Serial number of a [`Receipt`], derived from its [`Payment`] ID.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Serial(String);

impl Serial {
    /// Derives the [`Serial`] for the provided [`Payment`] ID.
    #[must_use]
    pub fn for_payment(id: payment::Id) -> Self {
        Self(format!("CP-{:05}", i64::from(id)))
    }
}

/// Per-ticket sale voucher (boleta) emitted alongside a [`Receipt`].
///
/// Stamps the purchaser's identity: one [`Boleta`] per sold [`Ticket`],
/// both naming the [`User`] who paid for the [`Order`].
#[derive(Clone, Debug)]
pub struct Boleta {
    /// ID of this [`Boleta`].
    pub id: BoletaId,

    /// ID of the [`Receipt`] this [`Boleta`] was emitted under.
    pub receipt_id: Id,

    /// ID of the [`Ticket`] this [`Boleta`] vouches for.
    pub ticket_id: ticket::Id,

    /// Full name of the purchaser.
    pub holder_name: user::Name,

    /// Identity document of the purchaser.
    pub holder_document: user::Document,

    /// Price of the vouched [`Ticket`].
    pub price: Money,
}

/// ID of a [`Boleta`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct BoletaId(Uuid);

impl BoletaId {
    /// Creates a new random [`BoletaId`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// [`DateTime`] when a [`Receipt`] was emitted.
pub type EmissionDateTime = DateTimeOf<(Receipt, unit::Emission)>;

#[cfg(test)]
mod spec {
    use crate::domain::payment;

    use super::Serial;

    #[test]
    fn serial_is_zero_padded_to_5() {
        assert_eq!(
            Serial::for_payment(payment::Id::from(42)).to_string(),
            "CP-00042",
        );
        assert_eq!(
            Serial::for_payment(payment::Id::from(1)).to_string(),
            "CP-00001",
        );
        assert_eq!(
            Serial::for_payment(payment::Id::from(123_456)).to_string(),
            "CP-123456",
        );
    }
}
