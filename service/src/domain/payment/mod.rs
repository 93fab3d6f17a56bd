//! [`Payment`] definitions.

pub mod receipt;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

use crate::domain::{order, user};
#[cfg(doc)]
use crate::domain::{Order, User};

pub use self::receipt::Receipt;

/// Card payment capture for an [`Order`].
///
/// Append-only financial record: created together with its [`Receipt`] and
/// never updated afterward.
#[derive(Clone, Debug)]
pub struct Payment {
    /// ID of this [`Payment`], assigned sequentially by the database.
    pub id: Id,

    /// ID of the [`Order`] this [`Payment`] pays for.
    pub order_id: order::Id,

    /// [`Method`] label of this [`Payment`].
    pub method: Method,

    /// [`MaskedCard`] reference of this [`Payment`].
    ///
    /// The full card number is never persisted.
    pub masked_card: MaskedCard,

    /// Amount of this [`Payment`].
    pub amount: Money,

    /// [`Status`] of this [`Payment`].
    pub status: Status,

    /// ID of the [`User`] who paid.
    pub payer_id: user::Id,

    /// [`DateTime`] when this [`Payment`] was captured.
    pub paid_at: CaptureDateTime,
}

/// New [`Payment`] to be persisted, not having its sequential ID assigned
/// yet.
#[derive(Clone, Debug)]
pub struct New {
    /// ID of the [`Order`] the new [`Payment`] pays for.
    pub order_id: order::Id,

    /// [`Method`] label of the new [`Payment`].
    pub method: Method,

    /// [`MaskedCard`] reference of the new [`Payment`].
    pub masked_card: MaskedCard,

    /// Amount of the new [`Payment`].
    pub amount: Money,

    /// [`Status`] of the new [`Payment`].
    pub status: Status,

    /// ID of the [`User`] who pays.
    pub payer_id: user::Id,

    /// [`DateTime`] when the new [`Payment`] is captured.
    pub paid_at: CaptureDateTime,
}

/// ID of a [`Payment`], assigned sequentially by the database.
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
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(i64);

define_kind! {
    #[doc = "Status of a [`Payment`]."]
    enum Status {
        #[doc = "Captured successfully."]
        Approved = 1,

        #[doc = "Rejected on capture."]
        Rejected = 2,
    }
}

/// Last 4 digits of a card number: the only part of it the system ever
/// retains.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Last4(String);

impl Last4 {
    /// Extracts the [`Last4`] of the provided card `number`.
    ///
    /// [`None`] is returned if the `number` is shorter than 4 characters.
    #[must_use]
    pub fn of(number: &str) -> Option<Self> {
        // Counts characters, not bytes, to never split the `number` inside
        // a multi-byte character.
        let tail = number
            .char_indices()
            .rev()
            .nth(3)
            .map(|(i, _)| &number[i..])?;
        Some(Self(tail.to_owned()))
    }
}

/// Human-readable label of a [`Payment`] method.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Method(String);

impl Method {
    /// Creates a new card [`Method`] label from the provided [`Last4`].
    #[must_use]
    pub fn card(last4: &Last4) -> Self {
        Self(format!("Tarjeta ({last4})"))
    }
}

/// Masked card reference of a [`Payment`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct MaskedCard(String);

impl MaskedCard {
    /// Creates a new [`MaskedCard`] from the provided [`Last4`].
    #[must_use]
    pub fn new(last4: &Last4) -> Self {
        Self(format!("XXXX-XXXX-XXXX-{last4}"))
    }
}

/// [`DateTime`] when a [`Payment`] was captured.
pub type CaptureDateTime = DateTimeOf<(Payment, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Last4, MaskedCard, Method};

    #[test]
    fn last4_requires_4_characters() {
        assert_eq!(
            Last4::of("4111111111111234").unwrap().to_string(),
            "1234",
        );
        assert_eq!(Last4::of("1234").unwrap().to_string(), "1234");

        assert!(Last4::of("123").is_none());
        assert!(Last4::of("").is_none());
    }

    #[test]
    fn last4_counts_characters_not_bytes() {
        assert_eq!(Last4::of("aé111").unwrap().to_string(), "é111");
        assert_eq!(Last4::of("ééé1").unwrap().to_string(), "ééé1");

        assert!(Last4::of("ééé").is_none());
    }

    #[test]
    fn card_method_label() {
        let last4 = Last4::of("4111111111111234").unwrap();
        assert_eq!(Method::card(&last4).to_string(), "Tarjeta (1234)");
    }

    #[test]
    fn masked_card_keeps_last4_only() {
        let last4 = Last4::of("4111111111111234").unwrap();
        assert_eq!(
            MaskedCard::new(&last4).to_string(),
            "XXXX-XXXX-XXXX-1234",
        );
    }
}
