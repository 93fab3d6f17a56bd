//! [`Order`] definitions.

pub mod item;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

use crate::domain::{event, promo, user};
#[cfg(doc)]
use crate::domain::{Event, User};

pub use self::item::Item;

/// Customer's checkout transaction grouping one or more [`Item`]s.
#[derive(Clone, Debug)]
pub struct Order {
    /// ID of this [`Order`].
    pub id: Id,

    /// ID of the [`User`] who placed this [`Order`].
    pub customer_id: user::Id,

    /// ID of the [`Event`] this [`Order`] purchases tickets for.
    pub event_id: event::Id,

    /// [`Status`] of this [`Order`].
    pub status: Status,

    /// Total of this [`Order`]: the sum of its [`Item`] subtotals net of
    /// the applied discount.
    pub total: Money,

    /// ID of the promotional code applied to this [`Order`], if any.
    pub promo_code_id: Option<promo::Id>,

    /// [`DateTime`] when this [`Order`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Order`] expires unless confirmed.
    pub expires_at: Option<ExpirationDateTime>,
}

impl Order {
    /// Indicates whether this [`Order`] can still be paid for.
    #[must_use]
    pub fn is_payable(&self) -> bool {
        matches!(self.status, Status::Cart | Status::Pending)
    }

    /// Indicates whether this [`Order`] can be annulled.
    ///
    /// Annulment is the only backward transition of the [`Status`]
    /// lifecycle.
    #[must_use]
    pub fn is_annullable(&self) -> bool {
        matches!(self.status, Status::Pending | Status::Confirmed)
    }
}

/// New [`Order`] to be persisted, not having its sequential ID assigned
/// yet.
#[derive(Clone, Debug)]
pub struct New {
    /// ID of the [`User`] placing the new [`Order`].
    pub customer_id: user::Id,

    /// ID of the [`Event`] the new [`Order`] purchases tickets for.
    pub event_id: event::Id,

    /// [`Status`] of the new [`Order`].
    pub status: Status,

    /// Total of the new [`Order`].
    pub total: Money,

    /// ID of the promotional code applied to the new [`Order`], if any.
    pub promo_code_id: Option<promo::Id>,

    /// [`DateTime`] when the new [`Order`] is created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when the new [`Order`] expires unless confirmed.
    pub expires_at: Option<ExpirationDateTime>,
}

/// ID of an [`Order`], assigned sequentially by the database.
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
    #[doc = "Lifecycle status of an [`Order`]."]
    enum Status {
        #[doc = "Open shopping cart."]
        Cart = 1,

        #[doc = "Awaiting payment."]
        Pending = 2,

        #[doc = "Paid and confirmed."]
        Confirmed = 3,

        #[doc = "Annulled by an administrator."]
        Annulled = 4,

        #[doc = "Expired without payment."]
        Expired = 5,
    }
}

/// Operation payload expiring all [`Status::Pending`] [`Order`]s whose
/// deadline is before the provided [`DateTime`].
#[derive(Clone, Copy, Debug)]
pub struct ExpireBefore(pub ExpirationDateTime);

/// [`DateTime`] when an [`Order`] was created.
pub type CreationDateTime = DateTimeOf<(Order, unit::Creation)>;

/// [`DateTime`] when an [`Order`] expires.
pub type ExpirationDateTime = DateTimeOf<(Order, unit::Expiration)>;

#[cfg(test)]
mod spec {
    use common::{DateTime, Money};
    use rust_decimal::Decimal;

    use crate::domain::{event, user};

    use super::{Order, Status};

    fn order(status: Status) -> Order {
        Order {
            id: 42.into(),
            customer_id: user::Id::new(),
            event_id: event::Id::new(),
            status,
            total: Money::soles(Decimal::new(15_000, 2)),
            promo_code_id: None,
            created_at: DateTime::now().coerce(),
            expires_at: None,
        }
    }

    #[test]
    fn payable_until_confirmed() {
        assert!(order(Status::Cart).is_payable());
        assert!(order(Status::Pending).is_payable());

        assert!(!order(Status::Confirmed).is_payable());
        assert!(!order(Status::Annulled).is_payable());
        assert!(!order(Status::Expired).is_payable());
    }

    #[test]
    fn annullable_once_placed() {
        assert!(order(Status::Pending).is_annullable());
        assert!(order(Status::Confirmed).is_annullable());

        assert!(!order(Status::Cart).is_annullable());
        assert!(!order(Status::Annulled).is_annullable());
        assert!(!order(Status::Expired).is_annullable());
    }
}
