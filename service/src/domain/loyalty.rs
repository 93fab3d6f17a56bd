//! Loyalty points definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{order, user};
#[cfg(doc)]
use crate::domain::{Order, Payment, User};

/// Signed movement on a [`User`]'s loyalty points ledger.
///
/// The ledger is append-only: a [`User`]'s balance is the sum of their
/// [`Entry`] deltas.
#[derive(Clone, Debug)]
pub struct Entry {
    /// ID of this [`Entry`].
    pub id: Id,

    /// ID of the [`User`] whose balance this [`Entry`] moves.
    pub user_id: user::Id,

    /// Signed amount of [`Points`] this [`Entry`] adds to the balance.
    pub delta: Points,

    /// [`Reason`] of this [`Entry`].
    pub reason: Reason,

    /// ID of the [`Order`] this [`Entry`] originates from, if any.
    pub order_id: Option<order::Id>,

    /// [`DateTime`] when this [`Entry`] was recorded.
    pub created_at: CreationDateTime,
}

/// ID of an [`Entry`].
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

define_kind! {
    #[doc = "Reason of an [`Entry`]."]
    enum Reason {
        #[doc = "Earned for an approved [`Payment`]."]
        Accrual = 1,

        #[doc = "Spent on a redemption."]
        Redemption = 2,
    }
}

/// Amount of loyalty points, possibly negative when representing an
/// [`Entry`] delta.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub struct Points(i64);

impl Points {
    /// Returns these [`Points`] as an [`i64`].
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns the negation of these [`Points`].
    #[must_use]
    pub const fn negated(self) -> Self {
        Self(-self.0)
    }
}

/// [`DateTime`] when an [`Entry`] was recorded.
pub type CreationDateTime = DateTimeOf<(Entry, unit::Creation)>;
