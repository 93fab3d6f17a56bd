//! Promotional code definitions.

use common::{unit, DateTimeOf, Percent};
#[cfg(doc)]
use common::{DateTime, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Order;

/// Percentage discount applicable to an [`Order`] total at checkout.
#[derive(Clone, Debug)]
pub struct PromoCode {
    /// ID of this [`PromoCode`].
    pub id: Id,

    /// [`Code`] customers type in to apply this [`PromoCode`].
    pub code: Code,

    /// Discount this [`PromoCode`] grants.
    pub discount: Percent,

    /// [`DateTime`] when this [`PromoCode`] stops being applicable.
    pub valid_until: ValidityDateTime,

    /// Indicates whether this [`PromoCode`] is applicable at all.
    pub active: bool,
}

impl PromoCode {
    /// Indicates whether this [`PromoCode`] is applicable at the provided
    /// `now` moment.
    #[must_use]
    pub fn is_applicable(&self, now: common::DateTime) -> bool {
        self.active && now <= self.valid_until.coerce()
    }
}

/// ID of a [`PromoCode`].
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

/// Code of a [`PromoCode`], as typed in by customers.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[serde(transparent)]
pub struct Code(String);

impl Code {
    /// Creates a new [`Code`] if the given `code` is valid.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        Self::check(&code).then_some(Self(code))
    }

    /// Checks whether the given `code` is a valid [`Code`].
    fn check(code: impl AsRef<str>) -> bool {
        let code = code.as_ref();
        !code.is_empty()
            && code.len() <= 32
            && code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    }
}

impl FromStr for Code {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Code`")
    }
}

/// [`DateTime`] when a [`PromoCode`] stops being applicable.
pub type ValidityDateTime = DateTimeOf<(PromoCode, unit::Expiration)>;

#[cfg(test)]
mod spec {
    use super::Code;

    #[test]
    fn code_is_uppercase_alphanumeric() {
        assert!(Code::new("VERANO25").is_some());
        assert!(Code::new("X").is_some());

        assert!(Code::new("").is_none());
        assert!(Code::new("verano25").is_none());
        assert!(Code::new("VERANO 25").is_none());
    }
}
