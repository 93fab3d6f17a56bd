//! [`Query`] collection related to loyalty points.

use common::operations::By;

use crate::{domain::user, read};
#[cfg(doc)]
use crate::{domain::User, Query};

use super::DatabaseQuery;

/// Queries the loyalty points [`read::loyalty::Balance`] of a [`User`] by
/// the [`user::Id`].
pub type BalanceByUserId =
    DatabaseQuery<By<read::loyalty::Balance, user::Id>>;
