//! [`Query`] collection related to a single [`User`] account.

use common::operations::By;

use crate::domain::{user, User};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`User`] by its [`user::Id`].
///
/// Used by session authorization and by receipt views resolving the
/// purchaser.
pub type ById = DatabaseQuery<By<Option<User>, user::Id>>;
