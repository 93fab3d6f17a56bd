//! [`Query`] collection related to a single [`Order`].

use common::operations::By;

use crate::domain::{order, Order};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Order`] by its [`order::Id`].
pub type ById = DatabaseQuery<By<Option<Order>, order::Id>>;
