//! [`Query`] collection related to a single [`Receipt`].
//!
//! [`Receipt`]: crate::domain::payment::Receipt

use common::operations::By;

use crate::domain::{order, payment::Receipt};
#[cfg(doc)]
use crate::{domain::Order, Query};

use super::DatabaseQuery;

/// Queries the [`Receipt`] of an [`Order`] by the [`order::Id`].
pub type ByOrderId = DatabaseQuery<By<Option<Receipt>, order::Id>>;
