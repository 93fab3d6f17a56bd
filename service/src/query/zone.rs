//! [`Query`] collection related to [`Zone`]s.

use common::operations::By;

use crate::domain::{event, Zone};
#[cfg(doc)]
use crate::{domain::Event, Query};

use super::DatabaseQuery;

/// Queries all the [`Zone`]s of an [`Event`]'s venue by the [`event::Id`].
pub type ByEventId = DatabaseQuery<By<Vec<Zone>, event::Id>>;
