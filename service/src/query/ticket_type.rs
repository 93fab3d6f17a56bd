//! [`Query`] collection related to [`TicketType`]s.

use common::operations::By;

use crate::domain::{event, TicketType};
#[cfg(doc)]
use crate::{domain::Event, Query};

use super::DatabaseQuery;

/// Queries all the [`TicketType`]s of an [`Event`] by the [`event::Id`].
pub type ByEventId = DatabaseQuery<By<Vec<TicketType>, event::Id>>;
