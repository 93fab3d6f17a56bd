//! [`Receipt`]-related read definitions.
//!
//! [`Receipt`]: crate::domain::payment::Receipt

use crate::{
    domain::payment::{self, receipt},
    read,
};
#[cfg(doc)]
use crate::domain::{
    payment::{receipt::Boleta, Receipt},
    Order, Payment,
};

/// Full view of a [`Receipt`] as returned to the payer: the document
/// itself, its [`Payment`] details, the [`Order`] summary and the emitted
/// [`Boleta`]s.
#[derive(Clone, Debug)]
pub struct View {
    /// The [`Receipt`] itself.
    pub receipt: receipt::Receipt,

    /// Method label of the proved [`Payment`].
    pub method: payment::Method,

    /// Masked card reference of the proved [`Payment`].
    pub masked_card: payment::MaskedCard,

    /// Summary of the paid [`Order`].
    pub order: read::order::Summary,

    /// [`Boleta`]s emitted under the [`Receipt`].
    pub boletas: Vec<receipt::Boleta>,
}
