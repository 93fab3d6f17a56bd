//! Read entities definitions.

pub mod loyalty;
pub mod order;
pub mod receipt;
pub mod zone;
