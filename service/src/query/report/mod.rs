//! Report [`Query`] definitions.
//!
//! [`Query`]: crate::Query

pub mod sales;

pub use self::sales::Sales;
