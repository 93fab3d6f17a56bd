//! Background [`Task`]s definitions.

mod background;
pub mod expire_orders;
pub mod notify;

pub use common::Handler as Task;

pub use self::{
    background::Background, expire_orders::ExpireOrders, notify::Notify,
};
