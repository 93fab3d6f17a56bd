//! Domain definitions.

pub mod event;
pub mod geo;
pub mod loyalty;
pub mod order;
pub mod payment;
pub mod promo;
pub mod ticket;
pub mod ticket_type;
pub mod user;
pub mod venue;
pub mod zone;

pub use self::{
    event::Event, order::Order, payment::Payment, promo::PromoCode,
    ticket::Ticket, ticket_type::TicketType, user::User, venue::Venue,
    zone::Zone,
};
