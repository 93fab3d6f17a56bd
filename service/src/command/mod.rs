//! [`Command`] definition.

pub mod add_ticket_type_to_event;
pub mod add_zone_to_event;
pub mod annul_order;
pub mod authorize_user_session;
pub mod create_order;
pub mod create_user;
pub mod create_user_session;
pub mod delete_zone;
pub mod redeem_points;
pub mod register_payment;
pub mod update_user_password;
pub mod update_user_profile;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_ticket_type_to_event::AddTicketTypeToEvent,
    add_zone_to_event::AddZoneToEvent, annul_order::AnnulOrder,
    authorize_user_session::AuthorizeUserSession, create_order::CreateOrder,
    create_user::CreateUser, create_user_session::CreateUserSession,
    delete_zone::DeleteZone, redeem_points::RedeemPoints,
    register_payment::RegisterPayment,
    update_user_password::UpdateUserPassword,
    update_user_profile::UpdateUserProfile,
};
