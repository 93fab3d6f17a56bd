//! [`Notify`] [`Task`].

use std::convert::Infallible;

use common::operations::{By, Start};
use tokio::sync::mpsc;
use tracing as log;

use crate::{
    domain::{order, payment::receipt, user},
    Service,
};
#[cfg(doc)]
use crate::{
    domain::{Order, User},
    infra::Database,
};

use super::Task;

/// Domain event to notify an [`User`] about.
///
/// Enqueued strictly after the owning transaction commits, so never
/// refers to rolled-back state.
#[derive(Clone, Debug)]
pub enum Event {
    /// [`User`] has registered.
    UserRegistered {
        /// ID of the registered [`User`].
        user_id: user::Id,

        /// [`user::Email`] to greet.
        email: user::Email,
    },

    /// [`Order`] has been paid and confirmed.
    OrderConfirmed {
        /// ID of the confirmed [`Order`].
        order_id: order::Id,

        /// ID of the [`User`] who placed the [`Order`].
        customer_id: user::Id,

        /// Serial of the emitted receipt.
        serial: receipt::Serial,
    },

    /// [`Order`] has been annulled.
    OrderAnnulled {
        /// ID of the annulled [`Order`].
        order_id: order::Id,

        /// ID of the [`User`] who placed the [`Order`].
        customer_id: user::Id,
    },
}

/// Enqueueing half of the [`Notify`] [`Task`] channel.
#[derive(Clone, Debug)]
pub struct Events(mpsc::UnboundedSender<Event>);

impl Events {
    /// Creates a new [`Events`] channel.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self(tx), rx)
    }

    /// Enqueues the provided [`Event`] for notification.
    ///
    /// Notification delivery is best-effort, so a closed channel is only
    /// logged.
    pub fn enqueue(&self, event: Event) {
        if let Err(e) = self.0.send(event) {
            log::warn!("`task::Notify` channel is closed: {e}");
        }
    }
}

/// [`Task`] notifying [`User`]s about [`Event`]s.
///
/// The actual delivery (e-mail) is an external collaborator, so this
/// [`Task`] only traces the hand-off.
#[derive(Clone, Copy, Debug)]
pub struct Notify;

impl<Db> Task<Start<By<Notify, mpsc::UnboundedReceiver<Event>>>>
    for Service<Db>
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<Notify, mpsc::UnboundedReceiver<Event>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut events = by.into_inner();

        while let Some(event) = events.recv().await {
            match event {
                Event::UserRegistered { user_id, email } => {
                    log::info!(
                        %user_id, %email,
                        "dispatching `User` registration notification",
                    );
                }
                Event::OrderConfirmed {
                    order_id,
                    customer_id,
                    serial,
                } => {
                    log::info!(
                        %order_id, %customer_id, %serial,
                        "dispatching `Order` confirmation notification",
                    );
                }
                Event::OrderAnnulled {
                    order_id,
                    customer_id,
                } => {
                    log::info!(
                        %order_id, %customer_id,
                        "dispatching `Order` annulment notification",
                    );
                }
            }
        }

        Ok(())
    }
}
