//! [`Command`] for annulling an [`Order`].

use common::operations::{
    By, Commit, Lock, Perform, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{order, ticket, Order},
    infra::{database, Database},
    task::notify,
    Service,
};
#[cfg(doc)]
use crate::domain::Ticket;

use super::Command;

/// [`Command`] for annulling an [`Order`].
///
/// The only backward transition of the [`Order`] lifecycle: releases the
/// [`Ticket`]s back for sale.
#[derive(Clone, Copy, Debug, From)]
pub struct AnnulOrder {
    /// ID of the [`Order`] to annul.
    pub order_id: order::Id,
}

impl<Db> Command<AnnulOrder> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Order>, order::Id>>,
            Ok = Option<Order>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Order, order::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Order>, Ok = (), Err = Traced<database::Error>>
        + Database<
            Perform<ticket::ReleaseForOrder>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: AnnulOrder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AnnulOrder { order_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Order`.
        tx.execute(Lock(By::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut order = tx
            .execute(Select(By::<Option<Order>, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OrderNotExists(order_id))
            .map_err(tracerr::wrap!())?;
        if !order.is_annullable() {
            return Err(tracerr::new!(E::OrderNotAnnullable(order_id)));
        }

        order.status = order::Status::Annulled;
        tx.execute(Update(order.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Perform(ticket::ReleaseForOrder(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Only after the transaction is committed.
        self.notifications().enqueue(notify::Event::OrderAnnulled {
            order_id,
            customer_id: order.customer_id,
        });

        Ok(order)
    }
}

/// Error of [`AnnulOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Order`] is not in an annullable status.
    #[display("`Order(id: {_0})` cannot be annulled")]
    #[from(ignore)]
    OrderNotAnnullable(#[error(not(source))] order::Id),

    /// [`Order`] with the provided ID does not exist.
    #[display("`Order(id: {_0})` does not exist")]
    #[from(ignore)]
    OrderNotExists(#[error(not(source))] order::Id),
}
