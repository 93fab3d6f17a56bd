//! [`Command`] for registering a [`Payment`] of an [`Order`].

use std::collections::HashSet;

use common::{
    operations::{
        By, Commit, Insert, Lock, Perform, Select, Transact, Transacted,
        Update,
    },
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretString};
use tracerr::Traced;

use crate::{
    domain::{
        loyalty, order,
        payment::{self, receipt, Receipt},
        ticket, user, Order, Payment, Ticket, User,
    },
    infra::{database, Database},
    read,
    task::notify,
    Service,
};
#[cfg(doc)]
use crate::domain::payment::receipt::Boleta;

use super::Command;

/// [`Command`] for registering a [`Payment`] of an [`Order`].
///
/// Confirms the [`Order`], emits its [`Receipt`] with [`Boleta`]s, and
/// accrues loyalty points, all atomically.
#[derive(Clone, Debug)]
pub struct RegisterPayment {
    /// ID of the [`Order`] to pay for.
    pub order_id: order::Id,

    /// Full card number, never persisted.
    pub card_number: SecretString,

    /// Amount the payer submitted, matched against the [`Order`] total.
    pub amount: Money,
}

impl<Db> Command<RegisterPayment> for Service<Db>
where
    Db: Database<
            Select<By<Option<Order>, order::Id>>,
            Ok = Option<Order>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Order>, order::Id>>,
            Ok = Option<Order>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Order, order::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Insert<payment::New>,
            Ok = Payment,
            Err = Traced<database::Error>,
        > + Database<Update<Order>, Ok = (), Err = Traced<database::Error>>
        + Database<
            Perform<ticket::SellForOrder>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Insert<Receipt>, Ok = (), Err = Traced<database::Error>>
        + Database<
            Insert<receipt::Boleta>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Insert<loyalty::Entry>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<(Ticket, Money)>, order::Id>>,
            Ok = Vec<(Ticket, Money)>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::order::Summary, order::Id>>,
            Ok = read::order::Summary,
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = read::receipt::View;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RegisterPayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RegisterPayment {
            order_id,
            card_number,
            amount,
        } = cmd;

        let order = self
            .database()
            .execute(Select(By::<Option<Order>, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OrderNotExists(order_id))
            .map_err(tracerr::wrap!())?;

        let last4 = payment::Last4::of(card_number.expose_secret())
            .ok_or(E::InvalidCardNumber)
            .map_err(tracerr::wrap!())?;

        let payer = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(order.customer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(order.customer_id))
            .map_err(tracerr::wrap!())?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent payments upon the same `Order`.
        tx.execute(Lock(By::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        // Re-check under the lock: a concurrent submission may have
        // confirmed the `Order` already.
        let mut order = tx
            .execute(Select(By::<Option<Order>, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OrderNotExists(order_id))
            .map_err(tracerr::wrap!())?;
        if !order.is_payable() {
            return Err(tracerr::new!(E::OrderNotPayable(order_id)));
        }
        if amount != order.total {
            return Err(tracerr::new!(E::AmountMismatch(order_id)));
        }

        let payment = tx
            .execute(Insert(payment::New {
                order_id,
                method: payment::Method::card(&last4),
                masked_card: payment::MaskedCard::new(&last4),
                amount: order.total,
                status: payment::Status::Approved,
                payer_id: payer.id,
                paid_at: DateTime::now().coerce(),
            }))
            .await
            .map_err(|e| match e.as_ref() {
                #[cfg(feature = "postgres")]
                database::Error::Postgres(pg)
                    if pg.is_unique_violation(Some(
                        "payments_order_id_key",
                    )) =>
                {
                    tracerr::new!(E::OrderNotPayable(order_id))
                }
                _ => tracerr::map_from(e),
            })?;

        order.status = order::Status::Confirmed;
        tx.execute(Update(order.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Perform(ticket::SellForOrder(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let receipt = Receipt {
            id: receipt::Id::new(),
            payment_id: payment.id,
            serial: receipt::Serial::for_payment(payment.id),
            total: order.total,
            emitted_at: DateTime::now().coerce(),
        };
        tx.execute(Insert(receipt.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let tickets = tx
            .execute(Select(By::<Vec<(Ticket, Money)>, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // One `Boleta` per distinct attendee document, every one stamped
        // with the purchaser's identity.
        let mut seen = HashSet::new();
        let mut boletas = Vec::new();
        for (ticket, unit_price) in tickets {
            let Some(attendee) = ticket.attendee else {
                continue;
            };
            if !seen.insert(attendee.document) {
                continue;
            }
            let boleta = receipt::Boleta {
                id: receipt::BoletaId::new(),
                receipt_id: receipt.id,
                ticket_id: ticket.id,
                holder_name: payer.name.clone(),
                holder_document: payer.document.clone(),
                price: unit_price,
            };
            tx.execute(Insert(boleta.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            boletas.push(boleta);
        }

        if let Some(points) = order.total.whole_units() {
            if points > 0 {
                tx.execute(Insert(loyalty::Entry {
                    id: loyalty::Id::new(),
                    user_id: payer.id,
                    delta: points.into(),
                    reason: loyalty::Reason::Accrual,
                    order_id: Some(order_id),
                    created_at: DateTime::now().coerce(),
                }))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            }
        }

        let summary = tx
            .execute(Select(By::<read::order::Summary, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Only after the transaction is committed.
        self.notifications().enqueue(notify::Event::OrderConfirmed {
            order_id,
            customer_id: payer.id,
            serial: receipt.serial.clone(),
        });

        Ok(read::receipt::View {
            receipt,
            method: payment.method,
            masked_card: payment.masked_card,
            order: summary,
            boletas,
        })
    }
}

/// Error of [`RegisterPayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Submitted amount differs from the [`Order`] total.
    #[display("Submitted amount differs from the `Order(id: {_0})` total")]
    #[from(ignore)]
    AmountMismatch(#[error(not(source))] order::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Card number is too short to be valid.
    #[display("Invalid card number")]
    InvalidCardNumber,

    /// [`Order`] with the provided ID does not exist.
    #[display("`Order(id: {_0})` does not exist")]
    #[from(ignore)]
    OrderNotExists(#[error(not(source))] order::Id),

    /// [`Order`] is already confirmed, annulled or expired.
    #[display("`Order(id: {_0})` cannot be paid for")]
    #[from(ignore)]
    OrderNotPayable(#[error(not(source))] order::Id),

    /// [`User`] who placed the [`Order`] does not exist.
    #[display("`User(id: {_0}` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
