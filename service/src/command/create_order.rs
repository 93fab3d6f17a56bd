//! [`Command`] for creating a new [`Order`].

use common::{
    operations::{
        By, Commit, Insert, Lock, Perform, Select, Transact, Transacted,
    },
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{
        event, order, promo, ticket, ticket_type, user, Event, Order,
        TicketType,
    },
    infra::{database, Database},
    Service,
};
#[cfg(doc)]
use crate::domain::{PromoCode, Ticket, User};

use super::Command;

/// [`Command`] for creating a new [`Order`].
#[derive(Clone, Debug)]
pub struct CreateOrder {
    /// ID of the [`User`] placing the [`Order`].
    pub customer_id: user::Id,

    /// ID of the [`Event`] to purchase tickets for.
    pub event_id: event::Id,

    /// Requested [`Item`]s of the [`Order`].
    pub items: Vec<Item>,

    /// [`PromoCode`] code to apply to the [`Order`] total, if any.
    pub promo_code: Option<promo::Code>,
}

/// Requested line item of a [`CreateOrder`] [`Command`].
#[derive(Clone, Debug)]
pub struct Item {
    /// ID of the [`TicketType`] to purchase.
    pub ticket_type_id: ticket_type::Id,

    /// [`ticket::Attendee`]s to purchase [`Ticket`]s for, one per
    /// [`Ticket`].
    pub attendees: Vec<ticket::Attendee>,
}

/// Output of [`CreateOrder`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Created [`Order`].
    pub order: Order,

    /// Created [`order::Item`]s of the [`Order`].
    pub items: Vec<order::Item>,
}

impl<Db> Command<CreateOrder> for Service<Db>
where
    Db: Database<
            Select<By<Option<Event>, event::Id>>,
            Ok = Option<Event>,
            Err = Traced<database::Error>,
        > + for<'c> Database<
            Select<By<Option<promo::PromoCode>, &'c promo::Code>>,
            Ok = Option<promo::PromoCode>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<TicketType>, ticket_type::Id>>,
            Ok = Option<TicketType>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<TicketType, ticket_type::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Insert<order::New>,
            Ok = Order,
            Err = Traced<database::Error>,
        > + Database<
            Insert<order::Item>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Perform<ticket::Reserve>,
            Ok = Vec<ticket::Id>,
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateOrder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateOrder {
            customer_id,
            event_id,
            items,
            promo_code,
        } = cmd;

        if items.is_empty() || items.iter().any(|i| i.attendees.is_empty()) {
            return Err(tracerr::new!(E::NoAttendees));
        }

        let event = self
            .database()
            .execute(Select(By::<Option<Event>, _>::new(event_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::EventNotExists(event_id))
            .map_err(tracerr::wrap!())?;
        if event.status != event::Status::Published {
            return Err(tracerr::new!(E::EventNotOnSale(event_id)));
        }

        let now = DateTime::now();

        let promo = match promo_code {
            Some(code) => {
                let promo = self
                    .database()
                    .execute(Select(By::new(&code)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or_else(|| E::PromoCodeInvalid(code.clone()))
                    .map_err(tracerr::wrap!())?;
                if !promo.is_applicable(now) {
                    return Err(tracerr::new!(E::PromoCodeInvalid(code)));
                }
                Some(promo)
            }
            None => None,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut total: Option<Money> = None;
        let mut priced = Vec::with_capacity(items.len());
        for item in items {
            // Avoid concurrent reservations upon the same `TicketType`.
            tx.execute(Lock(By::new(item.ticket_type_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;

            let ty = tx
                .execute(Select(By::<Option<TicketType>, _>::new(
                    item.ticket_type_id,
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .filter(|ty| ty.event_id == event_id)
                .ok_or(E::TicketTypeNotExists(item.ticket_type_id))
                .map_err(tracerr::wrap!())?;
            if !ty.is_on_sale(now) {
                return Err(tracerr::new!(E::TicketTypeNotOnSale(ty.id)));
            }

            let quantity = i32::try_from(item.attendees.len())
                .ok()
                .and_then(order::item::Quantity::new)
                .ok_or(E::NoAttendees)
                .map_err(tracerr::wrap!())?;

            let subtotal = Money {
                amount: ty.price.amount * Decimal::from(quantity.get()),
                currency: ty.price.currency,
            };
            total = Some(match total {
                Some(t) if t.currency != subtotal.currency => {
                    return Err(tracerr::new!(E::MixedCurrencies));
                }
                Some(t) => Money {
                    amount: t.amount + subtotal.amount,
                    currency: t.currency,
                },
                None => subtotal,
            });

            priced.push((ty, quantity, item.attendees));
        }
        // `items` is non-empty, so the total is always accumulated.
        let mut total = total.ok_or(E::NoAttendees).map_err(tracerr::wrap!())?;
        if let Some(promo) = &promo {
            total.amount = promo.discount.discount(total.amount);
        }

        let order = tx
            .execute(Insert(order::New {
                customer_id,
                event_id,
                status: order::Status::Pending,
                total,
                promo_code_id: promo.map(|p| p.id),
                created_at: now.coerce(),
                expires_at: Some(
                    (now + self.config().order_lifetime).coerce(),
                ),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut order_items = Vec::with_capacity(priced.len());
        for (ty, quantity, attendees) in priced {
            let item = order::Item {
                id: order::item::Id::new(),
                order_id: order.id,
                ticket_type_id: ty.id,
                quantity,
                unit_price: ty.price,
            };
            tx.execute(Insert(item.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;

            let reserved = tx
                .execute(Perform(ticket::Reserve {
                    item_id: item.id,
                    ticket_type_id: ty.id,
                    attendees,
                }))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if reserved.len() < usize::try_from(quantity.get()).unwrap_or(0) {
                return Err(tracerr::new!(E::NotEnoughTickets(ty.id)));
            }

            order_items.push(item);
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Output {
            order,
            items: order_items,
        })
    }
}

/// Error of [`CreateOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Event`] with the provided ID does not exist.
    #[display("`Event(id: {_0})` does not exist")]
    #[from(ignore)]
    EventNotExists(#[error(not(source))] event::Id),

    /// [`Event`] is not published for sale.
    #[display("`Event(id: {_0})` is not on sale")]
    #[from(ignore)]
    EventNotOnSale(#[error(not(source))] event::Id),

    /// [`Order`] items mix different currencies.
    #[display("`Order` items mix different currencies")]
    MixedCurrencies,

    /// No attendees provided for an [`Order`] item.
    #[display("No attendees provided")]
    NoAttendees,

    /// Not enough available [`Ticket`]s of a [`TicketType`].
    #[display("Not enough available tickets of `TicketType(id: {_0})`")]
    #[from(ignore)]
    NotEnoughTickets(#[error(not(source))] ticket_type::Id),

    /// [`PromoCode`] is unknown, inactive or expired.
    #[display("`{_0}` promo code is not applicable")]
    #[from(ignore)]
    PromoCodeInvalid(#[error(not(source))] promo::Code),

    /// [`TicketType`] with the provided ID does not exist on the [`Event`].
    #[display("`TicketType(id: {_0})` does not exist")]
    #[from(ignore)]
    TicketTypeNotExists(#[error(not(source))] ticket_type::Id),

    /// [`TicketType`] sale window is closed.
    #[display("`TicketType(id: {_0})` is not on sale")]
    #[from(ignore)]
    TicketTypeNotOnSale(#[error(not(source))] ticket_type::Id),
}
