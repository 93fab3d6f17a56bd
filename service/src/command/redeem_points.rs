//! [`Command`] for redeeming loyalty points.

use std::time::Duration;

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime, Percent,
};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;
use uuid::Uuid;

use crate::{
    domain::{loyalty, promo, user, User},
    infra::{database, Database},
    read,
    Service,
};
#[cfg(doc)]
use crate::domain::PromoCode;

use super::Command;

/// [`Command`] for redeeming loyalty points.
///
/// Deducts the point cost from the customer's balance and mints a fresh
/// [`PromoCode`] in exchange.
#[derive(Clone, Copy, Debug)]
pub struct RedeemPoints {
    /// ID of the [`User`] redeeming their points.
    pub customer_id: user::Id,

    /// Point cost to deduct.
    pub points: loyalty::Points,
}

impl RedeemPoints {
    /// Points buying one percent of discount.
    const POINTS_PER_PERCENT: i64 = 10;

    /// Cap of the minted discount.
    const MAX_DISCOUNT_PERCENT: i64 = 50;

    /// Validity period of a minted [`PromoCode`].
    const CODE_VALIDITY: Duration = Duration::from_secs(30 * 24 * 60 * 60);
}

impl<Db> Command<RedeemPoints> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<User, user::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::loyalty::Balance, user::Id>>,
            Ok = read::loyalty::Balance,
            Err = Traced<database::Error>,
        > + Database<
            Insert<loyalty::Entry>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Insert<promo::PromoCode>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = promo::PromoCode;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: RedeemPoints) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RedeemPoints {
            customer_id,
            points,
        } = cmd;

        if points.get() < RedeemPoints::POINTS_PER_PERCENT {
            return Err(tracerr::new!(E::TooFewPoints(points)));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Serialize balance checks upon the same `User`.
        tx.execute(Lock(By::new(customer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let balance = tx
            .execute(Select(By::<read::loyalty::Balance, _>::new(customer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !balance.covers(points) {
            return Err(tracerr::new!(E::InsufficientPoints {
                requested: points,
                balance,
            }));
        }

        tx.execute(Insert(loyalty::Entry {
            id: loyalty::Id::new(),
            user_id: customer_id,
            delta: points.negated(),
            reason: loyalty::Reason::Redemption,
            order_id: None,
            created_at: DateTime::now().coerce(),
        }))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let percent = (points.get() / RedeemPoints::POINTS_PER_PERCENT)
            .min(RedeemPoints::MAX_DISCOUNT_PERCENT);
        let discount =
            Percent::new(Decimal::from(percent)).expect("in `(0..=50]` range");

        let mut suffix = Uuid::new_v4().simple().to_string();
        suffix.truncate(8);
        suffix.make_ascii_uppercase();
        let code = promo::Code::new(format!("CANJE{suffix}"))
            .expect("uppercase alphanumeric");

        let promo = promo::PromoCode {
            id: promo::Id::new(),
            code,
            discount,
            valid_until: (DateTime::now() + RedeemPoints::CODE_VALIDITY)
                .coerce(),
            active: true,
        };
        tx.execute(Insert(promo.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(promo)
    }
}

/// Error of [`RedeemPoints`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Balance doesn't cover the requested point cost.
    #[display("Balance of {balance:?} doesn't cover {requested} points")]
    InsufficientPoints {
        /// Requested point cost.
        requested: loyalty::Points,

        /// Current balance.
        balance: read::loyalty::Balance,
    },

    /// Too few points for the smallest discount.
    #[display("{_0} points are too few to redeem")]
    #[from(ignore)]
    TooFewPoints(#[error(not(source))] loyalty::Points),
}
