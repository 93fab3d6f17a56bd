//! [`ExpireOrders`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::{
    operations::{By, Perform, Start},
    DateTime,
};
use tokio::time::interval;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::order,
    infra::{database, Database},
    Service,
};
#[cfg(doc)]
use crate::domain::{Order, Ticket};

use super::Task;

/// Configuration for [`ExpireOrders`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between [`Order`] expiration sweeps.
    pub interval: time::Duration,
}

/// [`Task`] expiring pending [`Order`]s past their deadline and releasing
/// their reserved [`Ticket`]s.
#[derive(Clone, Copy, Debug)]
pub struct ExpireOrders<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Db> Task<Start<By<ExpireOrders<Self>, Config>>> for Service<Db>
where
    ExpireOrders<Service<Db>>:
        Task<Perform<()>, Ok = (), Err: Error> + Send + Sync + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<ExpireOrders<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = ExpireOrders {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::ExpireOrders` failed: {e}");
            });
        }
    }
}

impl<Db> Task<Perform<()>> for ExpireOrders<Service<Db>>
where
    Db: Database<
        Perform<order::ExpireBefore>,
        Ok = Vec<order::Id>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let deadline = DateTime::now().coerce();
        let expired = self
            .service
            .database()
            .execute(Perform(order::ExpireBefore(deadline)))
            .await
            .map_err(tracerr::map_from_and_wrap!())?;
        if !expired.is_empty() {
            log::info!(count = expired.len(), "expired pending `Order`s");
        }
        Ok(())
    }
}

/// Error of [`ExpireOrders`] execution.
pub type ExecutionError = Traced<database::Error>;
