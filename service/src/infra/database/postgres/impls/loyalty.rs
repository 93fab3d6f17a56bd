//! Loyalty-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{loyalty, user},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Insert<loyalty::Entry>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(entry): Insert<loyalty::Entry>,
    ) -> Result<Self::Ok, Self::Err> {
        let loyalty::Entry {
            id,
            user_id,
            delta,
            reason,
            order_id,
            created_at,
        } = entry;

        const SQL: &str = "\
            INSERT INTO loyalty_entries (\
                id, user_id, delta, reason, order_id, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::INT8, $4::INT2, $5::INT8, \
                $6::TIMESTAMPTZ\
            )";
        self.exec(SQL, &[&id, &user_id, &delta, &reason, &order_id, &created_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<read::loyalty::Balance, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::loyalty::Balance;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::loyalty::Balance, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: user::Id = by.into_inner();

        const SQL: &str = "\
            SELECT COALESCE(SUM(delta), 0)::INT8 AS balance \
            FROM loyalty_entries \
            WHERE user_id = $1::UUID";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.expect("always exists").get::<_, i64>("balance").into()
            })
    }
}
