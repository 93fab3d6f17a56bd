//! [`PromoCode`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{promo, PromoCode},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<PromoCode>, &promo::Code>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<PromoCode>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PromoCode>, &promo::Code>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let code: &promo::Code = by.into_inner();

        const SQL: &str = "\
            SELECT id, code, discount, valid_until, active \
            FROM promo_codes \
            WHERE code = $1::VARCHAR \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&code])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| PromoCode {
                id: row.get("id"),
                code: row.get("code"),
                discount: row.get("discount"),
                valid_until: row.get("valid_until"),
                active: row.get("active"),
            }))
    }
}

impl<C> Database<Insert<PromoCode>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(promo): Insert<PromoCode>,
    ) -> Result<Self::Ok, Self::Err> {
        let PromoCode {
            id,
            code,
            discount,
            valid_until,
            active,
        } = promo;

        const SQL: &str = "\
            INSERT INTO promo_codes (\
                id, code, discount, valid_until, active\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::NUMERIC, $4::TIMESTAMPTZ, \
                $5::BOOLEAN\
            )";
        self.exec(SQL, &[&id, &code, &discount, &valid_until, &active])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
