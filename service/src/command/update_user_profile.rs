//! [`Command`] for updating a [`User`] profile.

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Email, Name, Phone};
use crate::{
    domain::{user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`User`] profile.
#[derive(Clone, Debug)]
pub struct UpdateUserProfile {
    /// ID of the [`User`] whose profile should be updated.
    pub user_id: user::Id,

    /// New [`Name`] of the [`User`], if changed.
    pub name: Option<user::Name>,

    /// New [`Email`] of the [`User`], if changed.
    pub email: Option<user::Email>,

    /// New [`Phone`] of the [`User`], if changed.
    ///
    /// The inner [`None`] indicates [`Phone`] deletion.
    pub phone: Option<Option<user::Phone>>,
}

impl<Db> Command<UpdateUserProfile> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<User, user::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<User>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateUserProfile,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateUserProfile {
            user_id,
            name,
            email,
            phone,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `User`.
        tx.execute(Lock(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut user = tx
            .execute(Select(By::<Option<User>, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        let mut changed = false;
        if let Some(name) = name {
            changed |= user.name != name;
            user.name = name;
        }
        if let Some(email) = email {
            changed |= user.email != email;
            user.email = email;
        }
        if let Some(phone) = phone {
            changed |= user.phone != phone;
            user.phone = phone;
        }
        if !changed {
            return Ok(user);
        }

        tx.execute(Update(user.clone()))
            .await
            .map_err(|e| match e.as_ref() {
                #[cfg(feature = "postgres")]
                database::Error::Postgres(pg)
                    if pg.is_unique_violation(Some("users_email_key")) =>
                {
                    tracerr::new!(E::EmailOccupied(user.email.clone()))
                }
                _ => tracerr::map_from(e),
            })?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(user)
    }
}

/// Error of [`UpdateUserProfile`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`user::Email`] is already registered.
    #[display("`{_0}` email is already registered")]
    #[from(ignore)]
    EmailOccupied(#[error(not(source))] user::Email),

    /// [`User`] doesn't exist.
    #[display("`User(id: {_0}` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
