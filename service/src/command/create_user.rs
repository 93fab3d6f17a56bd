//! [`Command`] for creating a new [`User`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Document, Email, Name, Password, Phone, Role};
use crate::{
    domain::{geo, user, User},
    infra::{database, Database},
    task::notify,
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`User`].
#[derive(Clone, Debug)]
pub struct CreateUser {
    /// [`Name`] of a new [`User`].
    pub name: user::Name,

    /// Identity [`Document`] of a new [`User`].
    pub document: user::Document,

    /// [`Email`] of a new [`User`].
    pub email: user::Email,

    /// [`Password`] of a new [`User`].
    pub password: SecretBox<user::Password>,

    /// [`Role`] of a new [`User`], fixed forever.
    pub role: user::Role,

    /// [`Phone`] of a new [`User`].
    pub phone: Option<user::Phone>,

    /// Home district of a new [`User`].
    pub district_id: Option<geo::district::Id>,
}

impl<Db> Command<CreateUser> for Service<Db>
where
    Db: for<'e> Database<
            Select<By<Option<User>, &'e user::Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + for<'d> Database<
            Select<By<Option<User>, &'d user::Document>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<User>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUser {
            name,
            document,
            email,
            password,
            role,
            phone,
            district_id,
        } = cmd;

        let u = self
            .database()
            .execute(Select(By::new(&email)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if u.is_some() {
            return Err(tracerr::new!(E::EmailOccupied(email)));
        }

        let u = self
            .database()
            .execute(Select(By::new(&document)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if u.is_some() {
            return Err(tracerr::new!(E::DocumentOccupied(document)));
        }

        let user = User {
            id: user::Id::new(),
            name,
            document,
            email,
            phone,
            password_hash: user::PasswordHash::new(password.expose_secret()),
            role,
            district_id,
            created_at: DateTime::now().coerce(),
            deleted_at: None,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(user.clone()))
            .await
            .map_err(|e| match e.as_ref() {
                #[cfg(feature = "postgres")]
                database::Error::Postgres(pg)
                    if pg.is_unique_violation(Some("users_email_key")) =>
                {
                    tracerr::new!(E::EmailOccupied(user.email.clone()))
                }
                #[cfg(feature = "postgres")]
                database::Error::Postgres(pg)
                    if pg.is_unique_violation(Some("users_document_key")) =>
                {
                    tracerr::new!(E::DocumentOccupied(user.document.clone()))
                }
                _ => tracerr::map_from(e),
            })
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        // Only after the transaction is committed.
        self.notifications().enqueue(notify::Event::UserRegistered {
            user_id: user.id,
            email: user.email.clone(),
        });

        Ok(user)
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`user::Document`] is already registered.
    #[display("`{_0}` document is already registered")]
    DocumentOccupied(#[error(not(source))] user::Document),

    /// [`user::Email`] is already registered.
    #[display("`{_0}` email is already registered")]
    EmailOccupied(#[error(not(source))] user::Email),
}
