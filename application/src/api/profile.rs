//! Administrator profile endpoints.

use axum::Json;
use serde::Deserialize;
use service::{
    command::{self, Command as _},
    domain::user,
    query,
};

use crate::{
    api::{self, explicit_null, Validator},
    define_error, AsError, Context, Error,
};

/// Request body of the profile update endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
    /// New full name, when provided.
    #[serde(default)]
    pub nombre: Option<String>,

    /// New email, when provided.
    #[serde(default)]
    pub correo: Option<String>,

    /// New phone: an explicit `null` removes the current one.
    #[serde(default, deserialize_with = "explicit_null")]
    pub telefono: Option<Option<String>>,
}

/// `GET /api/v1/administrador/perfil`
///
/// Returns the profile of the authenticated administrator.
pub async fn show(ctx: Context) -> Result<Json<api::User>, Error> {
    let session = ctx.require_role(user::Role::Administrator).await?;

    ctx.service()
        .execute(query::user::ById::by(session.user_id))
        .await
        .map_err(AsError::into_error)?
        .map(|u| Json(u.into()))
        .ok_or_else(|| ProfileError::NotExists.into())
}

/// `PUT /api/v1/administrador/perfil`
///
/// Updates the profile of the authenticated administrator.
pub async fn update(
    ctx: Context,
    Json(body): Json<UpdateRequest>,
) -> Result<Json<api::User>, Error> {
    let session = ctx.require_role(user::Role::Administrator).await?;

    let UpdateRequest {
        nombre,
        correo,
        telefono,
    } = body;

    let mut v = Validator::default();
    let name = match nombre {
        Some(n) => v.parse::<user::Name>("nombre", &n).map(Some),
        None => Some(None),
    };
    let email = match correo {
        Some(e) => v.parse::<user::Email>("correo", &e).map(Some),
        None => Some(None),
    };
    let phone = match telefono {
        Some(Some(p)) => {
            v.parse::<user::Phone>("telefono", &p).map(|p| Some(Some(p)))
        }
        Some(None) => Some(Some(None)),
        None => Some(None),
    };
    v.finish()?;
    let (Some(name), Some(email), Some(phone)) = (name, email, phone) else {
        // `Validator::finish()` errors on any parsing failure.
        return Err(Error::internal(&"unvalidated field"));
    };

    ctx.service()
        .execute(command::UpdateUserProfile {
            user_id: session.user_id,
            name,
            email,
            phone,
        })
        .await
        .map(|u| Json(u.into()))
        .map_err(AsError::into_error)
}

impl AsError for command::update_user_profile::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => {
                Some(super::auth::RegisterError::EmailOccupied.into())
            }
            Self::UserNotExists(_) => Some(ProfileError::NotExists.into()),
        }
    }
}

define_error! {
    enum ProfileError {
        #[code = "USER_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "User does not exist"]
        NotExists,
    }
}
