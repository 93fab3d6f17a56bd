//! Authentication endpoints.

use axum::Json;
use secrecy::SecretBox;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::user,
};

use crate::{
    api::{self, Validator},
    define_error, AsError, Context, Error,
};

/// Request body of the registration endpoint.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Full name of the new user.
    pub nombre: String,

    /// Identity document of the new user.
    pub documento: String,

    /// Email of the new user.
    pub correo: String,

    /// Password of the new user.
    pub contrasena: String,

    /// Phone of the new user, if any.
    #[serde(default)]
    pub telefono: Option<String>,
}

/// Request body of the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email of the user.
    pub correo: String,

    /// Password of the user.
    pub contrasena: String,
}

/// Request body of the password change endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password of the user.
    pub contrasena_actual: String,

    /// New password of the user.
    pub contrasena_nueva: String,
}

/// Response body of the registration and login endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Bearer token of the created session.
    pub token: String,

    /// [RFC 3339] timestamp of the session expiration.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub expira_en: String,

    /// Authenticated user.
    pub usuario: api::User,
}

impl From<command::create_user_session::Output> for SessionResponse {
    fn from(out: command::create_user_session::Output) -> Self {
        Self {
            token: out.token.to_string(),
            expira_en: out.expires_at.coerce::<()>().to_rfc3339(),
            usuario: out.user.into(),
        }
    }
}

/// `POST /api/v1/auth/registro`
///
/// Registers a new customer and logs them in.
pub async fn register(
    ctx: Context,
    Json(body): Json<RegisterRequest>,
) -> Result<(http::StatusCode, Json<SessionResponse>), Error> {
    let RegisterRequest {
        nombre,
        documento,
        correo,
        contrasena,
        telefono,
    } = body;

    let mut v = Validator::default();
    let name = v.parse::<user::Name>("nombre", &nombre);
    let document = v.parse::<user::Document>("documento", &documento);
    let email = v.parse::<user::Email>("correo", &correo);
    let password = v.parse::<user::Password>("contrasena", &contrasena);
    let phone = match telefono {
        Some(t) => v.parse::<user::Phone>("telefono", &t).map(Some),
        None => Some(None),
    };
    v.finish()?;
    let (Some(name), Some(document), Some(email), Some(password), Some(phone)) =
        (name, document, email, password, phone)
    else {
        // `Validator::finish()` errors on any parsing failure.
        return Err(Error::internal(&"unreachable"));
    };

    let user = ctx
        .service()
        .execute(command::CreateUser {
            name,
            document,
            email,
            password: SecretBox::new(Box::new(password)),
            role: user::Role::Customer,
            phone,
            district_id: None,
        })
        .await
        .map_err(AsError::into_error)?;

    let session = ctx
        .service()
        .execute(command::CreateUserSession::ByUserId(user.id))
        .await
        .map_err(AsError::into_error)?;

    Ok((http::StatusCode::CREATED, Json(session.into())))
}

/// `POST /api/v1/auth/login`
///
/// Authenticates a user by credentials.
pub async fn login(
    ctx: Context,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, Error> {
    let LoginRequest { correo, contrasena } = body;

    let mut v = Validator::default();
    let email = v.parse::<user::Email>("correo", &correo);
    let password = v.parse::<user::Password>("contrasena", &contrasena);
    v.finish()?;
    let (Some(email), Some(password)) = (email, password) else {
        return Err(Error::internal(&"unreachable"));
    };

    let session = ctx
        .service()
        .execute(command::CreateUserSession::ByCredentials {
            email,
            password: SecretBox::new(Box::new(password)),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(session.into()))
}

/// `PUT /api/v1/auth/cambiar-contrasena`
///
/// Changes the password of the authenticated user.
pub async fn change_password(
    ctx: Context,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<http::StatusCode, Error> {
    let session = ctx.current_session().await?;

    let ChangePasswordRequest {
        contrasena_actual,
        contrasena_nueva,
    } = body;

    let mut v = Validator::default();
    let old = v.parse::<user::Password>("contrasenaActual", &contrasena_actual);
    let new = v.parse::<user::Password>("contrasenaNueva", &contrasena_nueva);
    v.finish()?;
    let (Some(old), Some(new)) = (old, new) else {
        return Err(Error::internal(&"unreachable"));
    };

    _ = ctx
        .service()
        .execute(command::UpdateUserPassword {
            user_id: session.user_id,
            new_password: SecretBox::new(Box::new(new)),
            old_password: SecretBox::new(Box::new(old)),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(http::StatusCode::OK)
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DocumentOccupied(_) => {
                Some(RegisterError::DocumentOccupied.into())
            }
            Self::EmailOccupied(_) => Some(RegisterError::EmailOccupied.into()),
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) | Self::UserNotExists(_) => None,
            Self::WrongCredentials => {
                Some(LoginError::WrongCredentials.into())
            }
        }
    }
}

impl AsError for command::update_user_password::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => None,
            Self::WrongPassword => Some(PasswordError::WrongPassword.into()),
        }
    }
}

define_error! {
    enum RegisterError {
        #[code = "DOCUMENT_OCCUPIED"]
        #[status = CONFLICT]
        #[message = "Document is already registered"]
        DocumentOccupied,

        #[code = "EMAIL_OCCUPIED"]
        #[status = CONFLICT]
        #[message = "Email is already registered"]
        EmailOccupied,
    }
}

define_error! {
    enum LoginError {
        #[code = "WRONG_CREDENTIALS"]
        #[status = UNAUTHORIZED]
        #[message = "Wrong credentials"]
        WrongCredentials,
    }
}

define_error! {
    enum PasswordError {
        #[code = "WRONG_PASSWORD"]
        #[status = BAD_REQUEST]
        #[message = "Current password does not match"]
        WrongPassword,
    }
}
