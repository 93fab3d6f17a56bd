//! [`User`]-related wire definitions.

use serde::{Deserialize, Serialize};
use service::domain::{self, user};

/// Wire representation of a [`domain::User`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier of the user.
    pub id: user::Id,

    /// Full name of the user.
    pub nombre: String,

    /// Identity document of the user.
    pub documento: String,

    /// Email of the user.
    pub correo: String,

    /// Phone of the user, if any.
    pub telefono: Option<String>,

    /// [`Role`] of the user.
    pub rol: Role,

    /// [RFC 3339] timestamp of the user registration.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub creado_en: String,
}

impl From<domain::User> for User {
    fn from(u: domain::User) -> Self {
        Self {
            id: u.id,
            nombre: u.name.to_string(),
            documento: u.document.to_string(),
            correo: u.email.to_string(),
            telefono: u.phone.map(|p| p.to_string()),
            rol: u.role.into(),
            creado_en: u.created_at.to_rfc3339(),
        }
    }
}

/// Wire representation of a [`user::Role`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Role {
    /// Customer buying tickets.
    #[serde(rename = "CLIENTE")]
    Cliente,

    /// Administrator of the catalog.
    #[serde(rename = "ADMINISTRADOR")]
    Administrador,
}

impl From<user::Role> for Role {
    fn from(role: user::Role) -> Self {
        match role {
            user::Role::Customer => Self::Cliente,
            user::Role::Administrator => Self::Administrador,
        }
    }
}

impl From<Role> for user::Role {
    fn from(role: Role) -> Self {
        match role {
            Role::Cliente => Self::Customer,
            Role::Administrador => Self::Administrator,
        }
    }
}
