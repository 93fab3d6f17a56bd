//! REST API definitions.

pub mod auth;
pub mod event;
pub mod loyalty;
pub mod order;
pub mod payment;
pub mod profile;
pub mod report;
pub mod user;

use std::{fmt, str::FromStr};

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Deserializer};

use crate::Error;

pub use self::user::User;

/// Builds the `/api/v1` [`Router`] of the application.
pub fn router() -> Router {
    Router::new()
        .route("/auth/registro", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/cambiar-contrasena", put(auth::change_password))
        .route(
            "/administrador/perfil",
            get(profile::show).put(profile::update),
        )
        .route("/ordenes", post(order::create))
        .route("/ordenes/:id/anular", put(order::annul))
        .route("/pagos/registrar", post(payment::register))
        .route(
            "/eventos/:id/zonas",
            get(event::list_zones).post(event::add_zone),
        )
        .route("/eventos/:id/entradas", post(event::add_ticket_type))
        .route("/zonas/:id", delete(event::delete_zone))
        .route("/puntos", get(loyalty::balance))
        .route("/puntos/canje", post(loyalty::redeem))
        .route("/reportes/ventas", get(report::sales))
}

/// Accumulator of per-field validation messages while parsing a request
/// body.
#[derive(Debug, Default)]
pub(crate) struct Validator(Vec<(&'static str, String)>);

impl Validator {
    /// Parses the provided `value` of the `field`, recording its parsing
    /// error (if any).
    pub(crate) fn parse<T>(
        &mut self,
        field: &'static str,
        value: &str,
    ) -> Option<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match value.parse() {
            Ok(v) => Some(v),
            Err(e) => {
                self.0.push((field, e.to_string()));
                None
            }
        }
    }

    /// Records the `message` for the `field` unless the provided condition
    /// holds.
    pub(crate) fn expect(
        &mut self,
        field: &'static str,
        holds: bool,
        message: &str,
    ) {
        if !holds {
            self.0.push((field, message.to_owned()));
        }
    }

    /// Finishes the validation, erroring if any message was recorded.
    pub(crate) fn finish(self) -> Result<(), Error> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(self.0))
        }
    }
}

/// Deserializes a JSON value as [`Some`], distinguishing an explicit `null`
/// from an absent field when paired with `#[serde(default)]`.
pub(crate) fn explicit_null<'de, T, D>(
    deserializer: D,
) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod spec {
    use serde::Deserialize;

    use super::{explicit_null, Validator};

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "explicit_null")]
        telefono: Option<Option<String>>,
    }

    #[test]
    fn validator_accumulates_messages() {
        let mut v = Validator::default();
        v.expect("a", false, "broken");
        v.expect("b", true, "fine");

        let err = v.finish().unwrap_err();
        assert_eq!(err.code, "VALIDATION_FAILED");
        assert_eq!(err.fields.get("a").map(String::as_str), Some("broken"));
        assert!(!err.fields.contains_key("b"));
    }

    #[test]
    fn validator_passes_clean_input() {
        let mut v = Validator::default();
        assert_eq!(v.parse::<i32>("n", "42"), Some(42));
        v.finish().unwrap();
    }

    #[test]
    fn explicit_null_distinguishes_absent_from_null() {
        let absent: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.telefono, None);

        let null: Body =
            serde_json::from_str(r#"{"telefono": null}"#).unwrap();
        assert_eq!(null.telefono, Some(None));

        let set: Body =
            serde_json::from_str(r#"{"telefono": "987654321"}"#).unwrap();
        assert_eq!(set.telefono, Some(Some("987654321".to_owned())));
    }
}
