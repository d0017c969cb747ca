//! Boundary service between the builder and the Shopify Admin API.
//!
//! Each handler mirrors one remote endpoint: it takes the store domain and
//! access token out of band from the body (the request-metadata pair the
//! hosted service reads from headers), authorizes before touching the body,
//! and maps every outcome onto the wire contract: 401 `{ error }` for
//! missing credentials, 400 `{ userErrors: [{ field, message }] }` for
//! validation failures, 500 `{ error }` for transport/upstream failures.
//!
//! The create-menu handler re-runs the same depth validation the client
//! already performed. A tampered or buggy client must never get an
//! over-deep menu past this layer, so the check is duplicated on purpose.

pub mod menu;
pub mod oauth;
pub mod resources;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const API_VERSION: &str = "2024-01";

/// The credential pair carried as request metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreAuth {
    pub shop: String,
    pub token: String,
}

impl StoreAuth {
    fn graphql_endpoint(&self) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            self.shop, API_VERSION
        )
    }
}

/// One structured field error, in the shape the platform reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserError {
    pub field: Vec<String>,
    pub message: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Missing or rejected credentials; raised before any upstream call.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A malformed request (e.g. missing OAuth parameters).
    #[error("{0}")]
    BadRequest(String),

    /// Depth or field validation failed, here or upstream.
    #[error("{}", first_message(.0))]
    Validation(Vec<UserError>),

    /// Network failure or an upstream platform error, surfaced as-is.
    #[error("{0}")]
    Upstream(String),
}

fn first_message(errors: &[UserError]) -> &str {
    errors
        .first()
        .map(|e| e.message.as_str())
        .unwrap_or("validation failed")
}

impl GatewayError {
    /// The HTTP status this error maps to on the wire.
    pub fn status(&self) -> u16 {
        match self {
            GatewayError::Unauthorized(_) => 401,
            GatewayError::BadRequest(_) | GatewayError::Validation(_) => 400,
            GatewayError::Upstream(_) => 500,
        }
    }

    /// The JSON body this error maps to on the wire.
    pub fn body(&self) -> serde_json::Value {
        match self {
            GatewayError::Validation(errors) => serde_json::json!({ "userErrors": errors }),
            other => serde_json::json!({ "error": other.to_string() }),
        }
    }
}

impl From<minreq::Error> for GatewayError {
    fn from(e: minreq::Error) -> Self {
        GatewayError::Upstream(e.to_string())
    }
}

/// Reject before the body is examined when either credential is absent.
pub(crate) fn require_auth(auth: Option<&StoreAuth>) -> Result<&StoreAuth, GatewayError> {
    match auth {
        Some(a) if !a.shop.is_empty() && !a.token.is_empty() => Ok(a),
        _ => Err(GatewayError::Unauthorized(
            "Missing Shop or Token headers".to_string(),
        )),
    }
}

#[derive(Serialize)]
struct GraphqlRequest<'a, V: Serialize> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<V>,
}

#[derive(Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<serde_json::Value>,
}

/// POST one GraphQL document to the store's admin endpoint and unwrap the
/// `data` envelope. Top-level `errors` become upstream failures.
pub(crate) fn admin_graphql<V: Serialize, T: DeserializeOwned>(
    auth: &StoreAuth,
    query: &str,
    variables: Option<V>,
) -> Result<T, GatewayError> {
    let response = minreq::post(auth.graphql_endpoint())
        .with_header("X-Shopify-Access-Token", &auth.token)
        .with_header("Content-Type", "application/json")
        .with_json(&GraphqlRequest { query, variables })?
        .send()?;

    let envelope: GraphqlResponse<T> = response.json()?;
    if let Some(errors) = envelope.errors {
        return Err(GatewayError::Upstream(errors.to_string()));
    }
    envelope
        .data
        .ok_or_else(|| GatewayError::Upstream("Empty response from Shopify".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_auth_rejects_missing_credentials() {
        assert!(require_auth(None).is_err());

        let empty_token = StoreAuth {
            shop: "s.myshopify.com".to_string(),
            token: String::new(),
        };
        assert!(matches!(
            require_auth(Some(&empty_token)),
            Err(GatewayError::Unauthorized(_))
        ));

        let ok = StoreAuth {
            shop: "s.myshopify.com".to_string(),
            token: "shpat_x".to_string(),
        };
        assert!(require_auth(Some(&ok)).is_ok());
    }

    #[test]
    fn test_status_codes_match_contract() {
        assert_eq!(GatewayError::Unauthorized("x".into()).status(), 401);
        assert_eq!(GatewayError::BadRequest("x".into()).status(), 400);
        assert_eq!(GatewayError::Validation(vec![]).status(), 400);
        assert_eq!(GatewayError::Upstream("x".into()).status(), 500);
    }

    #[test]
    fn test_wire_bodies() {
        let validation = GatewayError::Validation(vec![UserError {
            field: vec!["items".to_string()],
            message: "too deep".to_string(),
        }]);
        let body = validation.body();
        assert_eq!(body["userErrors"][0]["field"][0], "items");
        assert_eq!(body["userErrors"][0]["message"], "too deep");

        let auth = GatewayError::Unauthorized("Missing Shop or Token headers".to_string());
        assert!(auth.body()["error"]
            .as_str()
            .unwrap()
            .contains("Missing Shop or Token headers"));
    }

    #[test]
    fn test_graphql_endpoint_uses_pinned_api_version() {
        let auth = StoreAuth {
            shop: "s.myshopify.com".to_string(),
            token: "t".to_string(),
        };
        assert_eq!(
            auth.graphql_endpoint(),
            "https://s.myshopify.com/admin/api/2024-01/graphql.json"
        );
    }
}
