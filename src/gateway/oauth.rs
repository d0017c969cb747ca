use serde::{Deserialize, Serialize};

use crate::app::session::normalize_shop_domain;

use super::GatewayError;

#[derive(Serialize)]
struct ExchangeRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
struct ExchangeResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Trade an authorization code for a permanent access token.
pub fn exchange_token(
    shop: &str,
    client_id: &str,
    client_secret: &str,
    code: &str,
) -> Result<String, GatewayError> {
    if shop.is_empty() || client_id.is_empty() || client_secret.is_empty() || code.is_empty() {
        return Err(GatewayError::BadRequest("Missing parameters".to_string()));
    }

    let shop = normalize_shop_domain(shop);
    let url = format!("https://{}/admin/oauth/access_token", shop);

    let response = minreq::post(url)
        .with_header("Content-Type", "application/json")
        .with_json(&ExchangeRequest {
            client_id,
            client_secret,
            code,
        })?
        .send()?;

    let data: ExchangeResponse = response.json()?;
    if !(200..300).contains(&response.status_code) {
        let reason = data
            .error_description
            .or(data.error)
            .unwrap_or_else(|| "Failed to exchange token".to_string());
        return Err(GatewayError::Upstream(reason));
    }
    data.access_token
        .ok_or_else(|| GatewayError::Upstream("Failed to exchange token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameters_rejected_locally() {
        let err = exchange_token("shop", "", "secret", "code").unwrap_err();
        assert_eq!(err, GatewayError::BadRequest("Missing parameters".to_string()));
        assert_eq!(err.status(), 400);

        assert!(exchange_token("", "id", "secret", "code").is_err());
        assert!(exchange_token("shop", "id", "secret", "").is_err());
    }

    #[test]
    fn test_exchange_response_shapes_parse() {
        let ok: ExchangeResponse =
            serde_json::from_str(r#"{"access_token":"shpat_x","scope":"read_products"}"#).unwrap();
        assert_eq!(ok.access_token.as_deref(), Some("shpat_x"));

        let rejected: ExchangeResponse = serde_json::from_str(
            r#"{"error":"invalid_request","error_description":"The authorization code was not found"}"#,
        )
        .unwrap();
        assert!(rejected.access_token.is_none());
        assert_eq!(
            rejected.error_description.as_deref(),
            Some("The authorization code was not found")
        );
    }
}
