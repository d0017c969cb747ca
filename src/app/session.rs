use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::Result;

/// OAuth scopes the builder needs: reading products/collections and
/// reading/writing online store content (menus, pages).
pub const OAUTH_SCOPES: &str = "read_products,write_content,read_content";

/// Redirect target registered with the custom app. The desktop flow cannot
/// receive the redirect, so the user copies the `code` query parameter from
/// the browser's address bar after approving.
pub const OAUTH_REDIRECT_URI: &str = "https://menuforge.app/oauth/callback";

/// In-memory authentication state for the current run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthSession {
    pub shop: String,
    pub token: String,
    pub is_authenticated: bool,
}

impl AuthSession {
    pub fn logged_out() -> Self {
        Self::default()
    }

    pub fn from_stored(stored: StoredAuth) -> Self {
        Self {
            shop: stored.shop,
            token: stored.token,
            is_authenticated: true,
        }
    }
}

/// The persisted session entry: shop domain plus access token, stored as
/// plain JSON with no encryption. Two instances writing concurrently race;
/// last write wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAuth {
    pub shop: String,
    pub token: String,
}

/// Credentials kept only for the duration of an OAuth code exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCreds {
    pub shop: String,
    pub client_id: String,
    pub client_secret: String,
}

/// Returns the cache directory path: data_dir/menuforge/
pub fn cache_dir() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("menuforge");
    path
}

pub fn load_auth() -> Option<StoredAuth> {
    load_json(&cache_dir().join("auth.json"))
}

pub fn save_auth(auth: &StoredAuth) -> Result<()> {
    save_json(&cache_dir().join("auth.json"), auth)
}

pub fn load_creds() -> Option<StoredCreds> {
    load_json(&cache_dir().join("creds.json"))
}

pub fn save_creds(creds: &StoredCreds) -> Result<()> {
    save_json(&cache_dir().join("creds.json"), creds)
}

/// Delete both cache entries. Called on logout.
pub fn clear_session() {
    let dir = cache_dir();
    let _ = fs::remove_file(dir.join("auth.json"));
    let _ = fs::remove_file(dir.join("creds.json"));
}

fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Option<T> {
    let contents = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            eprintln!("Ignoring unreadable cache entry {}: {}", path.display(), e);
            None
        }
    }
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Normalize whatever the user typed into a bare `*.myshopify.com` domain.
pub fn normalize_shop_domain(input: &str) -> String {
    let shop = input.trim();
    let shop = shop
        .strip_prefix("https://")
        .or_else(|| shop.strip_prefix("http://"))
        .unwrap_or(shop);
    let shop = shop.trim_end_matches('/');
    if shop.is_empty() || shop.contains(".myshopify.com") {
        shop.to_string()
    } else {
        format!("{}.myshopify.com", shop)
    }
}

/// The admin authorization page the user approves the app on.
pub fn authorize_url(shop: &str, client_id: &str) -> String {
    format!(
        "https://{}/admin/oauth/authorize?client_id={}&scope={}&redirect_uri={}",
        shop, client_id, OAUTH_SCOPES, OAUTH_REDIRECT_URI
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_shop_domain() {
        assert_eq!(normalize_shop_domain("my-store"), "my-store.myshopify.com");
        assert_eq!(
            normalize_shop_domain("https://my-store.myshopify.com/"),
            "my-store.myshopify.com"
        );
        assert_eq!(
            normalize_shop_domain("http://my-store.myshopify.com"),
            "my-store.myshopify.com"
        );
        assert_eq!(normalize_shop_domain("  my-store  "), "my-store.myshopify.com");
        assert_eq!(normalize_shop_domain(""), "");
    }

    #[test]
    fn test_authorize_url_carries_scopes_and_redirect() {
        let url = authorize_url("my-store.myshopify.com", "abc123");
        assert!(url.starts_with("https://my-store.myshopify.com/admin/oauth/authorize?"));
        assert!(url.contains("client_id=abc123"));
        assert!(url.contains(OAUTH_SCOPES));
        assert!(url.contains("redirect_uri="));
    }

    #[test]
    fn test_auth_round_trip_in_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");

        let auth = StoredAuth {
            shop: "my-store.myshopify.com".to_string(),
            token: "shpat_test".to_string(),
        };
        save_json(&path, &auth).unwrap();
        let loaded: StoredAuth = load_json(&path).unwrap();
        assert_eq!(loaded, auth);
    }

    #[test]
    fn test_corrupt_cache_entry_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_json::<StoredAuth>(&path).is_none());
    }

    #[test]
    fn test_from_stored_marks_authenticated() {
        let session = AuthSession::from_stored(StoredAuth {
            shop: "s.myshopify.com".to_string(),
            token: "t".to_string(),
        });
        assert!(session.is_authenticated);
        assert_eq!(session.shop, "s.myshopify.com");
    }
}
