use serde::{Deserialize, Serialize};

use crate::app::export::{DEPTH_LIMIT_MESSAGE, ExportedItem, MAX_NESTING_DEPTH};

use super::{GatewayError, StoreAuth, UserError, admin_graphql, require_auth};

/// The create-menu request body: a title, a generated handle, and the
/// exported forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMenuRequest {
    pub title: String,
    pub handle: String,
    pub items: Vec<ExportedItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedMenu {
    pub id: String,
    pub handle: String,
}

const CREATE_MENU_MUTATION: &str = "\
mutation CreateMenu($title: String!, $handle: String!, $items: [MenuItemCreateInput!]!) {
  menuCreate(title: $title, handle: $handle, items: $items) {
    menu { id handle }
    userErrors { field message }
  }
}";

#[derive(Deserialize)]
struct MenuCreateData {
    #[serde(rename = "menuCreate")]
    menu_create: MenuCreatePayload,
}

#[derive(Deserialize)]
struct MenuCreatePayload {
    menu: Option<CreatedMenu>,
    #[serde(rename = "userErrors", default)]
    user_errors: Vec<UserError>,
}

/// Create the menu upstream. Authorization is checked before the body, the
/// depth bound is re-validated before any upstream call, and platform
/// field errors come back in the same structured shape as local ones.
pub fn create_menu(
    auth: Option<&StoreAuth>,
    request: &CreateMenuRequest,
) -> Result<CreatedMenu, GatewayError> {
    let auth = require_auth(auth)?;
    check_depth(&request.items, 1)?;

    let data: MenuCreateData = admin_graphql(auth, CREATE_MENU_MUTATION, Some(request))?;
    if !data.menu_create.user_errors.is_empty() {
        return Err(GatewayError::Validation(data.menu_create.user_errors));
    }
    data.menu_create
        .menu
        .ok_or_else(|| GatewayError::Upstream("Menu creation returned no menu".to_string()))
}

/// The authoritative depth walk: the same recursion the client-side export
/// runs, applied to the items as they arrived on the wire.
fn check_depth(items: &[ExportedItem], depth: usize) -> Result<(), GatewayError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(GatewayError::Validation(vec![UserError {
            field: vec!["items".to_string()],
            message: DEPTH_LIMIT_MESSAGE.to_string(),
        }]));
    }
    for item in items {
        if !item.items.is_empty() {
            check_depth(&item.items, depth + 1)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tree::LinkKind;

    fn leaf(title: &str) -> ExportedItem {
        ExportedItem {
            title: title.to_string(),
            kind: LinkKind::Collection,
            url: format!("/collections/{}", title.to_lowercase()),
            resource_id: Some(format!("gid://shopify/Collection/{}", title)),
            items: Vec::new(),
        }
    }

    fn group(title: &str, items: Vec<ExportedItem>) -> ExportedItem {
        ExportedItem {
            title: title.to_string(),
            kind: LinkKind::Http,
            url: "#".to_string(),
            resource_id: None,
            items,
        }
    }

    #[test]
    fn test_create_menu_requires_credentials_before_body() {
        let request = CreateMenuRequest {
            title: "Mega Menu".to_string(),
            handle: "mega-menu".to_string(),
            // Over-deep on purpose: the 401 must win over the 400
            items: vec![group("a", vec![group("b", vec![group("c", vec![leaf("d")])])])],
        };
        let err = create_menu(None, &request).unwrap_err();
        assert!(matches!(err, GatewayError::Unauthorized(_)));
        assert_eq!(err.status(), 401);
    }

    #[test]
    fn test_check_depth_allows_three_levels() {
        let items = vec![group("Men", vec![group("Shirts", vec![leaf("Casual")])])];
        assert!(check_depth(&items, 1).is_ok());
    }

    #[test]
    fn test_check_depth_rejects_level_four() {
        let items = vec![group(
            "Men",
            vec![group("Shirts", vec![group("Casual", vec![leaf("Linen")])])],
        )];
        let err = check_depth(&items, 1).unwrap_err();
        match &err {
            GatewayError::Validation(errors) => {
                assert_eq!(errors[0].field, vec!["items".to_string()]);
                assert_eq!(errors[0].message, DEPTH_LIMIT_MESSAGE);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn test_request_body_parses_from_wire_json() {
        let json = r##"{
            "title": "Mega Menu (From App)",
            "handle": "mega-menu-app-1700000000",
            "items": [
                { "title": "Men", "type": "HTTP", "url": "#", "items": [
                    { "title": "Shirts", "type": "COLLECTION",
                      "url": "/collections/shirts",
                      "resourceId": "gid://shopify/Collection/42" }
                ]}
            ]
        }"##;
        let request: CreateMenuRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.items[0].kind, LinkKind::Http);
        assert_eq!(request.items[0].items[0].kind, LinkKind::Collection);
        assert_eq!(
            request.items[0].items[0].resource_id.as_deref(),
            Some("gid://shopify/Collection/42")
        );
        assert!(request.items[0].items[0].items.is_empty());
        assert!(check_depth(&request.items, 1).is_ok());
    }
}
