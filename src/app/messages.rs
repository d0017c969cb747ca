use crate::app::session::StoredAuth;
use crate::app::tree::NodeId;
use crate::gateway::menu::CreatedMenu;

use super::catalog::ResourceItem;

/// All messages that can be sent through the FLTK channel.
/// Each widget callback sends one of these; the dispatch loop in main
/// handles them. Every tree mutation maps to exactly one message, so a
/// snapshot is only ever replaced between two user actions, never during
/// one.
#[derive(Debug, Clone)]
pub enum Message {
    // Session
    LoginDirect { shop: String, token: String },
    OauthAuthorize { shop: String, client_id: String, client_secret: String },
    OauthExchange { code: String },
    AuthResult(Result<StoredAuth, String>),
    Logout,

    // Resource catalog
    RefreshCatalog,
    CatalogLoaded(Result<Vec<ResourceItem>, String>),
    SearchChanged,
    AddSelectedResource,

    // Tree structure
    AddRootGroup,
    SelectNode(NodeId),
    EditNode(NodeId),
    DeleteSelected,
    BeginDrag(NodeId),
    DropOn(NodeId),

    // Export
    PushMenu,
    PushFinished(Result<CreatedMenu, String>),
    ResetPushStatus,

    Quit,
}
