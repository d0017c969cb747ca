use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use fltk::{
    app::{self, Sender},
    enums::Color,
    prelude::*,
    tree::{Tree, TreeItem},
};

use crate::gateway::{self, StoreAuth};
use crate::gateway::menu::CreateMenuRequest;
use crate::ui::dialogs::edit_item::show_edit_item_dialog;
use crate::ui::dialogs::login::LoginDialog;
use crate::ui::main_window::MainWidgets;

use super::catalog::{ResourceCatalog, ResourceItem, ResourceKind};
use super::drag::DragReorder;
use super::error::AppError;
use super::export::export_forest;
use super::messages::Message;
use super::selection::Selection;
use super::session::{self, AuthSession, StoredAuth};
use super::tree::{Forest, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushStatus {
    Idle,
    Pushing,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Info,
    Success,
    Warning,
    Error,
}

/// Main application coordinator. Owns the current forest snapshot and the
/// widgets, and applies exactly one mutation per dispatched message. After
/// every structural change the tree view is rebuilt from the snapshot;
/// nothing in the UI derives state on its own.
pub struct AppState {
    pub forest: Forest,
    pub selection: Selection,
    pub drag: DragReorder,
    pub catalog: ResourceCatalog,
    pub auth: AuthSession,
    pub push_status: PushStatus,
    pub sender: Sender<Message>,
    pub widgets: MainWidgets,
    pub login: LoginDialog,
    /// Catalog rows currently shown, aligned line-for-line with the browser.
    filtered: Vec<ResourceItem>,
}

impl AppState {
    pub fn new(widgets: MainWidgets, login: LoginDialog, sender: Sender<Message>) -> Self {
        Self {
            forest: Forest::new(),
            selection: Selection::new(),
            drag: DragReorder::new(),
            catalog: ResourceCatalog::new(),
            auth: AuthSession::logged_out(),
            push_status: PushStatus::Idle,
            sender,
            widgets,
            login,
            filtered: Vec::new(),
        }
    }

    /// Read the cached session once at startup. A cached token goes
    /// straight to the builder; otherwise the connect window comes up.
    pub fn startup(&mut self) {
        if let Some(creds) = session::load_creds() {
            self.login.prefill(&creds);
        }
        match session::load_auth() {
            Some(stored) => {
                self.auth = AuthSession::from_stored(stored);
                self.update_shop_label();
                self.refresh_catalog();
            }
            None => {
                self.update_shop_label();
                self.login.show();
            }
        }
    }

    pub fn notify(&mut self, message: &str, kind: Notice) {
        let color = match kind {
            Notice::Info => Color::from_rgb(80, 80, 80),
            Notice::Success => Color::from_rgb(0, 130, 60),
            Notice::Warning => Color::from_rgb(180, 120, 0),
            Notice::Error => Color::from_rgb(180, 40, 40),
        };
        self.widgets.status_frame.set_label_color(color);
        self.widgets.status_frame.set_label(&format!("  {}", message));
        self.widgets.status_frame.redraw();
    }

    // --- Session lifecycle ---

    pub fn login_direct(&mut self, shop: String, token: String) {
        let shop = session::normalize_shop_domain(&shop);
        let token = token.trim().to_string();
        if shop.is_empty() || token.is_empty() {
            self.notify("Enter both the store URL and an access token.", Notice::Warning);
            return;
        }
        let stored = StoredAuth { shop, token };
        if let Err(e) = session::save_auth(&stored) {
            self.notify(&format!("Failed to cache session: {}", e), Notice::Error);
        }
        self.apply_auth(stored);
    }

    pub fn oauth_authorize(&mut self, shop: String, client_id: String, client_secret: String) {
        let shop = session::normalize_shop_domain(&shop);
        if shop.is_empty() || client_id.is_empty() || client_secret.is_empty() {
            self.notify("Please fill in all fields.", Notice::Warning);
            return;
        }
        let creds = session::StoredCreds {
            shop: shop.clone(),
            client_id: client_id.clone(),
            client_secret,
        };
        if let Err(e) = session::save_creds(&creds) {
            self.notify(&format!("Failed to cache app credentials: {}", e), Notice::Error);
            return;
        }
        let url = session::authorize_url(&shop, &client_id);
        match open::that(&url) {
            Ok(_) => self.notify(
                "Approve the app in your browser, then paste the code below.",
                Notice::Info,
            ),
            Err(e) => self.notify(&format!("Could not open browser: {}", e), Notice::Error),
        }
    }

    pub fn oauth_exchange(&mut self, code: String) {
        let code = code.trim().to_string();
        if code.is_empty() {
            self.notify("Paste the authorization code first.", Notice::Warning);
            return;
        }
        let Some(creds) = session::load_creds() else {
            self.notify(
                "Authorize in the browser first so the app credentials are cached.",
                Notice::Warning,
            );
            return;
        };
        self.notify("Exchanging authorization code...", Notice::Info);
        let s = self.sender;
        thread::spawn(move || {
            let result = gateway::oauth::exchange_token(
                &creds.shop,
                &creds.client_id,
                &creds.client_secret,
                &code,
            )
            .map(|token| StoredAuth {
                shop: creds.shop.clone(),
                token,
            })
            .map_err(|e| e.to_string());
            s.send(Message::AuthResult(result));
        });
    }

    pub fn auth_result(&mut self, result: Result<StoredAuth, String>) {
        match result {
            Ok(stored) => {
                if let Err(e) = session::save_auth(&stored) {
                    self.notify(&format!("Failed to cache session: {}", e), Notice::Error);
                }
                self.apply_auth(stored);
            }
            Err(message) => self.notify(&message, Notice::Error),
        }
    }

    fn apply_auth(&mut self, stored: StoredAuth) {
        self.auth = AuthSession::from_stored(stored);
        self.login.hide();
        self.login.reset();
        self.update_shop_label();
        self.notify(&format!("Connected to {}.", self.auth.shop), Notice::Success);
        self.refresh_catalog();
    }

    /// Drop the cached session and every piece of in-memory state scoped
    /// to it: forest, catalog, selection, drag source.
    pub fn logout(&mut self) {
        session::clear_session();
        self.auth = AuthSession::logged_out();
        self.forest = Forest::new();
        self.catalog.clear();
        self.filtered.clear();
        self.selection.clear();
        self.drag.cancel();
        self.push_status = PushStatus::Idle;
        self.update_push_button();
        self.update_shop_label();
        self.rebuild_resource_list();
        self.rebuild_tree();
        self.login.reset();
        self.login.show();
        self.notify("Logged out.", Notice::Info);
    }

    fn update_shop_label(&mut self) {
        if self.auth.is_authenticated {
            let shop = self.auth.shop.clone();
            self.widgets.shop_label.set_label_color(Color::from_rgb(0, 130, 60));
            self.widgets.shop_label.set_label(&shop);
        } else {
            self.widgets.shop_label.set_label_color(Color::from_rgb(110, 110, 110));
            self.widgets.shop_label.set_label("Not connected");
        }
        self.widgets.shop_label.redraw();
    }

    // --- Resource catalog ---

    /// Fetch collections and pages on a worker thread; the merged result
    /// arrives back as a `CatalogLoaded` message. The builder stays
    /// editable while the request is outstanding, and a second refresh is
    /// not deduplicated against the first.
    pub fn refresh_catalog(&mut self) {
        if !self.auth.is_authenticated {
            self.notify("Connect to a store first.", Notice::Warning);
            return;
        }
        let auth = StoreAuth {
            shop: self.auth.shop.clone(),
            token: self.auth.token.clone(),
        };
        self.notify("Loading store resources...", Notice::Info);
        let s = self.sender;
        thread::spawn(move || {
            let result = gateway::resources::fetch_collections(Some(&auth))
                .and_then(|mut items| {
                    gateway::resources::fetch_pages(Some(&auth)).map(|pages| {
                        items.extend(pages);
                        items
                    })
                })
                .map_err(|e| e.to_string());
            s.send(Message::CatalogLoaded(result));
        });
    }

    pub fn catalog_loaded(&mut self, result: Result<Vec<ResourceItem>, String>) {
        match result {
            Ok(items) => {
                let count = items.len();
                self.catalog.set_items(items);
                self.rebuild_resource_list();
                self.notify(&format!("Loaded {} store resources.", count), Notice::Success);
            }
            Err(message) => {
                self.notify(&format!("Failed to fetch resources: {}", message), Notice::Error);
            }
        }
    }

    pub fn rebuild_resource_list(&mut self) {
        let query = self.widgets.search.value();
        self.filtered = self
            .catalog
            .filtered(&query)
            .into_iter()
            .cloned()
            .collect();
        self.widgets.resource_browser.clear();
        for item in &self.filtered {
            let line = match item.kind {
                ResourceKind::Collection => format!(
                    "{}  ({} products)",
                    item.title,
                    item.products_count.unwrap_or(0)
                ),
                ResourceKind::Page => format!("{}  (page)", item.title),
            };
            self.widgets.resource_browser.add(&line);
        }
    }

    /// Append the highlighted catalog row under the current anchor. An
    /// invalid local action (no row, no anchor) is absorbed as a warning
    /// with no state change.
    pub fn add_selected_resource(&mut self) {
        let line = self.widgets.resource_browser.value();
        if line <= 0 {
            self.notify("Pick a resource from the list first.", Notice::Warning);
            return;
        }
        let Some(resource) = self.filtered.get((line - 1) as usize).cloned() else {
            return;
        };
        let Some(anchor) = self.selection.selected() else {
            self.notify("Select a group or item on the right first!", Notice::Warning);
            return;
        };
        match self.forest.add_child(anchor, &resource) {
            Ok((next, _)) => {
                self.forest = next;
                self.rebuild_tree();
            }
            Err(e) => self.notify(&e.to_string(), Notice::Warning),
        }
    }

    // --- Tree structure ---

    pub fn add_root_group(&mut self) {
        let Some(name) = fltk::dialog::input_default("Group name:", "") else {
            return;
        };
        let name = name.trim().to_string();
        if name.is_empty() {
            return;
        }
        let (next, id) = self.forest.add_root_group(&name);
        self.forest = next;
        self.selection.select(id);
        self.rebuild_tree();
    }

    pub fn select_node(&mut self, id: NodeId) {
        if !self.forest.contains(id) {
            return;
        }
        self.selection.select(id);
        self.rebuild_tree();
    }

    pub fn edit_node(&mut self, id: NodeId) {
        let Some(node) = self.forest.node(id) else {
            return;
        };
        let (title, url) = (node.title.clone(), node.url.clone());
        self.selection.begin_edit(id);
        if let Some(edit) = show_edit_item_dialog(&title, &url) {
            self.forest = self.forest.update_node(id, &edit);
        }
        self.selection.end_edit();
        self.rebuild_tree();
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selection.selected() else {
            self.notify("Select an item to delete.", Notice::Warning);
            return;
        };
        let (next, removed) = self.forest.delete_node(id);
        self.forest = next;
        self.selection.forget(&removed);
        self.drag.forget(&removed);
        self.rebuild_tree();
    }

    pub fn begin_drag(&mut self, id: NodeId) {
        self.drag.begin(id);
    }

    pub fn drop_on(&mut self, target: NodeId) {
        match self.drag.drop_on(&self.forest, target) {
            Ok(next) => {
                self.forest = next;
                self.rebuild_tree();
                self.notify("Menu item moved.", Notice::Success);
            }
            Err(AppError::UserAction(message)) => self.notify(&message, Notice::Warning),
            Err(e) => self.notify(&e.to_string(), Notice::Error),
        }
    }

    // --- Export ---

    /// Validate client-side, then push on a worker thread. The forest
    /// stays editable while the request is in flight, and a failed push
    /// leaves it exactly as it was.
    pub fn push_menu(&mut self) {
        if self.forest.is_empty() {
            return;
        }
        if !self.auth.is_authenticated {
            self.notify("Connect to a store first.", Notice::Warning);
            return;
        }
        if self.push_status == PushStatus::Pushing {
            return;
        }
        let items = match export_forest(&self.forest) {
            Ok(items) => items,
            Err(e) => {
                self.push_status = PushStatus::Error;
                self.update_push_button();
                self.notify(&e.to_string(), Notice::Error);
                return;
            }
        };
        self.push_status = PushStatus::Pushing;
        self.update_push_button();
        self.notify("Pushing menu to Shopify...", Notice::Info);

        let auth = StoreAuth {
            shop: self.auth.shop.clone(),
            token: self.auth.token.clone(),
        };
        let request = CreateMenuRequest {
            title: "Mega Menu (From App)".to_string(),
            handle: format!("mega-menu-app-{}", current_timestamp()),
            items,
        };
        let s = self.sender;
        thread::spawn(move || {
            let result = gateway::menu::create_menu(Some(&auth), &request)
                .map_err(|e| e.to_string());
            s.send(Message::PushFinished(result));
        });
    }

    pub fn push_finished(&mut self, result: Result<gateway::menu::CreatedMenu, String>) {
        match result {
            Ok(menu) => {
                self.push_status = PushStatus::Success;
                self.update_push_button();
                self.notify(
                    &format!("Menu created successfully in Shopify! (handle: {})", menu.handle),
                    Notice::Success,
                );
                let s = self.sender;
                app::add_timeout3(3.0, move |_| s.send(Message::ResetPushStatus));
            }
            Err(message) => {
                self.push_status = PushStatus::Error;
                self.update_push_button();
                self.notify(&format!("Error: {}", message), Notice::Error);
            }
        }
    }

    pub fn reset_push_status(&mut self) {
        if self.push_status != PushStatus::Pushing {
            self.push_status = PushStatus::Idle;
            self.update_push_button();
        }
    }

    fn update_push_button(&mut self) {
        let button = &mut self.widgets.push_button;
        match self.push_status {
            PushStatus::Pushing => {
                button.set_label("Pushing...");
                button.deactivate();
            }
            PushStatus::Success => {
                button.set_label("Created!");
                button.activate();
            }
            PushStatus::Idle | PushStatus::Error => {
                button.set_label("Push to Shopify");
                button.activate();
            }
        }
        button.redraw();
    }

    // --- Tree view ---

    /// Rebuild the whole tree widget from the current snapshot. Derived
    /// bits (level badge, selection marker) are recomputed here every time
    /// rather than patched incrementally.
    pub fn rebuild_tree(&mut self) {
        let forest = self.forest.clone();
        let selection = self.selection;
        let tree = &mut self.widgets.tree;
        tree.clear();
        let mut relabel: Vec<(TreeItem, String)> = Vec::new();
        build_level(tree, &forest, &selection, forest.roots(), "", 1, &mut relabel);
        // Labels go on after the whole build: the id-based paths used for
        // inserts above must stay resolvable until every child is placed.
        for (mut item, label) in relabel {
            item.set_label(&label);
        }
        tree.redraw();
    }
}

fn build_level(
    tree: &mut Tree,
    forest: &Forest,
    selection: &Selection,
    ids: &[NodeId],
    prefix: &str,
    depth: usize,
    relabel: &mut Vec<(TreeItem, String)>,
) {
    for id in ids {
        let Some(node) = forest.node(*id) else {
            continue;
        };
        let path = if prefix.is_empty() {
            id.to_string()
        } else {
            format!("{}/{}", prefix, id)
        };
        if let Some(mut item) = tree.add(&path) {
            item.set_user_data(*id);
            let badge = if depth == 1 {
                "Header".to_string()
            } else {
                format!("Level {}", depth - 1)
            };
            let marker = if selection.selected() == Some(*id) { "\u{25b8} " } else { "" };
            relabel.push((item, format!("{}{}  \u{2014}  {}", marker, node.title, badge)));
        }
        build_level(tree, forest, selection, &node.children, &path, depth + 1, relabel);
    }
}

/// Get current Unix timestamp
fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
