use fltk::{app, prelude::*};

use menu_forge::app::messages::Message;
use menu_forge::app::state::AppState;
use menu_forge::ui::dialogs::login::LoginDialog;
use menu_forge::ui::main_window::build_main_window;
use menu_forge::ui::menu::build_menu;

fn main() {
    let a = app::App::default().with_scheme(app::Scheme::Gtk);
    let (sender, receiver) = app::channel::<Message>();

    let mut widgets = build_main_window(&sender);
    build_menu(&mut widgets.menu, &sender);
    widgets.wind.show();

    let login = LoginDialog::new(&sender);

    let mut state = AppState::new(widgets, login, sender);
    state.startup();

    while a.wait() {
        if let Some(msg) = receiver.recv() {
            match msg {
                // Session
                Message::LoginDirect { shop, token } => state.login_direct(shop, token),
                Message::OauthAuthorize { shop, client_id, client_secret } => {
                    state.oauth_authorize(shop, client_id, client_secret)
                }
                Message::OauthExchange { code } => state.oauth_exchange(code),
                Message::AuthResult(result) => state.auth_result(result),
                Message::Logout => state.logout(),

                // Resource catalog
                Message::RefreshCatalog => state.refresh_catalog(),
                Message::CatalogLoaded(result) => state.catalog_loaded(result),
                Message::SearchChanged => state.rebuild_resource_list(),
                Message::AddSelectedResource => state.add_selected_resource(),

                // Tree structure
                Message::AddRootGroup => state.add_root_group(),
                Message::SelectNode(id) => state.select_node(id),
                Message::EditNode(id) => state.edit_node(id),
                Message::DeleteSelected => state.delete_selected(),
                Message::BeginDrag(id) => state.begin_drag(id),
                Message::DropOn(id) => state.drop_on(id),

                // Export
                Message::PushMenu => state.push_menu(),
                Message::PushFinished(result) => state.push_finished(result),
                Message::ResetPushStatus => state.reset_push_status(),

                Message::Quit => {
                    app::quit();
                }
            }
        }
    }
}
