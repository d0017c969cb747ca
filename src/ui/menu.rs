use fltk::{
    app::Sender,
    enums::Shortcut,
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::messages::Message;

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>) {
    let s = sender;

    // File
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Quit) });

    // Menu structure
    menu.add("Menu/Add Root Group...", Shortcut::Ctrl | 'g', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::AddRootGroup) });
    menu.add("Menu/Delete Selected", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::DeleteSelected) });

    // Store
    menu.add("Store/Refresh Resources", Shortcut::Ctrl | 'r', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::RefreshCatalog) });
    menu.add("Store/Push to Shopify", Shortcut::Ctrl | 'p', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::PushMenu) });
    menu.add("Store/Log Out", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Logout) });
}
