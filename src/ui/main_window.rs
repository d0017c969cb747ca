use std::cell::Cell;
use std::rc::Rc;

use fltk::{
    app::{self, Sender},
    browser::HoldBrowser,
    button::Button,
    enums::{Align, Color, Event, FrameType, Key},
    frame::Frame,
    group::Flex,
    input::Input,
    menu::MenuBar,
    prelude::*,
    tree::{Tree, TreeItem},
    window::Window,
};

use crate::app::messages::Message;
use crate::app::tree::NodeId;

pub struct MainWidgets {
    pub wind: Window,
    pub menu: MenuBar,
    pub shop_label: Frame,
    pub search: Input,
    pub resource_browser: HoldBrowser,
    pub add_button: Button,
    pub add_group_button: Button,
    pub push_button: Button,
    pub tree: Tree,
    pub status_frame: Frame,
}

pub fn build_main_window(sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(100, 100, 920, 620, "MenuForge");
    wind.set_xclass("MenuForge");

    let mut flex = Flex::new(0, 0, 920, 620, None);
    flex.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    let mut body = Flex::default();
    body.set_type(fltk::group::FlexType::Row);
    body.set_margin(8);
    body.set_spacing(8);

    // Left panel: the resource catalog
    let mut left = Flex::default();
    left.set_type(fltk::group::FlexType::Column);
    left.set_spacing(6);
    body.fixed(&left, 300);

    let mut shop_label = Frame::default().with_label("Not connected");
    shop_label.set_align(Align::Left | Align::Inside);
    shop_label.set_label_size(12);
    left.fixed(&shop_label, 22);

    let mut search = Input::default();
    search.set_tooltip("Search collections and pages by title");
    {
        let s = *sender;
        search.set_trigger(fltk::enums::CallbackTrigger::Changed);
        search.set_callback(move |_| s.send(Message::SearchChanged));
    }
    left.fixed(&search, 28);

    let mut resource_browser = HoldBrowser::default();
    {
        let s = *sender;
        resource_browser.set_callback(move |_| {
            if app::event_clicks() {
                s.send(Message::AddSelectedResource);
            }
        });
    }

    let mut add_button = Button::default().with_label("Add under selected item");
    {
        let s = *sender;
        add_button.set_callback(move |_| s.send(Message::AddSelectedResource));
    }
    left.fixed(&add_button, 32);
    left.end();

    // Right panel: toolbar + menu structure
    let mut right = Flex::default();
    right.set_type(fltk::group::FlexType::Column);
    right.set_spacing(6);

    let mut toolbar = Flex::default();
    toolbar.set_type(fltk::group::FlexType::Row);
    toolbar.set_spacing(8);
    right.fixed(&toolbar, 34);

    let mut hint = Frame::default().with_label("Select an item to nest resources under it");
    hint.set_align(Align::Left | Align::Inside);
    hint.set_label_size(12);
    hint.set_label_color(Color::from_rgb(110, 110, 110));

    let mut add_group_button = Button::default().with_label("Add Root Group");
    {
        let s = *sender;
        add_group_button.set_callback(move |_| s.send(Message::AddRootGroup));
    }
    toolbar.fixed(&add_group_button, 130);

    let mut push_button = Button::default().with_label("Push to Shopify");
    {
        let s = *sender;
        push_button.set_callback(move |_| s.send(Message::PushMenu));
    }
    toolbar.fixed(&push_button, 140);
    toolbar.end();

    let mut tree = Tree::default();
    tree.set_show_root(false);
    wire_tree(&mut tree, sender);
    right.end();

    body.end();

    let mut status_frame = Frame::default();
    status_frame.set_frame(FrameType::FlatBox);
    status_frame.set_align(Align::Left | Align::Inside);
    status_frame.set_label_size(12);
    flex.fixed(&status_frame, 24);

    flex.end();
    wind.resizable(&flex);
    wind.end();

    {
        let s = *sender;
        wind.set_callback(move |_| s.send(Message::Quit));
    }

    MainWidgets {
        wind,
        menu,
        shop_label,
        search,
        resource_browser,
        add_button,
        add_group_button,
        push_button,
        tree,
        status_frame,
    }
}

/// The node id attached to a tree item during the last rebuild, if any.
pub fn item_node_id(item: &TreeItem) -> Option<NodeId> {
    // The rebuild attaches a NodeId to every item it creates and nothing
    // else ever touches tree user data, so the type is known here.
    unsafe { item.user_data::<NodeId>() }
}

/// Click selects, double-click edits, press-drag-release relocates,
/// Delete removes. Each gesture becomes one message; nothing mutates here.
fn wire_tree(tree: &mut Tree, sender: &Sender<Message>) {
    {
        let s = *sender;
        tree.set_callback(move |t| {
            if let Some(item) = t.callback_item() {
                if let Some(id) = item_node_id(&item) {
                    if app::event_clicks() {
                        s.send(Message::EditNode(id));
                    } else {
                        s.send(Message::SelectNode(id));
                    }
                }
            }
        });
    }

    let s = *sender;
    let drag_armed = Rc::new(Cell::new(false));
    tree.handle(move |t, ev| match ev {
        Event::Push => {
            if let Some(item) = t.find_clicked(false) {
                if let Some(id) = item_node_id(&item) {
                    s.send(Message::BeginDrag(id));
                }
            }
            drag_armed.set(false);
            // Let the tree run its own selection handling
            false
        }
        Event::Drag => {
            drag_armed.set(true);
            true
        }
        Event::Released => {
            if drag_armed.replace(false) {
                if let Some(item) = t.find_clicked(false) {
                    if let Some(id) = item_node_id(&item) {
                        s.send(Message::DropOn(id));
                    }
                }
                true
            } else {
                false
            }
        }
        Event::KeyDown if app::event_key() == Key::Delete => {
            s.send(Message::DeleteSelected);
            true
        }
        _ => false,
    });
}
