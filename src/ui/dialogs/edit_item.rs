use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    button::Button,
    frame::Frame,
    input::Input,
    prelude::*,
    window::Window,
};

use crate::app::tree::NodeEdit;

/// Show the inline-edit dialog for a node's title and URL. Returns the
/// edit to apply if the user clicked Save, `None` on cancel. The node id
/// is not editable.
pub fn show_edit_item_dialog(title: &str, url: &str) -> Option<NodeEdit> {
    let mut dialog = Window::default()
        .with_size(360, 170)
        .with_label("Edit Menu Item")
        .center_screen();
    dialog.make_modal(true);

    Frame::default().with_pos(20, 20).with_size(60, 28).with_label("Title:");
    let mut title_input = Input::default().with_pos(90, 20).with_size(250, 28);
    title_input.set_value(title);

    Frame::default().with_pos(20, 60).with_size(60, 28).with_label("URL:");
    let mut url_input = Input::default().with_pos(90, 60).with_size(250, 28);
    url_input.set_value(url);

    let mut save_btn = Button::default().with_pos(160, 120).with_size(85, 30).with_label("Save");
    let mut cancel_btn = Button::default().with_pos(255, 120).with_size(85, 30).with_label("Cancel");

    dialog.end();
    dialog.make_resizable(false);
    dialog.show();

    let result: Rc<RefCell<Option<NodeEdit>>> = Rc::new(RefCell::new(None));

    let result_save = result.clone();
    let dialog_save = dialog.clone();
    save_btn.set_callback(move |_| {
        let title = title_input.value().trim().to_string();
        let url = url_input.value().trim().to_string();
        if title.is_empty() {
            fltk::dialog::message_default("Title cannot be empty");
            return;
        }
        *result_save.borrow_mut() = Some(NodeEdit {
            title: Some(title),
            url: Some(url),
        });
        dialog_save.clone().hide();
    });

    let dialog_cancel = dialog.clone();
    cancel_btn.set_callback(move |_| {
        dialog_cancel.clone().hide();
    });

    dialog.set_callback(|w| w.hide());

    super::run_dialog(&dialog);

    result.borrow().clone()
}
