use fltk::{
    app::Sender,
    button::Button,
    enums::{Align, Color},
    frame::Frame,
    input::{Input, SecretInput},
    prelude::*,
    window::Window,
};

use crate::app::messages::Message;
use crate::app::session::StoredCreds;

/// The connect window. Stays alive for the whole run (shown while logged
/// out, hidden once a session exists) so that worker results keep flowing
/// through the main dispatch loop while it is up.
///
/// Two paths in: paste an Admin API access token directly, or run the
/// OAuth dance — open the authorize page in the browser, then paste the
/// `code` query parameter back here.
pub struct LoginDialog {
    pub wind: Window,
    shop: Input,
    token: SecretInput,
    client_id: Input,
    client_secret: SecretInput,
    code: Input,
}

impl LoginDialog {
    pub fn new(sender: &Sender<Message>) -> Self {
        let mut wind = Window::default()
            .with_size(400, 430)
            .with_label("Connect to Shopify")
            .center_screen();

        Frame::default().with_pos(20, 15).with_size(120, 24).with_label("Store URL:")
            .set_align(Align::Left | Align::Inside);
        let shop = Input::default().with_pos(20, 40).with_size(360, 28);

        // Direct token entry
        let mut section = Frame::default().with_pos(20, 80).with_size(360, 22)
            .with_label("Connect with an existing Admin API token");
        section.set_align(Align::Left | Align::Inside);
        section.set_label_color(Color::from_rgb(90, 90, 90));
        let token = SecretInput::default().with_pos(20, 105).with_size(360, 28);
        let mut connect_btn = Button::default().with_pos(20, 140).with_size(360, 30)
            .with_label("Connect");

        // OAuth path
        let mut section = Frame::default().with_pos(20, 190).with_size(360, 22)
            .with_label("Or authorize a Custom App");
        section.set_align(Align::Left | Align::Inside);
        section.set_label_color(Color::from_rgb(90, 90, 90));
        let mut client_id = Input::default().with_pos(20, 215).with_size(360, 28);
        client_id.set_tooltip("Client ID from the Shopify app setup");
        let mut client_secret = SecretInput::default().with_pos(20, 250).with_size(360, 28);
        client_secret.set_tooltip("Client secret");
        let mut authorize_btn = Button::default().with_pos(20, 285).with_size(360, 30)
            .with_label("Authorize in Browser");

        let mut code_hint = Frame::default().with_pos(20, 325).with_size(360, 22)
            .with_label("Paste the code from the redirect URL:");
        code_hint.set_align(Align::Left | Align::Inside);
        code_hint.set_label_size(12);
        let code = Input::default().with_pos(20, 350).with_size(360, 28);
        let mut exchange_btn = Button::default().with_pos(20, 385).with_size(360, 30)
            .with_label("Exchange Code");

        wind.end();
        wind.make_resizable(false);

        {
            let s = *sender;
            let shop = shop.clone();
            let token = token.clone();
            connect_btn.set_callback(move |_| {
                s.send(Message::LoginDirect {
                    shop: shop.value(),
                    token: token.value(),
                });
            });
        }
        {
            let s = *sender;
            let shop = shop.clone();
            let client_id = client_id.clone();
            let client_secret = client_secret.clone();
            authorize_btn.set_callback(move |_| {
                s.send(Message::OauthAuthorize {
                    shop: shop.value(),
                    client_id: client_id.value(),
                    client_secret: client_secret.value(),
                });
            });
        }
        {
            let s = *sender;
            let code = code.clone();
            exchange_btn.set_callback(move |_| {
                s.send(Message::OauthExchange { code: code.value() });
            });
        }

        wind.set_callback(|w| w.hide());

        Self {
            wind,
            shop,
            token,
            client_id,
            client_secret,
            code,
        }
    }

    pub fn show(&mut self) {
        self.wind.show();
    }

    pub fn hide(&mut self) {
        self.wind.hide();
    }

    /// Restore a previously cached shop/app credential set into the form.
    pub fn prefill(&mut self, creds: &StoredCreds) {
        self.shop.set_value(&creds.shop);
        self.client_id.set_value(&creds.client_id);
        self.client_secret.set_value(&creds.client_secret);
    }

    /// Wipe the form (called on logout so secrets don't linger on screen).
    pub fn reset(&mut self) {
        self.token.set_value("");
        self.client_secret.set_value("");
        self.code.set_value("");
    }
}
