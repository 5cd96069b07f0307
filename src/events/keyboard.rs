use crate::chambers::Input;
use crate::dom::{window_document, Listener};
use crate::overlay;
use crate::shell::Shell;
use sensorium_core::keymap::{action_for_key, KeyAction};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, shell: &Rc<RefCell<Shell>>) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let key = ev.key();
    let active = shell.borrow().active_id();
    match action_for_key(active, &key) {
        Some(KeyAction::Switch(id)) => Shell::switch(shell, id),
        Some(KeyAction::ToggleHelp) => {
            if let Some(doc) = window_document() {
                overlay::toggle_help(&doc);
            }
        }
        Some(KeyAction::Chamber(action)) => {
            log::debug!("[keys] {} -> {:?}", key, action);
            shell.borrow().send(Input::Action(action));
        }
        None => {}
    }
}

/// Install the page-wide keyboard handler.
pub fn wire_global_keydown(shell: Rc<RefCell<Shell>>) {
    let Some(window) = web::window() else {
        return;
    };
    let listener = Listener::new(&window, "keydown", move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() {
            handle_global_keydown(ev, &shell);
        }
    });
    if let Some(l) = listener {
        l.forget();
    }
}
