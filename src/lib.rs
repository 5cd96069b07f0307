#![cfg(target_arch = "wasm32")]
use sensorium_core::ChamberId;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod camera;
mod chambers;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod pose;
mod shell;

use shell::Shell;

/// Chamber named by the URL hash, falling back to the particle field.
fn initial_chamber(window: &web::Window) -> ChamberId {
    let hash = window.location().hash().unwrap_or_default();
    if hash.is_empty() {
        return ChamberId::Field;
    }
    hash.parse().unwrap_or_else(|e| {
        log::warn!("[shell] {}; starting with {}", e, ChamberId::Field);
        ChamberId::Field
    })
}

fn wire_start_overlay(document: &web::Document, shell: &Rc<RefCell<Shell>>) {
    let s = shell.clone();
    dom::add_click_listener(document, "start-overlay", move || Shell::start(&s));
}

fn wire_nav_buttons(document: &web::Document, shell: &Rc<RefCell<Shell>>) {
    for chamber in ChamberId::ALL {
        let s = shell.clone();
        dom::add_click_listener(document, &format!("nav-{chamber}"), move || {
            Shell::switch(&s, chamber)
        });
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sensorium starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let root = match document.get_element_by_id("chamber-root") {
        Some(el) => el,
        None => document
            .body()
            .map(web::Element::from)
            .ok_or_else(|| anyhow::anyhow!("missing #chamber-root and <body>"))?,
    };

    let initial = initial_chamber(&window);
    let shell = Rc::new(RefCell::new(Shell::new(document.clone(), root, initial)));

    wire_start_overlay(&document, &shell);
    wire_nav_buttons(&document, &shell);
    events::keyboard::wire_global_keydown(shell.clone());

    Shell::switch(&shell, initial);
    Ok(())
}
