use crate::chambers::{Input, InputQueue};
use crate::dom::Listener;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer id used for the mouse; touch identifiers are non-negative.
pub const MOUSE_ID: i32 = -1;

#[inline]
fn canvas_px(canvas: &web::HtmlCanvasElement, client_x: f64, client_y: f64) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let (w, h) = (rect.width().max(1.0), rect.height().max(1.0));
    let sx = (client_x - rect.left()) / w * canvas.width() as f64;
    let sy = (client_y - rect.top()) / h * canvas.height() as f64;
    Vec2::new(sx as f32, sy as f32)
}

fn changed_touches(ev: &web::TouchEvent) -> impl Iterator<Item = web::Touch> {
    let list = ev.changed_touches();
    (0..list.length()).filter_map(move |i| list.get(i))
}

/// Translate touch and mouse events on `canvas` into queued inputs.
///
/// Press starts a pointer and also registers a tap; the listeners are
/// removed when the returned guards drop.
pub fn wire(canvas: &web::HtmlCanvasElement, queue: &InputQueue) -> Vec<Listener> {
    let mut out = Vec::new();

    let touch = |kind: &'static str, end: bool| {
        let canvas = canvas.clone();
        let queue = queue.clone();
        Listener::new(&canvas.clone(), kind, move |ev: web::Event| {
            let Some(ev) = ev.dyn_ref::<web::TouchEvent>() else {
                return;
            };
            ev.prevent_default();
            let mut q = queue.borrow_mut();
            for t in changed_touches(ev) {
                let id = t.identifier();
                if end {
                    q.push_back(Input::PointerUp { id });
                    continue;
                }
                let pos = canvas_px(&canvas, t.client_x() as f64, t.client_y() as f64);
                if kind == "touchstart" {
                    q.push_back(Input::Tap { pos });
                }
                q.push_back(Input::PointerMove { id, pos });
            }
        })
    };
    out.extend(touch("touchstart", false));
    out.extend(touch("touchmove", false));
    out.extend(touch("touchend", true));
    out.extend(touch("touchcancel", true));

    let mouse = |kind: &'static str| {
        let canvas = canvas.clone();
        let queue = queue.clone();
        Listener::new(&canvas.clone(), kind, move |ev: web::Event| {
            let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
                return;
            };
            let pos = canvas_px(&canvas, ev.client_x() as f64, ev.client_y() as f64);
            let mut q = queue.borrow_mut();
            match kind {
                "mousedown" => {
                    q.push_back(Input::Tap { pos });
                    q.push_back(Input::PointerMove { id: MOUSE_ID, pos });
                }
                "mousemove" if ev.buttons() & 1 == 1 => {
                    q.push_back(Input::PointerMove { id: MOUSE_ID, pos });
                }
                "mouseup" | "mouseleave" => q.push_back(Input::PointerUp { id: MOUSE_ID }),
                _ => {}
            }
        })
    };
    for kind in ["mousedown", "mousemove", "mouseup", "mouseleave"] {
        out.extend(mouse(kind));
    }
    out
}
