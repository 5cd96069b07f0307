use sensorium_core::Viewport;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// An event listener that is removed from its target when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Option<Closure<dyn FnMut(web::Event)>>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target: target.clone(),
                event,
                closure: Some(closure),
            }),
            Err(e) => {
                log::error!("[dom] add {} listener failed: {:?}", event, e);
                None
            }
        }
    }

    /// Keep the listener for the lifetime of the page.
    pub fn forget(mut self) {
        if let Some(closure) = self.closure.take() {
            closure.forget();
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Some(closure) = self.closure.take() {
            _ = self
                .target
                .remove_event_listener_with_callback(self.event, closure.as_ref().unchecked_ref());
        }
    }
}

/// Register a click handler on an element id for the lifetime of the page.
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        if let Some(l) = Listener::new(&el, "click", move |_| handler()) {
            l.forget();
        }
    }
}

/// Create a full-window canvas inside `parent` and return it with its 2D
/// context.
pub fn create_canvas(
    document: &web::Document,
    parent: &web::Element,
) -> Option<(web::HtmlCanvasElement, web::CanvasRenderingContext2d)> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .ok()?
        .dyn_into()
        .ok()?;
    _ = canvas.set_attribute(
        "style",
        "position:fixed;inset:0;width:100%;height:100%;touch-action:none;display:block",
    );
    parent.append_child(&canvas).ok()?;
    let ctx = context_2d(&canvas)?;
    Some((canvas, ctx))
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<web::CanvasRenderingContext2d>().ok())
}

/// Match the canvas backing store to the window size and report the result.
pub fn sync_canvas_to_window(canvas: &web::HtmlCanvasElement) -> Viewport {
    let (w, h) = web::window()
        .map(|w| {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
            (width, height)
        })
        .unwrap_or((1.0, 1.0));
    let (w_px, h_px) = (w.max(1.0) as u32, h.max(1.0) as u32);
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    Viewport::new(w_px as f32, h_px as f32)
}

/// True once the element has a decoded frame to draw.
pub fn video_ready(video: &web::HtmlVideoElement) -> bool {
    video.ready_state() >= 2 && video.video_width() > 0 && video.video_height() > 0
}

#[allow(deprecated)]
pub fn fill_style(ctx: &web::CanvasRenderingContext2d, css: &str) {
    ctx.set_fill_style(&JsValue::from_str(css));
}

#[allow(deprecated)]
pub fn stroke_style(ctx: &web::CanvasRenderingContext2d, css: &str) {
    ctx.set_stroke_style(&JsValue::from_str(css));
}

#[allow(deprecated)]
pub fn fill_gradient(ctx: &web::CanvasRenderingContext2d, gradient: &web::CanvasGradient) {
    ctx.set_fill_style(gradient.as_ref());
}

/// Trigger a browser download of `href` as `file_name`.
pub fn download(document: &web::Document, href: &str, file_name: &str) {
    let anchor = match document
        .create_element("a")
        .ok()
        .and_then(|el| el.dyn_into::<web::HtmlAnchorElement>().ok())
    {
        Some(a) => a,
        None => {
            log::error!("[dom] could not create download link");
            return;
        }
    };
    anchor.set_href(href);
    anchor.set_download(file_name);
    anchor.click();
}

/// Download a text document through a data URL.
pub fn download_text(document: &web::Document, mime: &str, text: &str, file_name: &str) {
    let encoded: String = js_sys::encode_uri_component(text).into();
    download(document, &format!("data:{mime};charset=utf-8,{encoded}"), file_name);
}

/// Current time as an ISO-8601 string.
pub fn iso_timestamp() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

pub fn epoch_ms() -> u64 {
    js_sys::Date::now() as u64
}
