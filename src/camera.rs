use crate::constants::{CAMERA_IDEAL_HEIGHT, CAMERA_IDEAL_WIDTH};
use js_sys::{Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn ideal(value: u32) -> Result<Object, JsValue> {
    let o = Object::new();
    Reflect::set(&o, &"ideal".into(), &JsValue::from(value))?;
    Ok(o)
}

fn video_constraints() -> Result<web::MediaStreamConstraints, JsValue> {
    let video = Object::new();
    Reflect::set(&video, &"facingMode".into(), &"user".into())?;
    Reflect::set(&video, &"width".into(), &ideal(CAMERA_IDEAL_WIDTH)?)?;
    Reflect::set(&video, &"height".into(), &ideal(CAMERA_IDEAL_HEIGHT)?)?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_video(&video);
    constraints.set_audio(&JsValue::FALSE);
    Ok(constraints)
}

async fn open_stream() -> Result<web::MediaStream, JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let devices = window.navigator().media_devices()?;
    let promise = devices.get_user_media_with_constraints(&video_constraints()?)?;
    JsFuture::from(promise).await?.dyn_into()
}

/// Request the user-facing camera and attach it to a hidden, muted video
/// element shared by every chamber. Returns `None` on denial or absence.
pub async fn acquire(document: &web::Document) -> Option<web::HtmlVideoElement> {
    let stream = match open_stream().await {
        Ok(s) => s,
        Err(e) => {
            log::warn!("[camera] unavailable, continuing without video: {:?}", e);
            return None;
        }
    };
    let video: web::HtmlVideoElement = document.create_element("video").ok()?.dyn_into().ok()?;
    video.set_autoplay(true);
    video.set_muted(true);
    _ = video.set_attribute("playsinline", "");
    _ = video.set_attribute("style", "position:absolute;width:1px;height:1px;opacity:0;pointer-events:none");
    video.set_src_object(Some(&stream));
    if let Some(body) = document.body() {
        _ = body.append_child(&video);
    }
    if let Ok(p) = video.play() {
        if let Err(e) = JsFuture::from(p).await {
            log::warn!("[camera] play() rejected: {:?}", e);
        }
    }
    log::info!("[camera] stream attached");
    Some(video)
}
