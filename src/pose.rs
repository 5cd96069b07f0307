//! Hand pose provider backed by the `Hands` estimator global.
//!
//! The estimator script is loaded by the page; this binding never fails hard
//! when it is missing and instead reports `PoseStatus::Unavailable` so the
//! owner can retry later.

use crate::constants::*;
use js_sys::{Array, Function, Object, Reflect};
use sensorium_core::pose::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    type Hands;

    #[wasm_bindgen(method, js_name = setOptions)]
    fn set_options(this: &Hands, options: &JsValue);

    #[wasm_bindgen(method, js_name = onResults)]
    fn on_results(this: &Hands, callback: &JsValue);

    #[wasm_bindgen(method, catch)]
    fn send(this: &Hands, inputs: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn close(this: &Hands) -> Result<js_sys::Promise, JsValue>;
}

type SharedCallback = Rc<RefCell<Option<PoseCallback>>>;

pub struct HandsPoseProvider {
    hands: Option<Hands>,
    callback: SharedCallback,
    /// Results are dropped once this is cleared.
    live: Rc<Cell<bool>>,
    in_flight: Rc<Cell<bool>>,
    status: PoseStatus,
}

impl Default for HandsPoseProvider {
    fn default() -> Self {
        Self {
            hands: None,
            callback: Rc::new(RefCell::new(None)),
            live: Rc::new(Cell::new(false)),
            in_flight: Rc::new(Cell::new(false)),
            status: PoseStatus::Unavailable,
        }
    }
}

fn options() -> Result<Object, JsValue> {
    let o = Object::new();
    Reflect::set(&o, &"maxNumHands".into(), &POSE_MAX_HANDS.into())?;
    Reflect::set(&o, &"modelComplexity".into(), &POSE_MODEL_COMPLEXITY.into())?;
    Reflect::set(
        &o,
        &"minDetectionConfidence".into(),
        &POSE_MIN_DETECTION_CONFIDENCE.into(),
    )?;
    Reflect::set(
        &o,
        &"minTrackingConfidence".into(),
        &POSE_MIN_TRACKING_CONFIDENCE.into(),
    )?;
    Ok(o)
}

fn construct() -> Result<Hands, PoseError> {
    let ctor = Reflect::get(&js_sys::global(), &"Hands".into())
        .ok()
        .and_then(|v| v.dyn_into::<Function>().ok())
        .ok_or(PoseError::Unavailable)?;
    let locate = Closure::wrap(Box::new(|file: String| format!("{POSE_ASSET_BASE}{file}"))
        as Box<dyn Fn(String) -> String>)
    .into_js_value();
    let config = Object::new();
    Reflect::set(&config, &"locateFile".into(), &locate)
        .map_err(|e| PoseError::Backend(format!("{e:?}")))?;
    let instance = Reflect::construct(&ctor, &Array::of1(&config))
        .map_err(|e| PoseError::Backend(format!("{e:?}")))?;
    let hands: Hands = instance.unchecked_into();
    let opts = options().map_err(|e| PoseError::Backend(format!("{e:?}")))?;
    hands.set_options(&opts);
    Ok(hands)
}

fn number(obj: &JsValue, key: &str) -> Option<f32> {
    Reflect::get(obj, &key.into()).ok()?.as_f64().map(|v| v as f32)
}

/// Pull `multiHandLandmarks` out of a results object.
fn parse_results(results: &JsValue) -> PoseFrame {
    let Ok(list) = Reflect::get(results, &"multiHandLandmarks".into()) else {
        return PoseFrame::empty();
    };
    let Ok(list) = list.dyn_into::<Array>() else {
        return PoseFrame::empty();
    };
    list.iter()
        .filter_map(|hand| hand.dyn_into::<Array>().ok())
        .map(|points| {
            points
                .iter()
                .map(|p| Landmark {
                    x: number(&p, "x").unwrap_or(0.0),
                    y: number(&p, "y").unwrap_or(0.0),
                })
                .collect::<HandLandmarks>()
        })
        .collect()
}

impl HandsPoseProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current video frame unless a previous one is still being
    /// processed.
    pub fn pump(&self, video: &web::HtmlVideoElement) {
        let Some(hands) = self.hands.as_ref() else {
            return;
        };
        if self.status != PoseStatus::Running || self.in_flight.get() {
            return;
        }
        let inputs = Object::new();
        if Reflect::set(&inputs, &"image".into(), video).is_err() {
            return;
        }
        match hands.send(&inputs) {
            Ok(promise) => {
                self.in_flight.set(true);
                let in_flight = self.in_flight.clone();
                spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::debug!("[pose] send rejected: {:?}", e);
                    }
                    in_flight.set(false);
                });
            }
            Err(e) => log::warn!("[pose] send failed: {:?}", e),
        }
    }
}

impl PoseProvider for HandsPoseProvider {
    fn on_results(&mut self, callback: PoseCallback) {
        *self.callback.borrow_mut() = Some(callback);
    }

    fn start(&mut self) -> Result<(), PoseError> {
        if self.status == PoseStatus::Running {
            return Ok(());
        }
        if self.hands.is_none() {
            let hands = construct().map_err(|e| {
                self.status = PoseStatus::Unavailable;
                e
            })?;
            let callback = self.callback.clone();
            let live = self.live.clone();
            let sink = Closure::wrap(Box::new(move |results: JsValue| {
                if !live.get() {
                    return;
                }
                let frame = parse_results(&results);
                if let Some(cb) = callback.borrow_mut().as_mut() {
                    cb(frame);
                }
            }) as Box<dyn FnMut(JsValue)>)
            .into_js_value();
            hands.on_results(&sink);
            self.hands = Some(hands);
            self.status = PoseStatus::Ready;
        }
        self.live.set(true);
        self.status = PoseStatus::Running;
        log::info!("[pose] estimator running");
        Ok(())
    }

    fn stop(&mut self) {
        self.live.set(false);
        if let Some(hands) = self.hands.take() {
            if let Err(e) = hands.close() {
                log::debug!("[pose] close failed: {:?}", e);
            }
        }
        if self.status != PoseStatus::Unavailable {
            self.status = PoseStatus::Stopped;
        }
    }

    fn status(&self) -> PoseStatus {
        self.status
    }
}
