use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Timing for one display refresh.
#[derive(Clone, Copy, Debug)]
pub struct FrameTick {
    pub index: u64,
    pub dt: Duration,
    /// Wall clock in milliseconds, for slow colour cycles.
    pub now_ms: f64,
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` loop that stops when cancelled or dropped.
pub struct FrameLoop {
    closure: TickClosure,
    handle: Rc<Cell<Option<i32>>>,
}

fn request_frame(closure: &TickClosure) -> Option<i32> {
    let window = web::window()?;
    let cb = closure.borrow();
    let f = cb.as_ref()?;
    match window.request_animation_frame(f.as_ref().unchecked_ref()) {
        Ok(h) => Some(h),
        Err(e) => {
            log::error!("[frame] requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut(FrameTick) + 'static) -> Self {
        let closure: TickClosure = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));

        let closure_tick = closure.clone();
        let handle_tick = handle.clone();
        let mut last = Instant::now();
        let mut index = 0u64;
        *closure.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let now = Instant::now();
            let tick = FrameTick {
                index,
                dt: now - last,
                now_ms: instant::now(),
            };
            last = now;
            index += 1;
            on_frame(tick);
            handle_tick.set(request_frame(&closure_tick));
        }) as Box<dyn FnMut()>));

        handle.set(request_frame(&closure));
        Self { closure, handle }
    }

    /// Stop scheduling frames. Safe to call more than once.
    pub fn cancel(&self) {
        if let Some(h) = self.handle.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(h);
            }
        }
        // breaks the closure -> cell reference cycle
        self.closure.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
