//! Chamber runtime: one canvas, one frame loop and one input queue per
//! mounted chamber. Dropping a [`Mounted`] tears all of it down.

mod digitizer;
mod field;
mod ink;
mod kaleidoscope;
mod radar;

use crate::audio::AudioEngine;
use crate::constants::POSE_RETRY_MS;
use crate::dom::{self, Listener};
use crate::events;
use crate::frame::{FrameLoop, FrameTick};
use crate::overlay;
use crate::pose::HandsPoseProvider;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sensorium_core::constants::HAND_CLEAR_AFTER_EMPTY_FRAMES;
use sensorium_core::keymap::ChamberAction;
use sensorium_core::{
    ChamberId, Pointer, PointerSource, PoseFrame, PoseProvider, PoseStatus, ResizeWatch,
    ToneEvent, Viewport,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use web_sys as web;

/// UI-originated input, queued by listeners and drained at frame start.
#[derive(Clone, Debug)]
pub enum Input {
    PointerMove { id: i32, pos: Vec2 },
    PointerUp { id: i32 },
    Tap { pos: Vec2 },
    Action(ChamberAction),
    /// Text of a preset file picked by the user.
    PresetLoaded(String),
}

pub type InputQueue = Rc<RefCell<VecDeque<Input>>>;
pub type SharedVideo = Rc<RefCell<Option<web::HtmlVideoElement>>>;

/// Everything a chamber may touch during one frame.
pub struct Env<'a> {
    pub document: &'a web::Document,
    pub ctx: &'a web::CanvasRenderingContext2d,
    pub canvas: &'a web::HtmlCanvasElement,
    pub viewport: Viewport,
    /// Present only once the camera delivers frames.
    pub video: Option<web::HtmlVideoElement>,
    pub audio: &'a AudioEngine,
    pub rng: &'a mut StdRng,
    pub tones: &'a mut Vec<ToneEvent>,
    pub queue: &'a InputQueue,
    pub tick: FrameTick,
}

pub trait Chamber {
    fn id(&self) -> ChamberId;

    /// Rebuild size-dependent state; called before the first frame and on
    /// every viewport change.
    fn resize(&mut self, _env: &mut Env) {}

    fn tap(&mut self, _pos: Vec2, _env: &mut Env) {}

    fn action(&mut self, action: ChamberAction, env: &mut Env);

    fn preset_loaded(&mut self, _json: &str, _env: &mut Env) {}

    fn frame(&mut self, pointers: &[Pointer], env: &mut Env);

    /// Short HUD summary of the current settings.
    fn status(&self) -> String;
}

fn create(id: ChamberId) -> Box<dyn Chamber> {
    match id {
        ChamberId::Field => Box::new(field::FieldChamber::default()),
        ChamberId::Digitizer => Box::new(digitizer::DigitizerChamber::default()),
        ChamberId::Radar => Box::new(radar::RadarChamber::default()),
        ChamberId::Kaleidoscope => Box::new(kaleidoscope::KaleidoscopeChamber::default()),
        ChamberId::Ink => Box::new(ink::InkChamber::default()),
    }
}

struct Runner {
    chamber: Box<dyn Chamber>,
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    hud: Option<web::Element>,
    hud_text: String,
    audio: Rc<AudioEngine>,
    video: SharedVideo,
    queue: InputQueue,
    pointers: PointerSource,
    pose: Option<Rc<RefCell<HandsPoseProvider>>>,
    pose_mailbox: Rc<RefCell<Option<PoseFrame>>>,
    pose_retry_at: f64,
    watch: ResizeWatch,
    rng: StdRng,
    tones: Vec<ToneEvent>,
}

impl Runner {
    fn frame(&mut self, tick: FrameTick) {
        let viewport = dom::sync_canvas_to_window(&self.canvas);
        let video = self
            .video
            .borrow()
            .as_ref()
            .filter(|v| dom::video_ready(v))
            .cloned();

        self.service_pose(&video, viewport, tick);

        let inputs: Vec<Input> = self.queue.borrow_mut().drain(..).collect();
        let mut env = Env {
            document: &self.document,
            ctx: &self.ctx,
            canvas: &self.canvas,
            viewport,
            video,
            audio: &self.audio,
            rng: &mut self.rng,
            tones: &mut self.tones,
            queue: &self.queue,
            tick,
        };

        if self.watch.observe(viewport) {
            self.chamber.resize(&mut env);
        }
        for input in inputs {
            match input {
                Input::PointerMove { id, pos } => self.pointers.touch_move(id, pos),
                Input::PointerUp { id } => self.pointers.touch_end(id),
                Input::Tap { pos } => self.chamber.tap(pos, &mut env),
                Input::Action(a) => self.chamber.action(a, &mut env),
                Input::PresetLoaded(json) => self.chamber.preset_loaded(&json, &mut env),
            }
        }

        let pointers = self.pointers.snapshot();
        self.chamber.frame(&pointers, &mut env);
        self.pointers.end_frame();

        for tone in self.tones.drain(..) {
            self.audio.play_tone(&tone);
        }
        self.refresh_hud();
    }

    fn service_pose(
        &mut self,
        video: &Option<web::HtmlVideoElement>,
        viewport: Viewport,
        tick: FrameTick,
    ) {
        let Some(pose) = &self.pose else {
            return;
        };
        if let Some(frame) = self.pose_mailbox.borrow_mut().take() {
            self.pointers.ingest_pose(&frame, viewport);
        }
        let status = pose.borrow().status();
        if status == PoseStatus::Unavailable && tick.now_ms >= self.pose_retry_at {
            self.pose_retry_at = tick.now_ms + POSE_RETRY_MS;
            if let Err(e) = pose.borrow_mut().start() {
                log::debug!("[pose] {}; retrying", e);
            }
        }
        if let Some(v) = video {
            pose.borrow().pump(v);
        }
    }

    fn refresh_hud(&mut self) {
        let Some(hud) = &self.hud else {
            return;
        };
        let mut status = self.chamber.status();
        if let Some(pose) = &self.pose {
            let pose_text = match pose.borrow().status() {
                PoseStatus::Running => "hands on",
                PoseStatus::Unavailable => "hands loading",
                PoseStatus::Ready | PoseStatus::Stopped => "hands off",
            };
            status = format!("{status} | {pose_text}");
        }
        if !self.audio.is_initialized() {
            status.push_str(" | muted");
        }
        if status != self.hud_text {
            overlay::update_hud(hud, self.chamber.id().label(), &status);
            self.hud_text = status;
        }
    }
}

/// A live chamber. Dropping it stops the loop, removes the listeners, stops
/// the pose pipeline and removes the canvas.
pub struct Mounted {
    id: ChamberId,
    queue: InputQueue,
    pose: Option<Rc<RefCell<HandsPoseProvider>>>,
    canvas: web::HtmlCanvasElement,
    listeners: Vec<Listener>,
    frame_loop: FrameLoop,
}

impl Mounted {
    pub fn id(&self) -> ChamberId {
        self.id
    }

    pub fn send(&self, input: Input) {
        self.queue.borrow_mut().push_back(input);
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.frame_loop.cancel();
        self.listeners.clear();
        if let Some(pose) = &self.pose {
            pose.borrow_mut().stop();
        }
        self.canvas.remove();
        log::info!("[shell] unmounted {}", self.id);
    }
}

/// Create the canvas, input wiring and frame loop for `id` under `root`.
pub fn mount(
    id: ChamberId,
    document: &web::Document,
    root: &web::Element,
    audio: Rc<AudioEngine>,
    video: SharedVideo,
) -> Option<Mounted> {
    let (canvas, ctx) = dom::create_canvas(document, root)?;
    let queue: InputQueue = Rc::new(RefCell::new(VecDeque::new()));
    let listeners = events::pointer::wire(&canvas, &queue);

    let pose_mailbox: Rc<RefCell<Option<PoseFrame>>> = Rc::new(RefCell::new(None));
    let (pose, clear_after) = match id {
        ChamberId::Field => (true, 0),
        ChamberId::Ink => (true, HAND_CLEAR_AFTER_EMPTY_FRAMES),
        _ => (false, 0),
    };
    let pose = pose.then(|| {
        let mut provider = HandsPoseProvider::new();
        let mailbox = pose_mailbox.clone();
        provider.on_results(Box::new(move |frame| {
            *mailbox.borrow_mut() = Some(frame);
        }));
        Rc::new(RefCell::new(provider))
    });

    let mut runner = Runner {
        chamber: create(id),
        document: document.clone(),
        canvas: canvas.clone(),
        ctx,
        hud: document.get_element_by_id("hud"),
        hud_text: String::new(),
        audio,
        video,
        queue: queue.clone(),
        pointers: PointerSource::new(clear_after),
        pose: pose.clone(),
        pose_mailbox,
        pose_retry_at: 0.0,
        watch: ResizeWatch::default(),
        rng: StdRng::from_entropy(),
        tones: Vec::new(),
    };
    let frame_loop = FrameLoop::start(move |tick| runner.frame(tick));
    log::info!("[shell] mounted {}", id);

    Some(Mounted {
        id,
        queue,
        pose,
        canvas,
        listeners,
        frame_loop,
    })
}
