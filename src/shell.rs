//! Navigation shell: owns the audio engine and the shared camera stream and
//! keeps exactly one chamber mounted.

use crate::audio::AudioEngine;
use crate::camera;
use crate::chambers::{self, Input, Mounted, SharedVideo};
use crate::overlay;
use sensorium_core::ChamberId;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub struct Shell {
    document: web::Document,
    root: web::Element,
    audio: Rc<AudioEngine>,
    video: SharedVideo,
    mounted: Option<Mounted>,
    active: ChamberId,
    started: bool,
}

impl Shell {
    pub fn new(document: web::Document, root: web::Element, initial: ChamberId) -> Self {
        Self {
            document,
            root,
            audio: Rc::new(AudioEngine::new()),
            video: Rc::new(RefCell::new(None)),
            mounted: None,
            active: initial,
            started: false,
        }
    }

    pub fn active_id(&self) -> ChamberId {
        self.active
    }

    /// Queue input for the mounted chamber; dropped when nothing is mounted.
    pub fn send(&self, input: Input) {
        if let Some(m) = &self.mounted {
            m.send(input);
        }
    }

    /// Tear down the current chamber, then mount `id` on a fresh canvas.
    pub fn switch(shell: &Rc<RefCell<Shell>>, id: ChamberId) {
        let mut guard = shell.borrow_mut();
        let s = &mut *guard;
        if s.mounted.as_ref().is_some_and(|m| m.id() == id) {
            return;
        }
        s.mounted = None;
        s.active = id;
        s.mounted = chambers::mount(
            id,
            &s.document,
            &s.root,
            s.audio.clone(),
            s.video.clone(),
        );
        if s.mounted.is_none() {
            log::error!("[shell] failed to mount {}", id);
        }
        let all: Vec<&str> = ChamberId::ALL.iter().map(|c| c.as_str()).collect();
        overlay::set_active_nav(&s.document, id.as_str(), &all);
        if let Some(window) = web::window() {
            _ = window.location().set_hash(id.as_str());
        }
    }

    /// First user gesture: unlock audio and ask for the camera once.
    pub fn start(shell: &Rc<RefCell<Shell>>) {
        let mut guard = shell.borrow_mut();
        let s = &mut *guard;
        if !s.started {
            s.started = true;
            s.audio.initialize();
            let document = s.document.clone();
            let video = s.video.clone();
            spawn_local(async move {
                if let Some(v) = camera::acquire(&document).await {
                    *video.borrow_mut() = Some(v);
                }
            });
        }
        s.audio.resume();
        overlay::hide_start(&s.document);
    }
}
