use super::{Chamber, Env, Input, InputQueue};
use crate::constants::*;
use crate::dom::{self, Listener};
use glam::Vec2;
use sensorium_core::constants::RADAR_STEPS;
use sensorium_core::keymap::ChamberAction;
use sensorium_core::preset;
use sensorium_core::radar::{RadarCommand, RadarSequencer};
use sensorium_core::{ChamberId, Pointer, Viewport};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const SCAN_COLORS: [&str; 2] = ["0,255,100", "0,200,255"];

/// Hidden `<input type=file>` used to pick preset documents.
struct FilePicker {
    input: web::HtmlInputElement,
    _change: Listener,
}

impl FilePicker {
    fn new(document: &web::Document, queue: &InputQueue) -> Option<Self> {
        let input: web::HtmlInputElement =
            document.create_element("input").ok()?.dyn_into().ok()?;
        input.set_type("file");
        input.set_accept(".json,application/json");
        let queue = queue.clone();
        let reader = input.clone();
        let change = Listener::new(&input, "change", move |_| {
            let Some(file) = reader.files().and_then(|f| f.get(0)) else {
                return;
            };
            reader.set_value("");
            let queue = queue.clone();
            spawn_local(async move {
                match JsFuture::from(file.text()).await {
                    Ok(text) => {
                        if let Some(json) = text.as_string() {
                            queue.borrow_mut().push_back(Input::PresetLoaded(json));
                        }
                    }
                    Err(e) => log::warn!("[preset] could not read file: {:?}", e),
                }
            });
        })?;
        Some(Self {
            input,
            _change: change,
        })
    }
}

#[derive(Default)]
pub struct RadarChamber {
    seq: RadarSequencer,
    picker: Option<FilePicker>,
}

impl RadarChamber {
    fn save_preset(&self, env: &Env) {
        let doc = preset::save(&self.seq.config(), self.seq.nodes(), dom::epoch_ms());
        match preset::to_json(&doc) {
            Ok(json) => {
                let name = preset::preset_file_name(doc.timestamp);
                dom::download_text(env.document, "application/json", &json, &name);
                log::info!("[preset] saved {} nodes to {}", doc.nodes.len(), name);
            }
            Err(e) => log::error!("[preset] {}", e),
        }
    }

    fn open_picker(&mut self, env: &Env) {
        if self.picker.is_none() {
            self.picker = FilePicker::new(env.document, env.queue);
        }
        match &self.picker {
            Some(p) => p.input.click(),
            None => log::error!("[preset] file picker unavailable"),
        }
    }
}

fn draw_grid(ctx: &web::CanvasRenderingContext2d, vp: Viewport) {
    let (w, h) = (vp.width as f64, vp.height as f64);
    let step = if vp.is_compact() {
        RADAR_GRID_PX_COMPACT
    } else {
        RADAR_GRID_PX
    };
    dom::stroke_style(ctx, "rgba(0,255,100,0.06)");
    ctx.set_line_width(1.0);
    ctx.begin_path();
    let mut x = 0.0;
    while x <= w {
        ctx.move_to(x, 0.0);
        ctx.line_to(x, h);
        x += step;
    }
    let mut y = 0.0;
    while y <= h {
        ctx.move_to(0.0, y);
        ctx.line_to(w, y);
        y += step;
    }
    ctx.stroke();

    // pitch guides, one per quantizer step
    dom::stroke_style(ctx, "rgba(0,200,255,0.05)");
    ctx.begin_path();
    for i in 0..RADAR_STEPS {
        let y = h - (i as f64 + 0.5) / RADAR_STEPS as f64 * h;
        ctx.move_to(0.0, y);
        ctx.line_to(w, y);
    }
    ctx.stroke();
}

fn draw_rings(ctx: &web::CanvasRenderingContext2d, vp: Viewport) {
    let c = vp.center();
    let (cx, cy) = (c.x as f64, c.y as f64);
    let (rings, step) = if vp.is_compact() {
        (RADAR_RINGS_COMPACT, RADAR_RING_STEP_PX_COMPACT)
    } else {
        (RADAR_RINGS, RADAR_RING_STEP_PX)
    };
    dom::stroke_style(ctx, "rgba(0,255,100,0.15)");
    ctx.set_line_width(1.0);
    for i in 1..=rings {
        ctx.begin_path();
        _ = ctx.arc(cx, cy, step * i as f64, 0.0, TAU);
        ctx.stroke();
    }
}

fn draw_scan(ctx: &web::CanvasRenderingContext2d, vp: Viewport, angle: f32, rgb: &str) {
    let c = vp.center();
    let (cx, cy) = (c.x as f64, c.y as f64);
    let r = vp.half_diagonal() as f64;
    let a = angle as f64;
    if let Ok(gradient) = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, r) {
        _ = gradient.add_color_stop(0.0, &format!("rgba({rgb},0.35)"));
        _ = gradient.add_color_stop(1.0, &format!("rgba({rgb},0)"));
        dom::fill_gradient(ctx, &gradient);
        ctx.begin_path();
        ctx.move_to(cx, cy);
        _ = ctx.arc(cx, cy, r, a - RADAR_WEDGE_RAD, a);
        ctx.close_path();
        ctx.fill();
    }
    dom::stroke_style(ctx, &format!("rgba({rgb},0.9)"));
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(cx, cy);
    ctx.line_to(cx + r * a.cos(), cy + r * a.sin());
    ctx.stroke();
}

impl Chamber for RadarChamber {
    fn id(&self) -> ChamberId {
        ChamberId::Radar
    }

    fn tap(&mut self, pos: Vec2, env: &mut Env) {
        let vp = env.viewport;
        self.seq.push(RadarCommand::Tap {
            x: (pos.x / vp.width).clamp(0.0, 1.0),
            y: (pos.y / vp.height).clamp(0.0, 1.0),
        });
    }

    fn action(&mut self, action: ChamberAction, env: &mut Env) {
        match action {
            ChamberAction::Radar(cmd) => self.seq.push(cmd),
            ChamberAction::SavePreset => self.save_preset(env),
            ChamberAction::LoadPreset => self.open_picker(env),
            _ => {}
        }
    }

    fn preset_loaded(&mut self, json: &str, _env: &mut Env) {
        match preset::load(json) {
            Ok((config, nodes)) => {
                log::info!("[preset] loaded {} nodes", nodes.len());
                self.seq.push(RadarCommand::Replace { config, nodes });
            }
            Err(e) => {
                log::warn!("[preset] rejected: {}", e);
                if let Some(w) = web::window() {
                    _ = w.alert_with_message(&format!("Could not load preset: {e}"));
                }
            }
        }
    }

    fn frame(&mut self, _pointers: &[Pointer], env: &mut Env) {
        let vp = env.viewport;
        self.seq.tick(vp, &mut *env.rng, &mut *env.tones);

        let ctx = env.ctx;
        dom::fill_style(ctx, "#050505");
        ctx.fill_rect(0.0, 0.0, vp.width as f64, vp.height as f64);
        draw_grid(ctx, vp);
        draw_rings(ctx, vp);
        let (a, b) = self.seq.scan_angles();
        draw_scan(ctx, vp, a, SCAN_COLORS[0]);
        draw_scan(ctx, vp, b, SCAN_COLORS[1]);

        let c = vp.center();
        for node in self.seq.nodes() {
            let (x, y) = ((node.x * vp.width) as f64, (node.y * vp.height) as f64);
            let life = node.life as f64;
            dom::stroke_style(ctx, &format!("rgba(0,255,100,{:.2})", 0.1 + life * 0.4));
            ctx.set_line_width(1.0);
            ctx.begin_path();
            ctx.move_to(c.x as f64, c.y as f64);
            ctx.line_to(x, y);
            ctx.stroke();

            ctx.set_shadow_blur(20.0 * life);
            ctx.set_shadow_color("rgba(0,255,100,1)");
            dom::fill_style(ctx, if node.active { "#ffffff" } else { "#00ff64" });
            ctx.begin_path();
            _ = ctx.arc(x, y, RADAR_NODE_RADIUS_PX * (1.0 + life), 0.0, TAU);
            ctx.fill();
            ctx.set_shadow_blur(0.0);
        }
    }

    fn status(&self) -> String {
        let config = self.seq.config();
        format!(
            "{} nodes | {} | {} | tempo {:.2}",
            self.seq.nodes().len(),
            config.scale.name(),
            config.waveform.name(),
            config.tempo
        )
    }
}
