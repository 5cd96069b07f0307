use super::{Chamber, Env};
use crate::constants::{FIELD_FADE_ALPHA, RETICLE_PX};
use crate::dom;
use sensorium_core::field::{FieldMode, ParticleField};
use sensorium_core::keymap::ChamberAction;
use sensorium_core::{ChamberId, Pointer, SpectrumMode};
use std::f64::consts::TAU;
use web_sys as web;

#[derive(Default)]
pub struct FieldChamber {
    field: ParticleField,
    spectrum: Vec<u8>,
}

/// Mirrored, desaturated camera frame behind the particles.
fn draw_backdrop(env: &Env, video: &web::HtmlVideoElement, opacity: f32) {
    let ctx = env.ctx;
    let (w, h) = (env.viewport.width as f64, env.viewport.height as f64);
    ctx.save();
    ctx.set_global_alpha(opacity as f64);
    ctx.set_filter("grayscale(100%)");
    _ = ctx.translate(w, 0.0);
    _ = ctx.scale(-1.0, 1.0);
    if let Err(e) = ctx.draw_image_with_html_video_element_and_dw_and_dh(video, 0.0, 0.0, w, h) {
        log::debug!("[field] backdrop draw failed: {:?}", e);
    }
    ctx.restore();
}

fn draw_reticle(ctx: &web::CanvasRenderingContext2d, pointer: &Pointer, mode: FieldMode) {
    let (x, y) = (pointer.pos.x as f64, pointer.pos.y as f64);
    dom::stroke_style(ctx, "rgba(255,255,255,0.8)");
    ctx.set_line_width(2.0);
    ctx.begin_path();
    match mode {
        FieldMode::Attract => {
            ctx.move_to(x - RETICLE_PX, y);
            ctx.line_to(x + RETICLE_PX, y);
            ctx.move_to(x, y - RETICLE_PX);
            ctx.line_to(x, y + RETICLE_PX);
        }
        FieldMode::Repel => {
            _ = ctx.arc(x, y, RETICLE_PX, 0.0, TAU);
        }
    }
    ctx.stroke();
}

impl Chamber for FieldChamber {
    fn id(&self) -> ChamberId {
        ChamberId::Field
    }

    fn resize(&mut self, env: &mut Env) {
        self.field.resize(env.viewport, &mut *env.rng);
    }

    fn action(&mut self, action: ChamberAction, _env: &mut Env) {
        if let ChamberAction::Field(cmd) = action {
            self.field.controls.apply(cmd);
        }
    }

    fn frame(&mut self, pointers: &[Pointer], env: &mut Env) {
        env.audio.spectrum(SpectrumMode::Frequency, &mut self.spectrum);
        let step = self.field.step(pointers, &self.spectrum, env.tick.now_ms);
        env.audio.set_expressive_filter(step.expression);

        let ctx = env.ctx;
        let (w, h) = (env.viewport.width as f64, env.viewport.height as f64);
        dom::fill_style(ctx, &format!("rgba(0,0,0,{FIELD_FADE_ALPHA})"));
        ctx.fill_rect(0.0, 0.0, w, h);

        let controls = self.field.controls;
        if let Some(video) = &env.video {
            if controls.video_opacity > 0.0 {
                draw_backdrop(env, video, controls.video_opacity);
            }
        }

        for p in self.field.particles() {
            dom::fill_style(
                ctx,
                &format!("hsl({:.0},80%,{:.0}%)", p.hue.rem_euclid(360.0), p.lightness),
            );
            let s = p.size as f64 * 2.0;
            ctx.fill_rect(p.pos.x as f64 - s * 0.5, p.pos.y as f64 - s * 0.5, s, s);
        }

        for pointer in pointers {
            draw_reticle(ctx, pointer, controls.mode);
        }
    }

    fn status(&self) -> String {
        let c = self.field.controls;
        let mode = match c.mode {
            FieldMode::Attract => "attract",
            FieldMode::Repel => "repel",
        };
        format!(
            "{} | force {:.1} | video {:.0}%",
            mode,
            c.force,
            c.video_opacity * 100.0
        )
    }
}
