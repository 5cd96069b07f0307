use super::{Chamber, Env};
use crate::constants::{INK_BRUSH_PX, INK_FADE_ALPHA, INK_VIDEO_ALPHA};
use crate::dom;
use sensorium_core::ink::{lane_center_y, lane_for_y, lane_hue, InkFlow, LANE_COUNT};
use sensorium_core::keymap::ChamberAction;
use sensorium_core::{ChamberId, Pointer, Viewport};
use std::f64::consts::TAU;
use web_sys as web;

#[derive(Default)]
pub struct InkChamber {
    ink: InkFlow,
}

fn draw_lanes(ctx: &web::CanvasRenderingContext2d, vp: Viewport, pointers: &[Pointer]) {
    let w = vp.width as f64;
    ctx.set_font("10px monospace");
    ctx.set_text_align("left");
    ctx.set_text_baseline("bottom");
    for lane in 0..LANE_COUNT {
        let y = lane_center_y(lane, vp.height) as f64;
        let occupied = pointers
            .iter()
            .any(|p| lane_for_y(p.pos.y, vp.height) == lane);
        let alpha = if occupied { 0.35 } else { 0.06 };
        let hue = lane_hue(lane);
        dom::stroke_style(ctx, &format!("hsla({hue:.0},80%,60%,{alpha})"));
        ctx.set_line_width(1.0);
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(w, y);
        ctx.stroke();
        if occupied {
            dom::fill_style(ctx, &format!("hsla({hue:.0},80%,70%,0.8)"));
            _ = ctx.fill_text(&format!("NOTE {}", lane + 1), 8.0, y - 4.0);
        }
    }
}

impl InkChamber {
    fn draw_trails(&self, ctx: &web::CanvasRenderingContext2d) {
        ctx.set_line_cap("round");
        for p in self.ink.particles() {
            let Some(first) = p.history.first() else {
                continue;
            };
            dom::stroke_style(ctx, &format!("hsla({:.0},80%,60%,{:.2})", p.hue, p.life));
            ctx.set_line_width((p.size * p.life).max(0.1) as f64);
            ctx.begin_path();
            ctx.move_to(first.x as f64, first.y as f64);
            for pt in p.history.iter().skip(1) {
                ctx.line_to(pt.x as f64, pt.y as f64);
            }
            ctx.line_to(p.pos.x as f64, p.pos.y as f64);
            ctx.stroke();
        }
    }
}

impl Chamber for InkChamber {
    fn id(&self) -> ChamberId {
        ChamberId::Ink
    }

    fn action(&mut self, action: ChamberAction, _env: &mut Env) {
        if let ChamberAction::Ink(cmd) = action {
            self.ink.apply(cmd);
        }
    }

    fn frame(&mut self, pointers: &[Pointer], env: &mut Env) {
        let vp = env.viewport;
        self.ink.tick(pointers, vp, &mut *env.rng, &mut *env.tones);

        let ctx = env.ctx;
        let (w, h) = (vp.width as f64, vp.height as f64);
        dom::fill_style(ctx, &format!("rgba(0,0,0,{INK_FADE_ALPHA})"));
        ctx.fill_rect(0.0, 0.0, w, h);

        if let Some(video) = &env.video {
            ctx.save();
            ctx.set_global_alpha(INK_VIDEO_ALPHA);
            _ = ctx.translate(w, 0.0);
            _ = ctx.scale(-1.0, 1.0);
            _ = ctx.draw_image_with_html_video_element_and_dw_and_dh(video, 0.0, 0.0, w, h);
            ctx.restore();
        }

        draw_lanes(ctx, vp, pointers);
        self.draw_trails(ctx);

        for p in pointers {
            let lane = lane_for_y(p.pos.y, vp.height);
            dom::fill_style(ctx, &format!("hsl({:.0},90%,70%)", lane_hue(lane)));
            ctx.begin_path();
            _ = ctx.arc(p.pos.x as f64, p.pos.y as f64, INK_BRUSH_PX, 0.0, TAU);
            ctx.fill();
        }
    }

    fn status(&self) -> String {
        let c = self.ink.config;
        format!(
            "intensity {} | sound {} | {} particles",
            c.intensity.name(),
            if c.sound_enabled { "on" } else { "off" },
            self.ink.particles().len()
        )
    }
}
