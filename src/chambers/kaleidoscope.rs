use super::{Chamber, Env};
use crate::dom;
use sensorium_core::kaleidoscope::{Kaleidoscope, Wedge};
use sensorium_core::keymap::ChamberAction;
use sensorium_core::{ChamberId, Pointer};
use web_sys as web;

#[derive(Default)]
pub struct KaleidoscopeChamber {
    scope: Kaleidoscope,
}

fn draw_wedge(
    ctx: &web::CanvasRenderingContext2d,
    video: &web::HtmlVideoElement,
    wedge: &Wedge,
    radius: f64,
    scale: f64,
    video_rotation: f64,
) {
    let (vw, vh) = (video.video_width() as f64, video.video_height() as f64);
    ctx.save();
    _ = ctx.rotate(wedge.rotation as f64);
    ctx.begin_path();
    ctx.move_to(0.0, 0.0);
    let half = wedge.half_angle as f64;
    _ = ctx.arc(0.0, 0.0, radius, -half, half);
    ctx.close_path();
    ctx.clip();
    if wedge.mirrored {
        _ = ctx.scale(1.0, -1.0);
    }
    _ = ctx.rotate(video_rotation);
    _ = ctx.scale(scale, scale);
    _ = ctx.draw_image_with_html_video_element(video, -vw * 0.5, -vh * 0.5);
    ctx.restore();
}

impl KaleidoscopeChamber {
    fn draw_placeholder(&self, env: &Env) {
        let ctx = env.ctx;
        let c = env.viewport.center();
        let (cx, cy) = (c.x as f64, c.y as f64);
        let r = env.viewport.half_diagonal() as f64;
        let (spokes, hue) = self.scope.placeholder();
        dom::stroke_style(ctx, &format!("hsl({:.0},50%,50%)", hue));
        ctx.set_line_width(2.0);
        ctx.begin_path();
        for a in spokes {
            let a = a as f64;
            ctx.move_to(cx, cy);
            ctx.line_to(cx + r * a.cos(), cy + r * a.sin());
        }
        ctx.stroke();

        dom::fill_style(ctx, "rgba(255,255,255,0.7)");
        ctx.set_font("16px monospace");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        _ = ctx.fill_text("WAITING FOR SOURCE", cx, cy);
    }
}

impl Chamber for KaleidoscopeChamber {
    fn id(&self) -> ChamberId {
        ChamberId::Kaleidoscope
    }

    fn action(&mut self, action: ChamberAction, _env: &mut Env) {
        if let ChamberAction::Kaleidoscope(cmd) = action {
            self.scope.config.apply(cmd);
        }
    }

    fn frame(&mut self, _pointers: &[Pointer], env: &mut Env) {
        self.scope.advance();
        let ctx = env.ctx;
        let vp = env.viewport;
        dom::fill_style(ctx, "#000");
        ctx.fill_rect(0.0, 0.0, vp.width as f64, vp.height as f64);

        let Some(video) = env.video.as_ref() else {
            self.draw_placeholder(env);
            return;
        };
        let c = vp.center();
        let radius = vp.half_diagonal() as f64;
        let scale = self.scope.video_scale(
            vp,
            video.video_width() as f32,
            video.video_height() as f32,
        ) as f64;
        let video_rotation = self.scope.video_rotation() as f64;

        ctx.save();
        _ = ctx.translate(c.x as f64, c.y as f64);
        for wedge in self.scope.wedges() {
            draw_wedge(ctx, video, &wedge, radius, scale, video_rotation);
        }
        ctx.restore();
    }

    fn status(&self) -> String {
        let c = self.scope.config;
        format!(
            "{} slices | zoom {:.1} | spin {:+.1}",
            c.slices, c.zoom, c.rotation_speed
        )
    }
}
