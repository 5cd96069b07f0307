use super::{Chamber, Env};
use crate::constants::GLYPH_FONT_SCALE;
use crate::dom;
use sensorium_core::digitizer::*;
use sensorium_core::keymap::ChamberAction;
use sensorium_core::{ChamberId, Pointer, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Offscreen canvas the video is downsampled into, one pixel per cell.
struct Sampler {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl Sampler {
    fn new(document: &web::Document) -> Option<Self> {
        let canvas: web::HtmlCanvasElement =
            document.create_element("canvas").ok()?.dyn_into().ok()?;
        let ctx = dom::context_2d(&canvas)?;
        Some(Self { canvas, ctx })
    }

    fn sample(&self, video: &web::HtmlVideoElement, grid: GlyphGrid) -> Option<Vec<u8>> {
        let (cols, rows) = (grid.cols as u32, grid.rows as u32);
        if self.canvas.width() != cols {
            self.canvas.set_width(cols);
        }
        if self.canvas.height() != rows {
            self.canvas.set_height(rows);
        }
        self.ctx
            .draw_image_with_html_video_element_and_dw_and_dh(
                video,
                0.0,
                0.0,
                cols as f64,
                rows as f64,
            )
            .ok()?;
        let image = self
            .ctx
            .get_image_data(0.0, 0.0, cols as f64, rows as f64)
            .ok()?;
        Some(image.data().0)
    }
}

#[derive(Default)]
pub struct DigitizerChamber {
    config: DigitizerConfig,
    grid: Option<GlyphGrid>,
    sampler: Option<Sampler>,
    cells: Vec<GlyphCell>,
}

impl DigitizerChamber {
    fn rebuild_grid(&mut self, viewport: Viewport) {
        let grid = GlyphGrid::for_viewport(viewport, self.config.density);
        log::debug!("[digitizer] grid {}x{} @ {}px", grid.cols, grid.rows, grid.cell_px);
        self.grid = Some(grid);
    }

    fn snapshot(&self, env: &Env) {
        match env.canvas.to_data_url_with_type("image/png") {
            Ok(url) => {
                let name = snapshot_file_name(&dom::iso_timestamp());
                dom::download(env.document, &url, &name);
                log::info!("[digitizer] snapshot {}", name);
            }
            Err(e) => log::error!("[digitizer] snapshot failed: {:?}", e),
        }
    }

    fn draw_no_signal(&self, env: &Env) {
        let ctx = env.ctx;
        dom::fill_style(ctx, "rgba(0,255,100,0.6)");
        ctx.set_font("20px monospace");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        _ = ctx.fill_text(
            "NO SIGNAL",
            env.viewport.width as f64 * 0.5,
            env.viewport.height as f64 * 0.5,
        );
    }
}

impl Chamber for DigitizerChamber {
    fn id(&self) -> ChamberId {
        ChamberId::Digitizer
    }

    fn resize(&mut self, env: &mut Env) {
        self.rebuild_grid(env.viewport);
    }

    fn action(&mut self, action: ChamberAction, env: &mut Env) {
        match action {
            ChamberAction::Digitizer(cmd) => {
                self.config.apply(cmd);
                if cmd == DigitizerCommand::CycleDensity {
                    self.rebuild_grid(env.viewport);
                }
            }
            ChamberAction::Snapshot => self.snapshot(env),
            _ => {}
        }
    }

    fn frame(&mut self, _pointers: &[Pointer], env: &mut Env) {
        let ctx = env.ctx;
        let palette = self.config.palette;
        dom::fill_style(ctx, palette.background());
        ctx.fill_rect(
            0.0,
            0.0,
            env.viewport.width as f64,
            env.viewport.height as f64,
        );

        let (Some(video), Some(grid)) = (env.video.as_ref(), self.grid) else {
            self.draw_no_signal(env);
            return;
        };
        if self.sampler.is_none() {
            self.sampler = Sampler::new(env.document);
        }
        let Some(rgba) = self.sampler.as_ref().and_then(|s| s.sample(video, grid)) else {
            return;
        };
        digitize(&rgba, grid, palette, &mut self.cells);

        ctx.set_font(&format!(
            "{:.0}px monospace",
            grid.cell_px as f64 * GLYPH_FONT_SCALE
        ));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        let mut glyph = [0u8; 4];
        for cell in &self.cells {
            let (x, y) = grid.cell_center(cell.col, cell.row);
            dom::fill_style(ctx, &cell.color.css());
            _ = ctx.fill_text(cell.glyph.encode_utf8(&mut glyph), x as f64, y as f64);
        }
    }

    fn status(&self) -> String {
        format!(
            "density {} | palette {}",
            self.config.density.name(),
            self.config.palette.name()
        )
    }
}
