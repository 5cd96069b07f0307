//! Video-to-glyph mapping for the ASCII digitizer.

use crate::constants::*;
use crate::schedule::Viewport;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Density {
    Low,
    #[default]
    Medium,
    High,
}

impl Density {
    /// Cell size multiplier; higher density means smaller cells.
    pub fn cell_scale(self) -> f32 {
        match self {
            Density::Low => 1.5,
            Density::Medium => 1.0,
            Density::High => 0.6,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Density::Low => Density::Medium,
            Density::Medium => Density::High,
            Density::High => Density::Low,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Density::Low => "low",
            Density::Medium => "med",
            Density::High => "high",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Palette {
    #[default]
    Matrix,
    Cyan,
    White,
    TrueColor,
}

impl Palette {
    pub fn next(self) -> Self {
        match self {
            Palette::Matrix => Palette::Cyan,
            Palette::Cyan => Palette::White,
            Palette::White => Palette::TrueColor,
            Palette::TrueColor => Palette::Matrix,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Palette::Matrix => "green",
            Palette::Cyan => "cyan",
            Palette::White => "white",
            Palette::TrueColor => "true color",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Palette::White => "#111",
            _ => "#000",
        }
    }

    /// Glyph colour for a cell with source colour `rgb` and mean `brightness`.
    pub fn color(self, rgb: [u8; 3], brightness: f32) -> Rgba {
        let alpha = (brightness / 255.0).clamp(0.0, 1.0);
        let tint = |r, g, b| Rgba { r, g, b, a: alpha };
        match self {
            Palette::Matrix => tint(0, 255, 100),
            Palette::Cyan => tint(0, 255, 255),
            Palette::White => tint(255, 255, 255),
            Palette::TrueColor => Rgba {
                r: rgb[0],
                g: rgb[1],
                b: rgb[2],
                a: 1.0,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DigitizerConfig {
    pub density: Density,
    pub palette: Palette,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigitizerCommand {
    CycleDensity,
    CyclePalette,
}

impl DigitizerConfig {
    pub fn apply(&mut self, cmd: DigitizerCommand) {
        match cmd {
            DigitizerCommand::CycleDensity => self.density = self.density.next(),
            DigitizerCommand::CyclePalette => self.palette = self.palette.next(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub fn css(&self) -> String {
        if self.a >= 1.0 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Coarse sampling grid covering the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphGrid {
    pub cols: usize,
    pub rows: usize,
    pub cell_px: f32,
}

impl GlyphGrid {
    pub fn for_viewport(viewport: Viewport, density: Density) -> Self {
        let base = if viewport.is_compact() {
            CELL_PX_COMPACT
        } else {
            CELL_PX
        };
        let cell_px = (base * density.cell_scale()).floor().max(CELL_PX_MIN);
        Self {
            cols: (viewport.width / cell_px).ceil() as usize,
            rows: (viewport.height / cell_px).ceil() as usize,
            cell_px,
        }
    }

    /// Bytes expected in an RGBA sample of this grid.
    pub fn rgba_len(&self) -> usize {
        self.cols * self.rows * 4
    }

    /// Pixel centre of a cell.
    pub fn cell_center(&self, col: usize, row: usize) -> (f32, f32) {
        let half = self.cell_px * 0.5;
        (
            col as f32 * self.cell_px + half,
            row as f32 * self.cell_px + half,
        )
    }
}

/// Glyph for a mean brightness in [0, 255]; `None` below the silhouette floor.
pub fn glyph_for(brightness: f32) -> Option<char> {
    if brightness <= BRIGHTNESS_FLOOR {
        return None;
    }
    let ramp = GLYPH_RAMP.as_bytes();
    let last = ramp.len() - 1;
    let idx = ((brightness / 255.0).clamp(0.0, 1.0) * last as f32) as usize;
    Some(ramp[idx.min(last)] as char)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphCell {
    pub col: usize,
    pub row: usize,
    pub glyph: char,
    pub color: Rgba,
}

/// Map a `grid.cols x grid.rows` RGBA sample to glyph cells.
///
/// The sample is read mirrored horizontally so the output matches a selfie
/// view. A sample of the wrong size yields no cells.
pub fn digitize(rgba: &[u8], grid: GlyphGrid, palette: Palette, out: &mut Vec<GlyphCell>) {
    out.clear();
    if rgba.len() < grid.rgba_len() {
        return;
    }
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let src_col = grid.cols - 1 - col;
            let idx = (row * grid.cols + src_col) * 4;
            let rgb = [rgba[idx], rgba[idx + 1], rgba[idx + 2]];
            let brightness = (rgb[0] as f32 + rgb[1] as f32 + rgb[2] as f32) / 3.0;
            if let Some(glyph) = glyph_for(brightness) {
                out.push(GlyphCell {
                    col,
                    row,
                    glyph,
                    color: palette.color(rgb, brightness),
                });
            }
        }
    }
}

/// File name for a PNG snapshot taken at `iso_timestamp`.
pub fn snapshot_file_name(iso_timestamp: &str) -> String {
    let stamp: String = iso_timestamp
        .chars()
        .map(|c| if c == ':' || c == '.' { '-' } else { c })
        .collect();
    format!("SENSORIUM_BIOMESH_{stamp}.png")
}
