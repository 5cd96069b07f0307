// Shared tuning constants for the chamber simulations.

// Viewports narrower than this use the compact layouts and coarser grids.
pub const COMPACT_WIDTH_PX: f32 = 768.0;

// Landmark index of the index fingertip in a hand landmark set.
pub const FINGERTIP_LANDMARK: usize = 8;
// Consecutive empty pose frames before hand pointers are dropped.
pub const HAND_CLEAR_AFTER_EMPTY_FRAMES: u32 = 10;

// Particle field
pub const FIELD_COLS: usize = 100;
pub const FIELD_ROWS: usize = 60;
pub const FIELD_COLS_COMPACT: usize = 50;
pub const FIELD_ROWS_COMPACT: usize = 30;
pub const FIELD_RADIUS_PX: f32 = 300.0;
pub const FIELD_RADIUS_PX_COMPACT: f32 = 200.0;
pub const FIELD_IMPULSE: f32 = 20.0; // scaled by force and falloff
pub const FIELD_SPRING: f32 = 0.08;
pub const FIELD_DISPLACEMENT_PX: f32 = 30.0;
pub const FIELD_DISPLACEMENT_PX_COMPACT: f32 = 10.0;
pub const FIELD_SPECTRUM_SPAN: f32 = 0.4; // fraction of bins spread over the grid
pub const FIELD_BASS_BINS: usize = 20;
pub const FIELD_IDLE_EXPRESSION: f32 = 0.8;
pub const FIELD_HUE_RATE_PER_MS: f64 = 0.02;

// Digitizer
pub const GLYPH_RAMP: &str = " .:-=+*#%@";
pub const BRIGHTNESS_FLOOR: f32 = 20.0;
pub const CELL_PX: f32 = 14.0;
pub const CELL_PX_COMPACT: f32 = 10.0;
pub const CELL_PX_MIN: f32 = 4.0;

// Radar sequencer
pub const RADAR_STEPS: u32 = 15;
pub const RADAR_HIT_RADIUS_PX: f32 = 30.0;
pub const SCAN_A_RATE: f32 = 0.02; // rad/frame at tempo 1.0
pub const SCAN_B_RATE: f32 = 0.03;
pub const SCAN_TRIGGER_TOLERANCE: f32 = 0.05;
pub const SCAN_REARM_MARGIN: f32 = 0.2;
pub const NODE_LIFE_DECAY: f32 = 0.05;
pub const TEMPO_MIN: f32 = 0.25;
pub const TEMPO_MAX: f32 = 4.0;

// Kaleidoscope
pub const SLICES_MIN: u32 = 4;
pub const SLICES_MAX: u32 = 32;
pub const ZOOM_MIN: f32 = 0.5;
pub const ZOOM_MAX: f32 = 3.0;
pub const ROTATION_RATE: f32 = 0.01; // rad/frame at speed 1.0
pub const WEDGE_OVERLAP: f32 = 0.01;

// Ink flow
pub const LANE_RATIOS: [f32; 10] = [1.0, 1.125, 1.25, 1.5, 1.66, 2.0, 2.25, 2.5, 3.0, 3.33];
pub const INK_ROOT_HZ: f32 = 130.81;
pub const INK_SPAWN_SPEED: f32 = 2.0;
pub const INK_MAX_PARTICLES: usize = 1500;
pub const INK_HISTORY: usize = 8;
pub const INK_LIFE_DECAY: f32 = 0.01;
pub const INK_LANE_HUE_SPAN: f32 = 280.0;
