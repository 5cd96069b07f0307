// Audio graph, camera, pose and HUD tuning for the browser front-end.
//
// Simulation constants live in the core crate; this file holds only the
// values that configure browser resources.

// Master bus
pub const MASTER_GAIN: f32 = 0.5;
pub const FILTER_OPEN_HZ: f32 = 20_000.0; // expressive lowpass starts fully open
pub const FILTER_Q: f32 = 1.0;

// Analyser
pub const FFT_SIZE: u32 = 2048;
pub const ANALYSER_SMOOTHING: f64 = 0.85;

// Send effects
pub const REVERB_RETURN_GAIN: f32 = 0.4;
pub const DELAY_TIME_SEC: f32 = 0.3;
pub const DELAY_MAX_SEC: f64 = 1.0;
pub const DELAY_FEEDBACK_GAIN: f32 = 0.4; // must stay below 1

// Camera request
pub const CAMERA_IDEAL_WIDTH: u32 = 1280;
pub const CAMERA_IDEAL_HEIGHT: u32 = 720;

// Pose estimator
pub const POSE_MAX_HANDS: u32 = 2;
pub const POSE_MODEL_COMPLEXITY: u32 = 0;
pub const POSE_MIN_DETECTION_CONFIDENCE: f64 = 0.5;
pub const POSE_MIN_TRACKING_CONFIDENCE: f64 = 0.5;
pub const POSE_RETRY_MS: f64 = 1000.0; // wait between probes for the estimator global
pub const POSE_ASSET_BASE: &str = "https://cdn.jsdelivr.net/npm/@mediapipe/hands/";

// Trail fade layers (alpha of the black wash drawn each frame)
pub const FIELD_FADE_ALPHA: f64 = 0.3;
pub const INK_FADE_ALPHA: f64 = 0.12;
pub const INK_VIDEO_ALPHA: f64 = 0.1;

// Radar drawing
pub const RADAR_GRID_PX: f64 = 100.0;
pub const RADAR_GRID_PX_COMPACT: f64 = 50.0;
pub const RADAR_RINGS: u32 = 6;
pub const RADAR_RINGS_COMPACT: u32 = 3;
pub const RADAR_RING_STEP_PX: f64 = 80.0; // radius added per ring
pub const RADAR_RING_STEP_PX_COMPACT: f64 = 50.0;
pub const RADAR_WEDGE_RAD: f64 = 0.35; // angular width of each scan gradient
pub const RADAR_NODE_RADIUS_PX: f64 = 6.0;

// Reticles and brushes
pub const RETICLE_PX: f64 = 18.0;
pub const INK_BRUSH_PX: f64 = 6.0;

// HUD
pub const HUD_FONT: &str = "12px monospace";
pub const GLYPH_FONT_SCALE: f64 = 1.1; // glyph font size relative to cell size
