//! Platform-free core of the sensorium chambers.
//!
//! Everything in this crate is plain Rust so it can be exercised by host
//! tests; the WASM front-end owns the browser APIs and feeds these engines
//! with viewport sizes, pointer samples, spectrum snapshots and video pixels.

pub mod audio;
pub mod chamber;
pub mod constants;
pub mod digitizer;
pub mod field;
pub mod ink;
pub mod kaleidoscope;
pub mod keymap;
pub mod music;
pub mod pointer;
pub mod pose;
pub mod preset;
pub mod radar;
pub mod schedule;

pub use audio::*;
pub use chamber::*;
pub use music::*;
pub use pointer::*;
pub use pose::*;
pub use schedule::*;
