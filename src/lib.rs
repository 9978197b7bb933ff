//! # shapes-morph
//!
//! Morphing ASCII-art playback for the SHAPES terminal view.
//!
//! This crate provides:
//! - A read-only store of named frame sequences with a guaranteed fallback
//! - A frame scheduler that advances sequences on a fixed interval
//! - Rolling frame-rate telemetry (fps, frame time, dropped frames)
//! - Helpers for centring frames in a character grid
//!
//! The scheduler does no timing of its own. It asks a [`FrameClock`] for
//! one callback at a time, so hosts can plug in their paint loop and tests
//! can step a [`ManualClock`].
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `toml` - Load [`PlaybackConfig`] from TOML
//! - `cli` - Build the `shapes-morph` terminal player
//!
//! ## Example
//!
//! ```rust
//! use shapes_morph::{ManualClock, Scheduler};
//!
//! let mut scheduler = Scheduler::new(ManualClock::new());
//! scheduler.start("concepts", 1500);
//!
//! scheduler.advance_clock(1500.0);
//! assert_eq!(scheduler.current_frame(), 1);
//! println!("{}", scheduler.current_frame_content().as_str());
//! ```

pub mod builtin;
pub mod clock;
mod config;
mod data;
pub mod display;
mod error;
mod scheduler;
mod store;
mod telemetry;

pub use clock::{FrameClock, FrameRequest, IntervalClock, ManualClock};
pub use config::{PlaybackConfig, DEFAULT_INTERVAL_MS};
pub use data::{Frame, Sequence};
pub use error::{Error, Result};
pub use scheduler::{PlaybackState, Scheduler};
pub use store::SequenceStore;
pub use telemetry::{Telemetry, TelemetrySnapshot, DEFAULT_DROPPED_FRAME_THRESHOLD_MS, TELEMETRY_WINDOW};
