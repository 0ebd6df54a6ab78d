//! # voter_viewer
//!
//! Real-time viewer for the [`voter_model`] figure, rendered in software into
//! a `minifb` window.
//!
//! ## Key → Action mapping
//!
//! | Key | Action |
//! |---|---|
//! | `A` | Orbit the camera clockwise (2°) |
//! | `D` | Orbit the camera counter-clockwise (2°) |
//! | `W` | Left arm +5°, right arm −5° |
//! | `S` | Left arm −5°, right arm +5° |
//! | `J` | Jump (ignored while already airborne) |
//! | `Q` / `Escape` | Quit |
//!
//! ## Music
//!
//! After every key press the two shoulder angles are compared:
//!
//! * right arm above left → track A (opposition anthem)
//! * left arm above right → track B (ruling-party anthem)
//! * level → silence
//!
//! Re-selecting the track that is already playing does nothing; a missing
//! file is logged and the current music keeps going.
//!
//! ## Jump
//!
//! The jump height is the closed-form projectile curve evaluated from the
//! wall-clock time since take-off, never integrated frame by frame, so the
//! motion is the same at any frame rate.

pub mod app;
pub mod controls;
pub mod error;
pub mod jump;
pub mod mesh;
pub mod player;
pub mod raster;
pub mod visualizer;
