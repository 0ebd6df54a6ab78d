//! # voter_model
//!
//! A small hierarchical scene graph: the **Voter**, a blocky figure holding a
//! red flag in its right hand and a blue flag in its left.
//!
//! ## Tree
//!
//! ```text
//! Voter ─┬─ Head                       (shaking oscillator, eyes, hair)
//!        └─ Body ─┬─ Arm ── ArmNode ── ArmNode ── FlagNode
//!                 ├─ Arm ── ArmNode ── ArmNode ── FlagNode
//!                 ├─ Leg ── LegNode ── LegNode (shoe)
//!                 └─ Leg ── LegNode ── LegNode (shoe)
//! ```
//!
//! Every node implements [`Node`]: `update()` advances local animation state,
//! `render()` composes the node's local transform onto the frame handed down
//! by its parent and emits draw calls on a [`Canvas`].  There is no ambient
//! matrix stack; a child can never disturb its siblings' frames.
//!
//! ## Quick start
//!
//! ```rust
//! use glam::{Mat4, Vec3};
//! use voter_model::{Node, Recorder, Voter};
//!
//! let mut voter = Voter::new(Vec3::new(0.0, 0.0, -6.0), Vec3::ONE);
//! voter.body.left_arm.rotate_by(5.0);
//! voter.update();
//!
//! let mut rec = Recorder::default();
//! voter.render(&Mat4::IDENTITY, &mut rec);
//! assert!(!rec.commands.is_empty());
//! ```

pub mod body;
pub mod canvas;
pub mod node;
pub mod oscillator;
pub mod voter;

pub use body::{Arm, ArmLink, ArmNode, Body, FlagColor, FlagNode, Leg, LegNode, ARM_MAX_ANGLE, ARM_MIN_ANGLE};
pub use canvas::{Canvas, DrawCommand, Recorder, Rgb};
pub use node::Node;
pub use oscillator::Oscillator;
pub use voter::{Head, Voter};
