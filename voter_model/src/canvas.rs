//! The draw capability consumed by the scene graph.
//!
//! A [`Canvas`] is anything that can put solids and quads on screen given a
//! fully-composed model-view transform.  The scene graph never touches a
//! matrix stack; each call carries its own frame.

use std::fmt;

use glam::{Mat4, Vec3, Vec4};

// ════════════════════════════════════════════════════════════════════════════
// Rgb
// ════════════════════════════════════════════════════════════════════════════

/// A flat material color, each component in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Rgb { r, g, b }
    }

    pub const SKIN:   Rgb = Rgb::new(0.98, 0.81, 0.69);
    pub const BLACK:  Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const HAIR:   Rgb = Rgb::new(0.5, 0.25, 0.0);
    /// T-shirt and trousers.
    pub const CLOTH:  Rgb = Rgb::new(0.7, 0.7, 0.7);
    pub const SHOE:   Rgb = Rgb::new(0.5, 0.5, 0.5);
    pub const RED:    Rgb = Rgb::new(1.0, 0.0, 0.0);
    pub const BLUE:   Rgb = Rgb::new(0.0, 0.0, 1.0);
    pub const GROUND: Rgb = Rgb::new(0.96, 0.87, 0.70);

    /// Scale by a light intensity and pack as `0xFFRRGGBB`.
    pub fn shade(self, intensity: f32) -> u32 {
        let k = intensity.clamp(0.0, 1.0);
        let ch = |c: f32| ((c * k).clamp(0.0, 1.0) * 255.0).round() as u32;
        0xFF000000 | (ch(self.r) << 16) | (ch(self.g) << 8) | ch(self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.r, self.g, self.b)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Canvas
// ════════════════════════════════════════════════════════════════════════════

/// Primitive drawing operations.
///
/// `transform` maps the primitive's local coordinates into camera space.
/// The current color is canvas state: it stays in effect until the next
/// [`Canvas::set_color`], exactly like a fixed-function pipeline.
pub trait Canvas {
    fn set_color(&mut self, color: Rgb);

    /// Solid sphere centred on the frame origin.
    fn draw_sphere(&mut self, transform: &Mat4, radius: f32, slices: u32, stacks: u32);

    /// Solid axis-aligned cube of edge `size`, centred on the frame origin.
    fn draw_cube(&mut self, transform: &Mat4, size: f32);

    /// A single planar quad given by its corners in winding order.
    fn draw_quad(&mut self, transform: &Mat4, corners: [Vec3; 4]);

    /// Discard everything with `dot(plane, p) < 0`, where `p` is expressed in
    /// the frame given by `transform`.
    fn enable_clip_plane(&mut self, transform: &Mat4, plane: Vec4);

    fn disable_clip_plane(&mut self);
}

// ════════════════════════════════════════════════════════════════════════════
// DrawCommand / Recorder
// ════════════════════════════════════════════════════════════════════════════

/// One recorded [`Canvas`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Color(Rgb),
    Sphere { transform: Mat4, radius: f32, slices: u32, stacks: u32 },
    Cube   { transform: Mat4, size: f32 },
    Quad   { transform: Mat4, corners: [Vec3; 4] },
    ClipOn { transform: Mat4, plane: Vec4 },
    ClipOff,
}

impl DrawCommand {
    /// Camera-space position of the primitive's local origin, if it has one.
    pub fn origin(&self) -> Option<Vec3> {
        match self {
            DrawCommand::Sphere { transform, .. }
            | DrawCommand::Cube { transform, .. }
            | DrawCommand::Quad { transform, .. }
            | DrawCommand::ClipOn { transform, .. } => {
                Some(transform.transform_point3(Vec3::ZERO))
            }
            DrawCommand::Color(_) | DrawCommand::ClipOff => None,
        }
    }
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = |p: Option<Vec3>| {
            let p = p.unwrap_or(Vec3::ZERO);
            format!("({:+.3}, {:+.3}, {:+.3})", p.x, p.y, p.z)
        };
        match self {
            DrawCommand::Color(c) => write!(f, "color   {}", c),
            DrawCommand::Sphere { radius, slices, stacks, .. } => write!(
                f, "sphere  r={:.2} {}x{} at {}", radius, slices, stacks, at(self.origin())
            ),
            DrawCommand::Cube { size, .. } => {
                write!(f, "cube    s={:.2} at {}", size, at(self.origin()))
            }
            DrawCommand::Quad { .. } => write!(f, "quad    at {}", at(self.origin())),
            DrawCommand::ClipOn { plane, .. } => write!(
                f, "clip    ({:.2}, {:.2}, {:.2}, {:.2}) at {}",
                plane.x, plane.y, plane.z, plane.w, at(self.origin())
            ),
            DrawCommand::ClipOff => write!(f, "noclip"),
        }
    }
}

/// A [`Canvas`] that just remembers what it was asked to draw.
#[derive(Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn clear(&mut self) { self.commands.clear(); }

    /// Only the solid/quad commands, in draw order.
    pub fn primitives(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(
            c,
            DrawCommand::Sphere { .. } | DrawCommand::Cube { .. } | DrawCommand::Quad { .. }
        ))
    }
}

impl Canvas for Recorder {
    fn set_color(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Color(color));
    }

    fn draw_sphere(&mut self, transform: &Mat4, radius: f32, slices: u32, stacks: u32) {
        self.commands.push(DrawCommand::Sphere { transform: *transform, radius, slices, stacks });
    }

    fn draw_cube(&mut self, transform: &Mat4, size: f32) {
        self.commands.push(DrawCommand::Cube { transform: *transform, size });
    }

    fn draw_quad(&mut self, transform: &Mat4, corners: [Vec3; 4]) {
        self.commands.push(DrawCommand::Quad { transform: *transform, corners });
    }

    fn enable_clip_plane(&mut self, transform: &Mat4, plane: Vec4) {
        self.commands.push(DrawCommand::ClipOn { transform: *transform, plane });
    }

    fn disable_clip_plane(&mut self) {
        self.commands.push(DrawCommand::ClipOff);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
