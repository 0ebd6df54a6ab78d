//! The root of the figure and its head.

use glam::{Mat4, Vec3, Vec4};

use crate::body::Body;
use crate::canvas::{Canvas, Rgb};
use crate::node::{rotate, translate, Node};
use crate::oscillator::Oscillator;

// ════════════════════════════════════════════════════════════════════════════
// Voter
// ════════════════════════════════════════════════════════════════════════════

/// The whole figure: a head on top of a body, placed by one root transform.
#[derive(Clone, Debug)]
pub struct Voter {
    pub position: Vec3,
    pub scale:    Vec3,
    /// Vertical lift applied on top of `position`; written by the jump logic.
    jump:         f32,
    pub head:     Head,
    pub body:     Body,
}

impl Voter {
    pub fn new(position: Vec3, scale: Vec3) -> Self {
        Voter {
            position,
            scale,
            jump: 0.0,
            head: Head::new(),
            body: Body::new(),
        }
    }

    pub fn jump(&self) -> f32 { self.jump }

    /// Set the vertical lift; negative values are floored at the ground.
    pub fn set_jump(&mut self, height: f32) {
        self.jump = height.max(0.0);
    }

    fn local(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_translation(Vec3::new(0.0, self.jump, 0.0))
            * Mat4::from_scale(self.scale)
    }
}

impl Node for Voter {
    fn update(&mut self) {
        self.head.update();
        self.body.update();
    }

    fn render(&self, parent: &Mat4, canvas: &mut dyn Canvas) {
        let frame = *parent * self.local();
        self.head.render(&frame, canvas);
        self.body.render(&frame, canvas);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Head
// ════════════════════════════════════════════════════════════════════════════

const HEAD_RADIUS: f32 = 1.0;
const HAIR_RADIUS: f32 = 1.03;
const EYE_RADIUS:  f32 = 0.1;
const EYE_OFFSET:  Vec3 = Vec3::new(0.3, 0.2, 0.9);
/// Hair only covers the upper half of its sphere.
const HAIR_CLIP:   Vec4 = Vec4::new(0.0, 0.2, 0.0, 0.0);

/// A sphere with two eyes and a hair cap, shaking side to side.
#[derive(Clone, Debug)]
pub struct Head {
    /// Roll about the view axis, degrees.
    pub angle:     f32,
    pub animation: Oscillator,
}

impl Head {
    pub fn new() -> Self {
        Head {
            angle:     0.0,
            animation: Oscillator::new(0.02).starting_at(0.5),
        }
    }
}

impl Default for Head {
    fn default() -> Self { Self::new() }
}

impl Node for Head {
    fn update(&mut self) {
        self.angle = self.animation.angle();
        self.animation.update();
    }

    fn render(&self, parent: &Mat4, canvas: &mut dyn Canvas) {
        let frame = rotate(*parent, self.angle, Vec3::Z);

        canvas.set_color(Rgb::SKIN);
        canvas.draw_sphere(&frame, HEAD_RADIUS, 32, 32);

        canvas.set_color(Rgb::BLACK);
        for side in [-1.0, 1.0] {
            let eye = translate(frame, side * EYE_OFFSET.x, EYE_OFFSET.y, EYE_OFFSET.z);
            canvas.draw_sphere(&eye, EYE_RADIUS, 10, 10);
        }

        canvas.set_color(Rgb::HAIR);
        let hair = translate(frame, 0.0, 0.3, 0.0);
        canvas.enable_clip_plane(&hair, HAIR_CLIP);
        canvas.draw_sphere(&hair, HAIR_RADIUS, 32, 32);
        canvas.disable_clip_plane();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
