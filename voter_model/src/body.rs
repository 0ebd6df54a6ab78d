//! Torso, arms and legs.
//!
//! Arms and legs are fixed two-segment chains.  The last segment of a chain
//! is drawn differently (a bare hand holding a flag, or a shoe), which is
//! expressed through the chain's tail rather than a separate node family.

use glam::{Mat4, Vec3};

use crate::canvas::{Canvas, Rgb};
use crate::node::{rotate, translate, Node};

/// Shoulders swing from hanging straight down (0) through pointing at the
/// viewer (-90) to straight up (-180).
pub const ARM_MIN_ANGLE: f32 = -180.0;
pub const ARM_MAX_ANGLE: f32 = 0.0;

const TORSO_SIZE:   f32 = 2.0;
const ARM_SEGMENT:  f32 = 0.5;
const LEG_SEGMENT:  f32 = 0.7;
const FLAG_WIDTH:   f32 = 2.0;
const FLAG_HEIGHT:  f32 = 1.0;

// ════════════════════════════════════════════════════════════════════════════
// Body
// ════════════════════════════════════════════════════════════════════════════

/// A cube torso carrying exactly two arms and two legs.
#[derive(Clone, Debug)]
pub struct Body {
    pub left_arm:  Arm,
    pub right_arm: Arm,
    pub left_leg:  Leg,
    pub right_leg: Leg,
}

impl Body {
    pub fn new() -> Self {
        Body {
            left_arm:  Arm::new(-90.0, -1.5, FlagColor::Blue),
            right_arm: Arm::new(-90.0,  1.5, FlagColor::Red),
            left_leg:  Leg::new(-0.8),
            right_leg: Leg::new( 0.8),
        }
    }

    /// Spread the legs symmetrically: left rolls by `-degrees`, right by
    /// `+degrees`.
    pub fn set_leg_spread(&mut self, degrees: f32) {
        self.left_leg.angle  = -degrees;
        self.right_leg.angle =  degrees;
    }

    /// Current spread; the right leg's angle.
    pub fn leg_spread(&self) -> f32 { self.right_leg.angle }
}

impl Default for Body {
    fn default() -> Self { Self::new() }
}

impl Node for Body {
    fn update(&mut self) {
        self.left_arm.update();
        self.right_arm.update();
        self.left_leg.update();
        self.right_leg.update();
    }

    fn render(&self, parent: &Mat4, canvas: &mut dyn Canvas) {
        let frame = translate(*parent, 0.0, -1.5, 0.0);
        canvas.set_color(Rgb::CLOTH);
        canvas.draw_cube(&frame, TORSO_SIZE);

        self.left_arm.render(&frame, canvas);
        self.right_arm.render(&frame, canvas);
        self.left_leg.render(&frame, canvas);
        self.right_leg.render(&frame, canvas);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Arm
// ════════════════════════════════════════════════════════════════════════════

/// Which party the flag in this hand belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagColor {
    /// Opposition; the flag unfurls toward +x.
    Red,
    /// Ruling party; the flag unfurls toward -x.
    Blue,
}

impl FlagColor {
    pub fn rgb(self) -> Rgb {
        match self {
            FlagColor::Red  => Rgb::RED,
            FlagColor::Blue => Rgb::BLUE,
        }
    }

    fn direction(self) -> f32 {
        match self {
            FlagColor::Red  =>  1.0,
            FlagColor::Blue => -1.0,
        }
    }
}

/// A shoulder joint swinging about x, carrying an upper arm, a forearm with
/// hand, and a flag.
#[derive(Clone, Debug)]
pub struct Arm {
    angle:            f32,
    pub displacement: f32,
    pub node:         ArmNode,
}

impl Arm {
    pub fn new(angle: f32, displacement: f32, flag: FlagColor) -> Self {
        Arm {
            angle: angle.clamp(ARM_MIN_ANGLE, ARM_MAX_ANGLE),
            displacement,
            node: ArmNode::new(ArmLink::Segment(Box::new(
                ArmNode::new(ArmLink::Flag(FlagNode::new(flag))),
            ))),
        }
    }

    pub fn angle(&self) -> f32 { self.angle }

    pub fn set_angle(&mut self, degrees: f32) {
        self.angle = degrees.clamp(ARM_MIN_ANGLE, ARM_MAX_ANGLE);
    }

    /// Swing by `delta` degrees, stopping at the joint limits.
    pub fn rotate_by(&mut self, delta: f32) {
        self.set_angle(self.angle + delta);
    }

    /// The flag at the end of this arm's chain.
    pub fn flag(&self) -> &FlagNode {
        let mut node = &self.node;
        loop {
            match &node.next {
                ArmLink::Segment(next) => node = next,
                ArmLink::Flag(flag)    => return flag,
            }
        }
    }
}

impl Node for Arm {
    fn update(&mut self) {
        self.node.update();
    }

    fn render(&self, parent: &Mat4, canvas: &mut dyn Canvas) {
        let frame = translate(*parent, 0.0, 0.5, 0.0);
        let frame = translate(frame, self.displacement, 0.0, -1.0);
        let frame = rotate(frame, self.angle, Vec3::X);
        self.node.render(&frame, canvas);
    }
}

/// What hangs off an arm segment.
#[derive(Clone, Debug)]
pub enum ArmLink {
    /// Another sleeve segment.
    Segment(Box<ArmNode>),
    /// This segment is the forearm; its hand holds the flag.
    Flag(FlagNode),
}

/// One arm segment: two stacked cubes, then whatever it links to.
#[derive(Clone, Debug)]
pub struct ArmNode {
    pub next: ArmLink,
}

impl ArmNode {
    pub fn new(next: ArmLink) -> Self {
        ArmNode { next }
    }

    /// True for the forearm, whose lower cube is a bare hand.
    pub fn is_tip(&self) -> bool {
        matches!(self.next, ArmLink::Flag(_))
    }
}

impl Node for ArmNode {
    fn update(&mut self) {
        if let ArmLink::Segment(next) = &mut self.next {
            next.update();
        }
    }

    fn render(&self, parent: &Mat4, canvas: &mut dyn Canvas) {
        canvas.set_color(Rgb::CLOTH);
        let frame = translate(*parent, 0.0, 0.1, 0.0);
        canvas.draw_cube(&frame, ARM_SEGMENT);

        let frame = translate(frame, 0.0, -ARM_SEGMENT, 0.0);
        if self.is_tip() {
            canvas.set_color(Rgb::SKIN);
        }
        canvas.draw_cube(&frame, ARM_SEGMENT);

        let frame = translate(frame, 0.0, -ARM_SEGMENT, 0.0);
        match &self.next {
            ArmLink::Segment(next) => next.render(&frame, canvas),
            ArmLink::Flag(flag)    => flag.render(&frame, canvas),
        }
    }
}

/// A rectangular flag hanging from the hand.
#[derive(Clone, Debug, PartialEq)]
pub struct FlagNode {
    pub color: FlagColor,
}

impl FlagNode {
    pub fn new(color: FlagColor) -> Self {
        FlagNode { color }
    }

    /// Corners in the hand's frame, top edge at the origin.
    pub fn corners(&self) -> [Vec3; 4] {
        let w = FLAG_WIDTH * self.color.direction();
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, -FLAG_HEIGHT, 0.0),
            Vec3::new(w, -FLAG_HEIGHT, 0.0),
            Vec3::new(w, 0.0, 0.0),
        ]
    }
}

impl Node for FlagNode {
    fn render(&self, parent: &Mat4, canvas: &mut dyn Canvas) {
        canvas.set_color(self.color.rgb());
        canvas.draw_quad(parent, self.corners());
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Leg
// ════════════════════════════════════════════════════════════════════════════

/// A hip joint rolling about z, carrying a thigh and a shin with shoe.
#[derive(Clone, Debug)]
pub struct Leg {
    /// Roll about z, degrees.  Written through [`Body::set_leg_spread`].
    pub(crate) angle: f32,
    pub displacement: f32,
    pub node:         LegNode,
}

impl Leg {
    pub fn new(displacement: f32) -> Self {
        Leg {
            angle: 0.0,
            displacement,
            node: LegNode::new(Some(LegNode::new(None))),
        }
    }

    pub fn angle(&self) -> f32 { self.angle }
}

impl Node for Leg {
    fn update(&mut self) {
        self.node.update();
    }

    fn render(&self, parent: &Mat4, canvas: &mut dyn Canvas) {
        let frame = translate(*parent, 0.0, -1.5, -1.0);
        let frame = translate(frame, self.displacement, 0.0, 0.0);
        let frame = rotate(frame, self.angle, Vec3::Z);
        self.node.render(&frame, canvas);
    }
}

/// One leg segment; the segment without a successor wears the shoe.
#[derive(Clone, Debug)]
pub struct LegNode {
    pub next: Option<Box<LegNode>>,
}

impl LegNode {
    pub fn new(next: Option<LegNode>) -> Self {
        LegNode { next: next.map(Box::new) }
    }

    pub fn is_tip(&self) -> bool { self.next.is_none() }
}

impl Node for LegNode {
    fn update(&mut self) {
        if let Some(next) = &mut self.next {
            next.update();
        }
    }

    fn render(&self, parent: &Mat4, canvas: &mut dyn Canvas) {
        canvas.set_color(Rgb::CLOTH);
        canvas.draw_cube(parent, LEG_SEGMENT);

        let frame = translate(*parent, 0.0, -LEG_SEGMENT, 0.0);
        if self.is_tip() {
            canvas.set_color(Rgb::SHOE);
        }
        canvas.draw_cube(&frame, LEG_SEGMENT);

        if let Some(next) = &self.next {
            let frame = translate(frame, 0.0, -LEG_SEGMENT, 0.0);
            next.render(&frame, canvas);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
