//! The render/update contract shared by every part of the figure.

use glam::{Mat4, Vec3};

use crate::canvas::Canvas;

/// A part of the hierarchical model.
///
/// `render` receives the frame of its parent, composes its own local
/// transform onto it and hands the result to its children.  Siblings all see
/// the same parent frame, so nothing a child does can leak sideways or into
/// the next frame.
pub trait Node {
    /// Advance local animation state by one frame.
    fn update(&mut self) {}

    fn render(&self, parent: &Mat4, canvas: &mut dyn Canvas);
}

/// Right-multiplied translation, the `glTranslate` equivalent.
pub(crate) fn translate(m: Mat4, x: f32, y: f32, z: f32) -> Mat4 {
    m * Mat4::from_translation(Vec3::new(x, y, z))
}

/// Right-multiplied rotation by `degrees` about `axis` (must be unit length).
pub(crate) fn rotate(m: Mat4, degrees: f32, axis: Vec3) -> Mat4 {
    m * Mat4::from_axis_angle(axis, degrees.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn translate_then_rotate_rotates_about_moved_origin() {
        let m = rotate(translate(Mat4::IDENTITY, 1.0, 0.0, 0.0), 90.0, Vec3::Z);
        let p = m.transform_point3(Vec3::X);
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-6);
    }
}
