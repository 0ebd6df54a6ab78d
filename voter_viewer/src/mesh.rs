//! Triangle meshes for the primitive solids.
//!
//! Every mesh lives in its own local frame at unit size and is scaled at
//! draw time.  Normals are per face and point away from the local origin,
//! which holds for every solid here because they are all convex and centred.

use std::f32::consts::PI;

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    pub normal:   Vec3,
}

impl Triangle {
    /// Build a face, orienting the normal away from the origin.  Returns
    /// `None` for degenerate (zero-area) faces such as sphere pole slivers.
    fn outward(a: Vec3, b: Vec3, c: Vec3) -> Option<Triangle> {
        let n = (b - a).cross(c - a);
        if n.length_squared() < 1e-12 {
            return None;
        }
        let centroid = (a + b + c) / 3.0;
        let normal = if n.dot(centroid) < 0.0 { -n } else { n }.normalize();
        Some(Triangle { vertices: [a, b, c], normal })
    }

    /// Build a face with the normal following the winding.
    fn wound(a: Vec3, b: Vec3, c: Vec3) -> Option<Triangle> {
        let n = (b - a).cross(c - a);
        if n.length_squared() < 1e-12 {
            return None;
        }
        Some(Triangle { vertices: [a, b, c], normal: n.normalize() })
    }
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Unit-radius sphere, poles on the z axis, `slices` around and `stacks`
    /// from pole to pole.
    pub fn sphere(slices: u32, stacks: u32) -> Mesh {
        let slices = slices.max(3);
        let stacks = stacks.max(2);
        let point = |i: u32, j: u32| {
            let theta = 2.0 * PI * i as f32 / slices as f32;
            let phi = PI * j as f32 / stacks as f32;
            Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
        };

        let mut triangles = Vec::with_capacity((slices * stacks * 2) as usize);
        for j in 0..stacks {
            for i in 0..slices {
                let p00 = point(i, j);
                let p10 = point(i + 1, j);
                let p01 = point(i, j + 1);
                let p11 = point(i + 1, j + 1);
                triangles.extend(Triangle::outward(p00, p01, p11));
                triangles.extend(Triangle::outward(p00, p11, p10));
            }
        }
        Mesh { triangles }
    }

    /// Unit cube centred on the origin: 6 faces, 12 triangles.
    pub fn cube() -> Mesh {
        let mut triangles = Vec::with_capacity(12);
        for axis in 0..3 {
            for sign in [-1.0_f32, 1.0] {
                let mut n = Vec3::ZERO;
                n[axis] = sign;
                let mut u = Vec3::ZERO;
                u[(axis + 1) % 3] = 1.0;
                let mut v = Vec3::ZERO;
                v[(axis + 2) % 3] = 1.0;

                let c = n * 0.5;
                let corners = [
                    c - u * 0.5 - v * 0.5,
                    c + u * 0.5 - v * 0.5,
                    c + u * 0.5 + v * 0.5,
                    c - u * 0.5 + v * 0.5,
                ];
                triangles.extend(Triangle::outward(corners[0], corners[1], corners[2]));
                triangles.extend(Triangle::outward(corners[0], corners[2], corners[3]));
            }
        }
        Mesh { triangles }
    }

    /// Two triangles spanning a planar quad, normal from the winding.
    pub fn quad(corners: [Vec3; 4]) -> Mesh {
        let [a, b, c, d] = corners;
        let triangles = Triangle::wound(a, b, c)
            .into_iter()
            .chain(Triangle::wound(a, c, d))
            .collect();
        Mesh { triangles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn cube_has_twelve_outward_faces() {
        let cube = Mesh::cube();
        assert_eq!(cube.triangles.len(), 12);
        for tri in &cube.triangles {
            let centroid = tri.vertices.iter().copied().sum::<Vec3>() / 3.0;
            assert!(tri.normal.dot(centroid) > 0.0);
            for v in tri.vertices {
                assert_abs_diff_eq!(v.abs().max_element(), 0.5);
            }
        }
    }

    #[test]
    fn sphere_vertices_on_unit_sphere() {
        let sphere = Mesh::sphere(10, 10);
        assert!(!sphere.triangles.is_empty());
        for tri in &sphere.triangles {
            for v in tri.vertices {
                assert_abs_diff_eq!(v.length(), 1.0, epsilon = 1e-5);
            }
            assert_abs_diff_eq!(tri.normal.length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn sphere_drops_pole_slivers() {
        // Each pole row loses one degenerate triangle per slice.
        let sphere = Mesh::sphere(8, 4);
        assert_eq!(sphere.triangles.len(), 8 * 4 * 2 - 2 * 8);
    }

    #[test]
    fn quad_splits_in_two() {
        let quad = Mesh::quad([
            Vec3::ZERO,
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(2.0, -1.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ]);
        assert_eq!(quad.triangles.len(), 2);
        assert_abs_diff_eq!(quad.triangles[0].normal.z.abs(), 1.0, epsilon = 1e-6);
    }
}
