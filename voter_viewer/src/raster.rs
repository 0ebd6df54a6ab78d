//! Software rasterizer implementing the scene graph's [`Canvas`].
//!
//! Flat-shaded triangles with a depth buffer and one user clip plane, close
//! enough to a fixed-function pipeline with `GL_LIGHT0` and color material:
//! a point light at eye-space (1, 1, 1), 0.2 ambient, Lambert diffuse.

use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

use glam::{Mat3, Mat4, Vec3, Vec4};
use voter_model::{Canvas, Rgb};

use crate::mesh::{Mesh, Triangle};

const AMBIENT:     f32 = 0.2;
const LIGHT_POS:   Vec3 = Vec3::new(1.0, 1.0, 1.0);
const NEAR:        f32 = 1.0;
const FAR:         f32 = 30.0;
const CLEAR_COLOR: u32 = 0xFF000000;
/// Pixels this close outside an edge still count, so shared edges never
/// leave cracks.
const EDGE_SLACK:  f32 = 1e-5;

/// A triangle after projection: screen x/y, NDC depth, 1/w and clip
/// distance per vertex.
struct Projected {
    screen:   [(f32, f32); 3],
    depth:    [f32; 3],
    inv_w:    [f32; 3],
    clip:     Option<[f32; 3]>,
}

pub struct Rasterizer {
    width:      usize,
    height:     usize,
    color:      Vec<u32>,
    depth:      Vec<f32>,
    projection: Mat4,
    current:    Rgb,
    /// Active clip plane, already in eye space.
    clip:       Option<Vec4>,
    spheres:    HashMap<(u32, u32), Mesh>,
    cube:       Mesh,
}

impl Rasterizer {
    /// Viewport of `width` × `height` behind a frustum of
    /// (-1, 1, -1, 1, 1, 30), i.e. a 90° vertical field of view.
    pub fn new(width: usize, height: usize) -> Self {
        let aspect = width as f32 / height.max(1) as f32;
        Rasterizer {
            width,
            height,
            color:      vec![CLEAR_COLOR; width * height],
            depth:      vec![f32::INFINITY; width * height],
            projection: Mat4::perspective_rh_gl(FRAC_PI_2, aspect, NEAR, FAR),
            current:    Rgb::new(1.0, 1.0, 1.0),
            clip:       None,
            spheres:    HashMap::new(),
            cube:       Mesh::cube(),
        }
    }

    pub fn width(&self)  -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    /// Packed `0xFFRRGGBB` pixels, row-major from the top-left.
    pub fn pixels(&self) -> &[u32] { &self.color }

    /// The pixel at (`x`, `y`), or `None` outside the viewport.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.color.get(y * self.width + x).copied()
    }

    pub fn clear(&mut self) {
        self.color.fill(CLEAR_COLOR);
        self.depth.fill(f32::INFINITY);
        self.clip = None;
    }

    fn draw_mesh(&mut self, transform: &Mat4, scale: f32, mesh: &Mesh, two_sided: bool) {
        let model_view = *transform * Mat4::from_scale(Vec3::splat(scale));
        let normal_matrix = Mat3::from_mat4(model_view).inverse().transpose();
        for tri in &mesh.triangles {
            self.draw_triangle(&model_view, &normal_matrix, tri, two_sided);
        }
    }

    fn draw_triangle(&mut self, model_view: &Mat4, normal_matrix: &Mat3, tri: &Triangle, two_sided: bool) {
        let eye = tri.vertices.map(|v| model_view.transform_point3(v));

        let clip = self.clip.map(|plane| eye.map(|p| plane.dot(p.extend(1.0))));
        if let Some(d) = clip {
            if d.iter().all(|&d| d < 0.0) {
                return;
            }
        }

        let centroid = (eye[0] + eye[1] + eye[2]) / 3.0;
        let mut normal = (*normal_matrix * tri.normal).normalize_or_zero();
        if two_sided && normal.dot(-centroid) < 0.0 {
            normal = -normal;
        }
        let to_light = (LIGHT_POS - centroid).normalize_or_zero();
        let intensity = AMBIENT + normal.dot(to_light).max(0.0);
        let shade = self.current.shade(intensity);

        let dist = clip.unwrap_or([0.0; 3]);
        let poly = clip_near([(eye[0], dist[0]), (eye[1], dist[1]), (eye[2], dist[2])]);
        for k in 1..poly.len().saturating_sub(1) {
            let corners = [poly[0], poly[k], poly[k + 1]];
            let projected = self.project(corners, clip.is_some());
            self.fill(&projected, shade);
        }
    }

    fn project(&self, corners: [(Vec3, f32); 3], clipped: bool) -> Projected {
        let mut screen = [(0.0, 0.0); 3];
        let mut depth = [0.0; 3];
        let mut inv_w = [0.0; 3];
        for (i, (p, _)) in corners.iter().enumerate() {
            let c = self.projection * p.extend(1.0);
            let ndc = c.truncate() / c.w;
            screen[i] = (
                (ndc.x + 1.0) * 0.5 * self.width as f32,
                (1.0 - ndc.y) * 0.5 * self.height as f32,
            );
            depth[i] = ndc.z;
            inv_w[i] = 1.0 / c.w;
        }
        let clip = clipped.then(|| corners.map(|(_, d)| d));
        Projected { screen, depth, inv_w, clip }
    }

    fn fill(&mut self, tri: &Projected, shade: u32) {
        let [(x0, y0), (x1, y1), (x2, y2)] = tri.screen;
        let area = (x1 - x0) * (y2 - y0) - (x2 - x0) * (y1 - y0);
        if area.abs() < 1e-8 {
            return;
        }

        let min_x = x0.min(x1).min(x2).floor().max(0.0) as usize;
        let min_y = y0.min(y1).min(y2).floor().max(0.0) as usize;
        let max_x = (x0.max(x1).max(x2).ceil() as usize).min(self.width);
        let max_y = (y0.max(y1).max(y2).ceil() as usize).min(self.height);

        for py in min_y..max_y {
            for px in min_x..max_x {
                let (x, y) = (px as f32 + 0.5, py as f32 + 0.5);
                let w0 = ((x1 - x) * (y2 - y) - (x2 - x) * (y1 - y)) / area;
                let w1 = ((x2 - x) * (y0 - y) - (x0 - x) * (y2 - y)) / area;
                let w2 = 1.0 - w0 - w1;
                if w0 < -EDGE_SLACK || w1 < -EDGE_SLACK || w2 < -EDGE_SLACK {
                    continue;
                }

                if let Some(d) = tri.clip {
                    let iw = w0 * tri.inv_w[0] + w1 * tri.inv_w[1] + w2 * tri.inv_w[2];
                    let dist = (w0 * d[0] * tri.inv_w[0]
                        + w1 * d[1] * tri.inv_w[1]
                        + w2 * d[2] * tri.inv_w[2]) / iw;
                    if dist < 0.0 {
                        continue;
                    }
                }

                let z = w0 * tri.depth[0] + w1 * tri.depth[1] + w2 * tri.depth[2];
                let idx = py * self.width + px;
                if z < self.depth[idx] {
                    self.depth[idx] = z;
                    self.color[idx] = shade;
                }
            }
        }
    }
}

/// Cut a camera-space triangle against the near plane, carrying the clip
/// distance along.  Yields 0, 3 or 4 corners.
fn clip_near(corners: [(Vec3, f32); 3]) -> Vec<(Vec3, f32)> {
    let mut out = Vec::with_capacity(4);
    for i in 0..3 {
        let (a, da) = corners[i];
        let (b, db) = corners[(i + 1) % 3];
        let a_in = a.z <= -NEAR;
        let b_in = b.z <= -NEAR;
        if a_in {
            out.push((a, da));
        }
        if a_in != b_in {
            let t = (-NEAR - a.z) / (b.z - a.z);
            out.push((a.lerp(b, t), da + (db - da) * t));
        }
    }
    out
}

impl Canvas for Rasterizer {
    fn set_color(&mut self, color: Rgb) {
        self.current = color;
    }

    fn draw_sphere(&mut self, transform: &Mat4, radius: f32, slices: u32, stacks: u32) {
        let key = (slices, stacks);
        let mesh = self.spheres.remove(&key).unwrap_or_else(|| Mesh::sphere(slices, stacks));
        self.draw_mesh(transform, radius, &mesh, false);
        self.spheres.insert(key, mesh);
    }

    fn draw_cube(&mut self, transform: &Mat4, size: f32) {
        let mesh = std::mem::take(&mut self.cube);
        self.draw_mesh(transform, size, &mesh, false);
        self.cube = mesh;
    }

    fn draw_quad(&mut self, transform: &Mat4, corners: [Vec3; 4]) {
        self.draw_mesh(transform, 1.0, &Mesh::quad(corners), true);
    }

    fn enable_clip_plane(&mut self, transform: &Mat4, plane: Vec4) {
        // Planes transform by the inverse transpose, like glClipPlane.
        self.clip = Some(transform.inverse().transpose() * plane);
    }

    fn disable_clip_plane(&mut self) {
        self.clip = None;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
