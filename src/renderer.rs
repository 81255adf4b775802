//! CPU ray caster
//!
//! Casts one orthographic ray per terminal cell, resolves which sphere it
//! lands on and shades the hit with a single directional light.

use crate::scene::{Camera, HitResolution, Scene, Sphere};
use nalgebra::{Point3, Vector3};

/// A ray in 3D space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}

/// Near root of |O + tD - C|^2 = r^2.
///
/// Returns `None` when the ray's line misses the sphere. The root may be zero
/// or negative (sphere behind the origin); only `t > 0` counts as a hit.
/// The direction does not need to be unit length.
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere) -> Option<f32> {
    let oc = ray.origin - sphere.center;
    let a = ray.direction.dot(&ray.direction);
    let b = 2.0 * oc.dot(&ray.direction);
    let c = oc.dot(&oc) - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    Some((-b - discriminant.sqrt()) / (2.0 * a))
}

/// Hit record for a ray-sphere intersection
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    pub t: f32,
    pub point: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl HitRecord {
    pub fn new(ray: &Ray, t: f32, sphere: &Sphere) -> Self {
        let point = ray.at(t);
        let mut normal = point - sphere.center;
        normal.normalize_mut();
        Self { t, point, normal }
    }
}

/// Find the sphere a ray lands on, if any
pub fn resolve_hit(ray: &Ray, spheres: &[Sphere], resolution: HitResolution) -> Option<HitRecord> {
    let mut forward = spheres.iter().filter_map(|sphere| {
        intersect_sphere(ray, sphere)
            .filter(|t| *t > 0.0)
            .map(|t| (t, sphere))
    });

    let (t, sphere) = match resolution {
        HitResolution::Priority => forward.next()?,
        HitResolution::Nearest => forward.min_by(|a, b| a.0.total_cmp(&b.0))?,
    };

    Some(HitRecord::new(ray, t, sphere))
}

/// Brightness of a surface facing `normal` under a light travelling along `light`
pub fn luminance(normal: &Vector3<f32>, light: &Vector3<f32>) -> f32 {
    normal.dot(&-light)
}

/// Bucket a luminance into `count` glyphs.
///
/// Surfaces facing away from the light still get the dimmest glyph.
pub fn glyph_index(luminance: f32, count: usize) -> usize {
    if luminance < 0.0 {
        return 0;
    }
    ((count as f32 * luminance) as usize).min(count.saturating_sub(1))
}

/// Glyph for a single cell.
///
/// Misses, and hits against an empty ramp, print as blank.
pub fn shade(hit: Option<&HitRecord>, light: &Vector3<f32>, glyphs: &[char]) -> char {
    hit.and_then(|hit| {
        let index = glyph_index(luminance(&hit.normal, light), glyphs.len());
        glyphs.get(index).copied()
    })
    .unwrap_or(crate::BLANK)
}

/// The ASCII renderer
pub struct Renderer {
    width: usize,
    height: usize,
    framebuffer: Vec<char>,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            framebuffer: vec![crate::BLANK; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.framebuffer = vec![crate::BLANK; width * height];
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Ray for the cell at column `x`, row `y`
    pub fn primary_ray(&self, camera: &Camera, x: usize, y: usize) -> Ray {
        let x_world = x as f32 - (self.width / 2) as f32 + 0.5;
        let y_world = (y as f32 - (self.height / 2) as f32 + 0.5) * camera.pixel_aspect;
        Ray::new(Point3::new(x_world, y_world, -camera.distance), camera.direction)
    }

    /// Render the scene rotated by `theta` into the framebuffer
    pub fn render(&mut self, scene: &Scene, theta: f32) {
        let spheres = scene.spheres_at(theta);

        for y in 0..self.height {
            for x in 0..self.width {
                let ray = self.primary_ray(&scene.camera, x, y);
                let hit = resolve_hit(&ray, &spheres, scene.resolution);
                self.framebuffer[y * self.width + x] = shade(hit.as_ref(), &scene.light, &scene.glyphs);
            }
        }
    }

    /// Glyph currently stored for a cell
    pub fn glyph(&self, x: usize, y: usize) -> char {
        self.framebuffer[y * self.width + x]
    }

    /// Framebuffer as newline-terminated rows
    pub fn to_ascii(&self) -> String {
        let mut result = String::with_capacity(self.width * self.height + self.height);

        for row in self.framebuffer.chunks(self.width.max(1)).take(self.height) {
            result.extend(row);
            result.push('\n');
        }

        result
    }
}
