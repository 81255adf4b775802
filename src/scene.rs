//! Scene definitions for the molecule raytracer

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Hydroxymethylene (HCOH) atoms: name, rest center, radius.
///
/// Centers are the published xyz coordinates (Angstrom) scaled by 10 so the
/// molecule fills a 40x20 cell viewport.
pub const HYDROXYMETHYLENE: [(&str, [f32; 3], f32); 4] = [
    ("carbon", [-7.39089, -1.22224, 0.0], 7.7),
    ("oxygen", [5.63790, 0.83238, 0.0], 6.6),
    ("hydrogen-1", [-11.36948, 9.18588, 0.0], 3.2),
    ("hydrogen-2", [9.89394, -7.84332, 0.0], 3.2),
];

/// Light shines towards left and bottom, into the screen
pub const DEFAULT_LIGHT: [f32; 3] = [-1.0, 1.0, 1.0];

/// Principal axis the molecule spins around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

/// How a ray picks between several spheres it passes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HitResolution {
    /// First sphere in scene order with a positive hit wins
    #[default]
    Priority,
    /// Smallest positive hit parameter across all spheres wins
    Nearest,
}

/// Rotate a point by `theta` radians about a principal axis through the origin.
///
/// The coordinate along `axis` is returned untouched.
pub fn rotate(point: Point3<f32>, theta: f32, axis: Axis) -> Point3<f32> {
    let (sin, cos) = theta.sin_cos();
    let p = point.coords;
    match axis {
        Axis::X => Point3::new(p.x, p.y * cos - p.z * sin, p.y * sin + p.z * cos),
        Axis::Y => Point3::new(p.z * sin + p.x * cos, p.y, p.z * cos - p.x * sin),
        Axis::Z => Point3::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos, p.z),
    }
}

/// Sphere primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point3<f32>,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Point3<f32>, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// A named atom with its rest position
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub name: String,
    pub rest: Sphere,
}

impl Atom {
    pub fn new(name: impl Into<String>, center: Point3<f32>, radius: f32) -> Self {
        Self {
            name: name.into(),
            rest: Sphere::new(center, radius),
        }
    }

    /// The atom's sphere after rotating its rest center by `theta`.
    ///
    /// Always derived from the rest center so repeated frames never
    /// accumulate rotation error.
    pub fn at(&self, theta: f32, axis: Axis) -> Sphere {
        Sphere::new(rotate(self.rest.center, theta, axis), self.rest.radius)
    }
}

/// Orthographic camera: parallel rays leaving a plane at fixed distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical stretch applied to rows; terminal cells are about twice as tall as wide
    pub pixel_aspect: f32,
    /// Ray origins sit on the plane z = -distance
    pub distance: f32,
    pub direction: Vector3<f32>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pixel_aspect: 2.0,
            distance: 30.0,
            direction: Vector3::new(0.0, 0.0, 1.0),
        }
    }
}

/// The complete scene: atoms, light and shading ramp
#[derive(Debug, Clone)]
pub struct Scene {
    pub atoms: Vec<Atom>,
    /// Unit vector the light travels along
    pub light: Vector3<f32>,
    pub glyphs: Vec<char>,
    pub camera: Camera,
    pub axis: Axis,
    pub resolution: HitResolution,
}

impl Default for Scene {
    fn default() -> Self {
        Self::hydroxymethylene()
    }
}

impl Scene {
    /// Build a scene, normalizing the light direction once.
    ///
    /// A zero-length light yields NaN components; callers validate first.
    pub fn new(
        atoms: Vec<Atom>,
        light: Vector3<f32>,
        glyphs: Vec<char>,
        camera: Camera,
        axis: Axis,
        resolution: HitResolution,
    ) -> Self {
        let mut light = light;
        light.normalize_mut();
        Self {
            atoms,
            light,
            glyphs,
            camera,
            axis,
            resolution,
        }
    }

    /// Hydroxymethylene spinning about the Y axis
    pub fn hydroxymethylene() -> Self {
        let atoms = HYDROXYMETHYLENE
            .iter()
            .map(|(name, [x, y, z], radius)| Atom::new(*name, Point3::new(*x, *y, *z), *radius))
            .collect();
        let [lx, ly, lz] = DEFAULT_LIGHT;

        Self::new(
            atoms,
            Vector3::new(lx, ly, lz),
            crate::GLYPH_RAMP.chars().collect(),
            Camera::default(),
            Axis::default(),
            HitResolution::default(),
        )
    }

    /// Sphere positions for rotation angle `theta`, in scene order
    pub fn spheres_at(&self, theta: f32) -> Vec<Sphere> {
        self.atoms.iter().map(|atom| atom.at(theta, self.axis)).collect()
    }
}
