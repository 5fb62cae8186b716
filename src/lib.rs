//! A CPU path tracer in the style of _Ray Tracing in One Weekend_.
//!
//! Scenes are a [`HitList`] of [`Sphere`]s carrying [`Material`]s. A [`Camera`] traces
//! jittered paths through every pixel in parallel and fills a [`Screen`], which can be
//! written out as a PPM.

pub mod camera;
pub mod color;
pub mod config;
pub mod hit;
pub mod interval;
pub mod material;
pub mod ray;
pub mod screen;
pub mod shape;
pub mod vec3;

pub use camera::{Camera, CameraBuilder};
pub use color::Color;
pub use hit::{Hit, HitList, Hittable};
pub use interval::Interval;
pub use material::{Dielectric, Lambertian, Material, Metal, Scatter};
pub use ray::Ray;
pub use screen::Screen;
pub use shape::Sphere;
pub use vec3::Vec3;

/// The rng used for all sampling. Each render thread owns its own.
pub type CrateRng = rand::rngs::SmallRng;
