use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use log::{info, log, Level};
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rayon::prelude::*;

use crate::{Color, CrateRng, Hittable, Interval, Ray, Screen, Vec3};

/// Hits closer than this are treated as the ray re-hitting the surface it left.
const SHADOW_ACNE_EPS: f64 = 0.001;

/// A fully initialized camera. Built from a [`CameraBuilder`] and read-only afterwards.
#[derive(Debug)]
pub struct Camera {
    image_width: usize,
    image_height: usize,
    samples_per_pixel: u32,
    max_depth: u32,
    /// Color scale factor for a sum of pixel samples
    pixel_samples_scale: f64,

    center: Vec3,
    /// Location of the center of pixel `(0, 0)`
    pixel00: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    /// Sub-pixel jitter, `[-0.5, 0.5)` in each direction
    jitter: Uniform<f64>,

    /// Width part of the orthonormal basis.
    pub u: Vec3,
    /// Height part of the orthonormal basis.
    pub v: Vec3,
    /// Depth part of the orthonormal basis, pointing away from the scene.
    pub w: Vec3,

    /// Used for depth of field. Non-positive disables it.
    defocus_angle: f64,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}
impl Camera {
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    pub fn image_width(&self) -> usize {
        self.image_width
    }

    pub fn image_height(&self) -> usize {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    /// Renders `world` into a new `Screen`, one parallel task per scanline.
    ///
    /// Each row draws from its own rng derived from `seed`, so the image only depends on
    /// `seed` and not on how rows get scheduled.
    pub fn render(&self, world: &Hittable, seed: u64) -> Screen {
        let mut screen = Screen::new(self.image_width, self.image_height);
        let remaining = AtomicUsize::new(self.image_height);

        info!(
            "Rendering {}x{} at {} samples per pixel on {} threads",
            self.image_width,
            self.image_height,
            self.samples_per_pixel,
            rayon::current_num_threads(),
        );

        screen.par_rows_mut().enumerate().for_each(|(j, row)| {
            let mut rng = row_rng(seed, j);
            for (i, pix) in row.iter_mut().enumerate() {
                *pix = self.sample_pixel(i, j, world, &mut rng);
            }

            let left = remaining.fetch_sub(1, Ordering::Relaxed) - 1;
            log!(progress_level(left), "Scanlines remaining: {}", left);
        });

        screen
    }

    /// Averages `samples_per_pixel` jittered paths through pixel `(i, j)`.
    pub fn sample_pixel(&self, i: usize, j: usize, world: &Hittable, rng: &mut CrateRng) -> Color {
        let samples = (0..self.samples_per_pixel).map(|_| {
            let ray = self.get_ray(i, j, rng);
            self.ray_color(&ray, self.max_depth, world, rng)
        });
        self.average(samples)
    }

    /// Sums `samples` and scales once by `1 / samples_per_pixel`.
    ///
    /// Scaling happens a single time, so there's no drift from repeated scaling, but the
    /// sum itself is ordinary floating point: 10 samples of `0.1` average to
    /// `0.09999999999999999`. The result is exact only when the partial sums are.
    pub fn average<I: IntoIterator<Item = Color>>(&self, samples: I) -> Color {
        let mut sum = Color::BLACK;
        for sample in samples {
            sum += sample;
        }
        self.pixel_samples_scale * sum
    }

    /// A ray from the defocus disk towards a random point in the footprint of pixel `(i, j)`.
    pub fn get_ray(&self, i: usize, j: usize, rng: &mut CrateRng) -> Ray {
        let (dx, dy) = (self.jitter.sample(rng), self.jitter.sample(rng));
        let pixel_sample = self.pixel00
            + (i as f64 + dx) * self.pixel_delta_u
            + (j as f64 + dy) * self.pixel_delta_v;

        let origin = if self.defocus_angle <= 0. {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(origin, pixel_sample - origin)
    }

    fn defocus_disk_sample(&self, rng: &mut CrateRng) -> Vec3 {
        let p = Vec3::rand_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    /// Follows `ray` through `world` for at most `depth` bounces.
    pub fn ray_color(&self, ray: &Ray, depth: u32, world: &Hittable, rng: &mut CrateRng) -> Color {
        // Out of bounces, so no more light is gathered
        if depth == 0 {
            return Color::BLACK;
        }

        match world.hit(ray, Interval::new(SHADOW_ACNE_EPS, f64::INFINITY)) {
            Some(hit) => match hit.material.scatter(ray, &hit, rng) {
                Some(scatter) => scatter.albedo * self.ray_color(&scatter.ray, depth - 1, world, rng),
                None => Color::BLACK,
            },
            None => background(ray),
        }
    }
}

/// Sky gradient, white at the bottom fading to blue straight up.
pub fn background(ray: &Ray) -> Color {
    let unit_dir = Vec3::normalized(ray.dir);
    let a = 0.5 * (unit_dir.y + 1.);
    Color::WHITE.lerp(Color::new(0.5, 0.7, 1.), a)
}

/// Every hundredth scanline is worth reporting at the default level.
fn progress_level(remaining: usize) -> Level {
    if remaining % 100 == 0 {
        Level::Info
    } else {
        Level::Debug
    }
}

/// Height for `width` at `aspect_ratio`, falling back to a square image (or a single
/// scanline) when the frame buffer couldn't be addressed.
fn image_height(width: usize, aspect_ratio: f64) -> usize {
    let fits = |height: usize| {
        height
            .checked_mul(width)
            .and_then(|pixels| pixels.checked_mul(mem::size_of::<Color>()))
            .map_or(false, |bytes| bytes <= isize::MAX as usize)
    };

    let height = ((width as f64 / aspect_ratio) as usize).max(1);
    if fits(height) {
        height
    } else if fits(width) {
        width
    } else {
        1
    }
}

fn row_rng(seed: u64, row: usize) -> CrateRng {
    CrateRng::seed_from_u64(seed ^ (row as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[derive(Clone, Debug)]
pub struct CameraBuilder {
    aspect_ratio: f64,
    image_width: usize,
    samples_per_pixel: u32,
    max_depth: u32,
    vfov_degrees: f64,
    origin: Vec3,
    look_at: Vec3,
    view_up: Vec3,
    /// Variation angle of rays through each pixel. Non-positive disables depth of field.
    defocus_angle: f64,
    /// Distance from `origin` to the plane of perfect focus. Non-positive focuses on `look_at`.
    focus_dist: f64,
}
impl CameraBuilder {
    /// Derives the viewport from the configuration.
    ///
    /// Degenerate sizes are clamped so there's always at least one pixel and one sample, and
    /// a focus distance that isn't positive falls back to the distance to `look_at`.
    /// A view basis that can't be formed is an error.
    pub fn build(&self) -> Result<Camera> {
        let image_width = self.image_width.max(1);
        let aspect_ratio = if self.aspect_ratio > 0. && self.aspect_ratio.is_finite() {
            self.aspect_ratio
        } else {
            1.
        };
        let image_height = image_height(image_width, aspect_ratio);
        let samples_per_pixel = self.samples_per_pixel.max(1);

        // Project view_up onto the plane of the camera and form the orthonormal basis.
        // Also deal with bad camera configurations.

        // Error if camera's origin and look_at are the same.
        let w = Vec3::checked_normalized(self.origin - self.look_at)
            .with_context(|| {
                format!(
                    "Camera's origin and look_at vectors are the same.\nOrigin: {:?}",
                    self.origin,
                )
            })
            .camera_context(self)?;

        // Error if the view_up vector has length 0.
        let view_up = Vec3::checked_normalized(self.view_up)
            .with_context(|| format!("Camera's view_up vector has length 0: {:?}", self.view_up))
            .camera_context(self)?;

        // Error if look_at and view_up are parallel.
        let u = Vec3::checked_normalized(view_up.cross(w))
            .with_context(|| {
                format!(
                    "Camera's look_at and view_up vectors are parellel.\nResp.: {:?} || {:?}",
                    self.look_at, view_up,
                )
            })
            .camera_context(self)?;

        let v = w.cross(u);

        // Nonzero since origin and look_at differ
        let focus_dist = if self.focus_dist > 0. && self.focus_dist.is_finite() {
            self.focus_dist
        } else {
            (self.origin - self.look_at).norm()
        };

        let theta = self.vfov_degrees.to_radians();
        let h = (theta / 2.).tan();
        let viewport_height = 2. * h * focus_dist;
        let viewport_width = viewport_height * (image_width as f64 / image_height as f64);

        // Viewport edges, `v` flipped since rows run top to bottom
        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * -v;
        let pixel_delta_u = viewport_u / image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let upper_left = self.origin - focus_dist * w - viewport_u / 2. - viewport_v / 2.;
        let pixel00 = upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = focus_dist * (self.defocus_angle / 2.).to_radians().tan();

        Ok(Camera {
            image_width,
            image_height,
            samples_per_pixel,
            max_depth: self.max_depth,
            pixel_samples_scale: 1. / samples_per_pixel as f64,
            center: self.origin,
            pixel00,
            pixel_delta_u,
            pixel_delta_v,
            jitter: Uniform::new(-0.5, 0.5),
            u,
            v,
            w,
            defocus_angle: self.defocus_angle,
            defocus_disk_u: defocus_radius * u,
            defocus_disk_v: defocus_radius * v,
        })
    }
    // ===== Builder Methods =====
    pub fn aspect_ratio(&mut self, aspect_ratio: f64) -> &mut Self {
        self.aspect_ratio = aspect_ratio;
        self
    }
    pub fn image_width(&mut self, width: usize) -> &mut Self {
        self.image_width = width;
        self
    }
    pub fn samples_per_pixel(&mut self, samples: u32) -> &mut Self {
        self.samples_per_pixel = samples;
        self
    }
    /// Maximum number of bounces per path. `0` renders black.
    pub fn max_depth(&mut self, depth: u32) -> &mut Self {
        self.max_depth = depth;
        self
    }
    pub fn vfov_degrees(&mut self, vfov: f64) -> &mut Self {
        self.vfov_degrees = vfov;
        self
    }
    pub fn origin<T: Into<Vec3>>(&mut self, origin: T) -> &mut Self {
        self.origin = origin.into();
        self
    }
    pub fn look_at<T: Into<Vec3>>(&mut self, look_at: T) -> &mut Self {
        self.look_at = look_at.into();
        self
    }
    pub fn view_up<T: Into<Vec3>>(&mut self, view_up: T) -> &mut Self {
        self.view_up = view_up.into();
        self
    }
    pub fn defocus_angle(&mut self, degrees: f64) -> &mut Self {
        self.defocus_angle = degrees;
        self
    }
    pub fn focus_dist(&mut self, dist: f64) -> &mut Self {
        self.focus_dist = dist;
        self
    }
}
impl Default for CameraBuilder {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov_degrees: 90.,
            origin: Vec3::ORIGIN,
            look_at: Vec3::new(0., 0., -1.),
            view_up: Vec3::UNIT_Y,
            defocus_angle: 0.,
            focus_dist: 10.,
        }
    }
}

trait ResultExt {
    fn camera_context(self, builder: &CameraBuilder) -> Result<Vec3>;
}
impl ResultExt for Result<Vec3> {
    /// Attach the CameraBuilder to the Result as context.
    fn camera_context(self, builder: &CameraBuilder) -> Result<Vec3> {
        self.with_context(|| format!("Invalid Camera configuration.\n{:#?}", builder))
    }
}
