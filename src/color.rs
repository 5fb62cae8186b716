use std::ops;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::{CrateRng, Interval};

/// Linear color. Each channel ranges from 0.0 to 1.0, where 1.0 is full brightness
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}
impl Color {
    pub const BLACK: Self = Self::new(0., 0., 0.);
    pub const WHITE: Self = Self::new(1., 1., 1.);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn rand(rng: &mut CrateRng) -> Self {
        let albedo = rng.gen::<[f64; 3]>();
        albedo.into()
    }

    pub fn rand_range(rng: &mut CrateRng, low: f64, high: f64) -> Self {
        let distr = Uniform::new(low, high);
        let albedo = [distr.sample(rng), distr.sample(rng), distr.sample(rng)];
        albedo.into()
    }

    /// Linear blend, `self` at `t = 0` and `other` at `t = 1`.
    pub fn lerp(self, other: Color, t: f64) -> Self {
        (1. - t) * self + t * other
    }

    /// Gamma corrects each channel and quantizes it to a byte.
    ///
    /// # Example
    /// ```
    /// # use pathtrace::Color;
    /// assert_eq!(Color::new(0., 0.25, 1.).to_rgb8(), [0, 128, 255]);
    /// ```
    pub fn to_rgb8(&self) -> [u8; 3] {
        let intensity = Interval::new(0., 0.999);
        let encode = |linear: f64| (256. * intensity.clamp(linear_to_gamma(linear))) as u8;
        [encode(self.r), encode(self.g), encode(self.b)]
    }
}

/// Gamma 2 transfer. Negative and `NaN` channels come out black.
fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0. {
        linear.sqrt()
    } else {
        0.
    }
}

impl From<[f64; 3]> for Color {
    fn from(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}
impl Default for Color {
    /// Returns white
    fn default() -> Self {
        Self::WHITE
    }
}

impl ops::Add for Color {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}
impl ops::AddAssign for Color {
    fn add_assign(&mut self, rhs: Self) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}
impl ops::Mul for Color {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}
impl ops::Mul<f64> for Color {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}
impl ops::Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        rhs * self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_channels_are_clamped() {
        assert_eq!(Color::new(4., -1., f64::NAN).to_rgb8(), [255, 0, 0]);
    }

    #[test]
    fn gamma_is_square_root() {
        // sqrt(0.09) * 256 = 76.8
        assert_eq!(Color::new(0.09, 0.09, 0.09).to_rgb8(), [76; 3]);
    }

    #[test]
    fn lerp_endpoints() {
        let blue = Color::new(0.5, 0.7, 1.);
        assert_eq!(Color::WHITE.lerp(blue, 0.), Color::WHITE);
        assert_eq!(Color::WHITE.lerp(blue, 1.), blue);
    }
}
