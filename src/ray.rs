use crate::Vec3;

/// A half-line `origin + t * dir`. `dir` is not normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}
impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    /// # Example
    /// ```
    /// # use pathtrace::{Ray, Vec3};
    /// let ray = Ray::new(Vec3::new(1., 0., 0.), Vec3::new(0., 2., 0.));
    /// assert_eq!(ray.at(1.5), Vec3::new(1., 3., 0.));
    /// ```
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + t * self.dir
    }
}
