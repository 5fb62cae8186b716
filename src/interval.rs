//! Scalar ranges for bounding ray parameters.
//!
//! Hit tests accept a root `t` only if the interval [`surrounds`](Interval::surrounds) it,
//! both for single shapes and while a [`HitList`](crate::HitList) narrows its search.

/// The range between `min` and `max`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}
impl Interval {
    pub const UNIVERSE: Self = Self::new(f64::NEG_INFINITY, f64::INFINITY);

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Exclusive of both ends.
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.max(self.min).min(self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        let i = Interval::new(0.001, 1.);
        assert!(!i.surrounds(0.001) && !i.surrounds(1.));
        assert!(i.surrounds(0.5));
    }

    #[test]
    fn universe() {
        assert!(Interval::UNIVERSE.surrounds(f64::MAX));
        assert!(!Interval::UNIVERSE.surrounds(f64::INFINITY));
    }

    #[test]
    fn clamp() {
        let i = Interval::new(0., 0.999);
        assert_eq!(i.clamp(-3.), 0.);
        assert_eq!(i.clamp(2.), 0.999);
        assert_eq!(i.clamp(0.5), 0.5);
    }
}
