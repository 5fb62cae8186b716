use crate::{Interval, Material, Ray, Sphere, Vec3};

pub struct Hit<'a> {
    pub point: Vec3,
    /// A unit-length normal vector, always facing against the incident ray
    pub normal: Vec3,
    /// Ray parameter of the hit
    pub t: f64,
    /// Hit the front face or back face of object
    pub front_face: bool,
    /// The material that was hit
    pub material: &'a Material,
}
impl<'a> Hit<'a> {
    pub fn new(point: Vec3, normal: Vec3, t: f64, front_face: bool, material: &'a Material) -> Self {
        Self {
            point,
            normal,
            t,
            front_face,
            material,
        }
    }

    /// Build a hit from the geometry's outward normal.
    pub fn ray(point: Vec3, mut normal: Vec3, t: f64, ray: &Ray, material: &'a Material) -> Self {
        // Dot product is negative when ray hits back face
        let front_face = ray.dir.dot(normal) < 0.;
        // Make suface normal always point against incident ray
        if !front_face {
            normal *= -1.;
        }
        Self::new(point, normal, t, front_face, material)
    }
}

/// Anything a ray can intersect.
#[derive(Clone, Debug)]
pub enum Hittable {
    Sphere(Sphere),
    List(HitList),
}
impl Hittable {
    /// Returns the closest hit along `ray` whose `t` is surrounded by `ray_t`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Hit> {
        match self {
            Hittable::Sphere(sphere) => sphere.hit(ray, ray_t),
            Hittable::List(list) => list.hit(ray, ray_t),
        }
    }
}
impl From<Sphere> for Hittable {
    fn from(sphere: Sphere) -> Self {
        Hittable::Sphere(sphere)
    }
}
impl From<HitList> for Hittable {
    fn from(list: HitList) -> Self {
        Hittable::List(list)
    }
}

/// Linear-scan aggregate of hittables.
#[derive(Clone, Debug, Default)]
pub struct HitList(pub Vec<Hittable>);
impl HitList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push<T: Into<Hittable>>(&mut self, val: T) {
        self.0.push(val.into())
    }

    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Hit> {
        let mut range = ray_t;
        let mut closest = None;
        for obj in &self.0 {
            if let Some(hit) = obj.hit(ray, range) {
                range.max = hit.t;
                closest = Some(hit);
            }
        }
        closest
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::{CrateRng, Lambertian};

    fn scene(rng: &mut CrateRng) -> Vec<Sphere> {
        (0..20)
            .map(|_| {
                let center = Vec3::new(
                    rng.gen_range(-3., 3.),
                    rng.gen_range(-3., 3.),
                    rng.gen_range(-8., -2.),
                );
                Sphere::new(center, rng.gen_range(0.1, 1.), Lambertian::from([0.5; 3]))
            })
            .collect()
    }

    #[test]
    fn list_matches_brute_force() {
        let mut rng = CrateRng::seed_from_u64(42);
        let spheres = scene(&mut rng);
        let mut list = HitList::new();
        for sphere in &spheres {
            list.push(sphere.clone());
        }
        let ray_t = Interval::new(0.001, f64::INFINITY);

        let mut hits = 0;
        for _ in 0..500 {
            let dir = Vec3::rand_unit_sphere(&mut rng);
            let ray = Ray::new(Vec3::ORIGIN, dir);

            let brute = spheres
                .iter()
                .filter_map(|s| s.hit(&ray, ray_t).map(|hit| hit.t))
                .fold(None, |min: Option<f64>, t| Some(min.map_or(t, |m| m.min(t))));
            let listed = list.hit(&ray, ray_t).map(|hit| hit.t);

            assert_eq!(brute, listed);
            hits += listed.is_some() as usize;
        }
        // Make sure the scene actually got in the way
        assert!(hits > 0);
    }

    #[test]
    fn empty_list_never_hits() {
        let ray = Ray::new(Vec3::ORIGIN, -Vec3::UNIT_Z);
        assert!(HitList::new().hit(&ray, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn nested_lists() {
        let mut inner = HitList::new();
        inner.push(Sphere::from([0., 0., -5.], 1., Lambertian::from([0.5; 3])));
        let mut outer = HitList::new();
        outer.push(Sphere::from([0., 0., -10.], 1., Lambertian::from([0.5; 3])));
        outer.push(inner);

        let ray = Ray::new(Vec3::ORIGIN, -Vec3::UNIT_Z);
        let hit = outer.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert_eq!(hit.t, 4.);
        assert!(hit.front_face);
        assert_eq!(hit.normal, Vec3::UNIT_Z);
    }
}
