use crate::{Hit, Interval, Material, Ray, Vec3};

#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
    pub material: Material,
}
impl Sphere {
    pub fn new<M: Into<Material>>(center: Vec3, radius: f64, material: M) -> Self {
        Self {
            center,
            radius: radius.max(0.),
            material: material.into(),
        }
    }

    pub fn from<M: Into<Material>>(c: [f64; 3], radius: f64, material: M) -> Self {
        Self::new(c.into(), radius, material)
    }

    /// Returns the nearer root of the ray-sphere quadratic that `ray_t` surrounds.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Hit> {
        let oc = ray.origin - self.center;
        let a = ray.dir.norm_squared();
        let half_b = oc.dot(ray.dir);
        let c = oc.norm_squared() - self.radius.powi(2);
        let discriminant = half_b.powi(2) - a * c;

        if discriminant < 0. {
            return None;
        }

        let root = discriminant.sqrt();
        let hit = |t| {
            let point = ray.at(t);
            let outward_normal = (point - self.center) / self.radius;
            Some(Hit::ray(point, outward_normal, t, ray, &self.material))
        };

        let t = (-half_b - root) / a;
        if ray_t.surrounds(t) {
            return hit(t);
        }

        let t = (-half_b + root) / a;
        if ray_t.surrounds(t) {
            return hit(t);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::{CrateRng, Lambertian};

    fn unit_sphere_at(z: f64) -> Sphere {
        Sphere::from([0., 0., z], 1., Lambertian::from([0.5; 3]))
    }

    #[test]
    fn picks_near_root_first() {
        let sphere = unit_sphere_at(-5.);
        let ray = Ray::new(Vec3::ORIGIN, -Vec3::UNIT_Z);
        let hit = sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert_eq!(hit.t, 4.);
        assert_eq!(hit.point, Vec3::new(0., 0., -4.));
        assert!(hit.front_face);
    }

    #[test]
    fn falls_back_to_far_root() {
        // Ray starts inside the sphere
        let sphere = unit_sphere_at(0.);
        let ray = Ray::new(Vec3::ORIGIN, -Vec3::UNIT_Z);
        let hit = sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert_eq!(hit.t, 1.);
        assert!(!hit.front_face);
        // Normal flipped to face back into the sphere
        assert_eq!(hit.normal, Vec3::UNIT_Z);
    }

    #[test]
    fn misses() {
        let sphere = unit_sphere_at(-5.);
        let ray = Ray::new(Vec3::new(0., 2., 0.), -Vec3::UNIT_Z);
        assert!(sphere.hit(&ray, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn both_roots_outside_interval() {
        let sphere = unit_sphere_at(-5.);
        let ray = Ray::new(Vec3::ORIGIN, -Vec3::UNIT_Z);
        assert!(sphere.hit(&ray, Interval::new(0.001, 3.)).is_none());
        assert!(sphere.hit(&ray, Interval::new(6., 10.)).is_none());
        // Roots on the boundary are rejected
        assert!(sphere.hit(&ray, Interval::new(0.001, 4.)).is_none());
    }

    #[test]
    fn hits_agree_with_discriminant() {
        let mut rng = CrateRng::seed_from_u64(5);
        let sphere = Sphere::from([0.3, -0.2, -3.], 1.2, Lambertian::from([0.5; 3]));
        for _ in 0..1000 {
            let origin = Vec3::new(rng.gen_range(-1., 1.), rng.gen_range(-1., 1.), 0.);
            let dir = Vec3::rand_unit_sphere(&mut rng) * rng.gen_range(0.5, 2.);
            let ray = Ray::new(origin, dir);

            let oc = origin - sphere.center;
            let half_b = oc.dot(dir);
            let c = oc.norm_squared() - sphere.radius.powi(2);
            let disc = half_b.powi(2) - dir.norm_squared() * c;

            match sphere.hit(&ray, Interval::UNIVERSE) {
                Some(hit) => {
                    assert!(disc >= 0.);
                    assert!((hit.normal.norm() - 1.).abs() < 1e-9);
                    assert!(ray.dir.dot(hit.normal) <= 0.);
                }
                None => assert!(disc < 0.),
            }
        }
    }
}
