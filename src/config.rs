use std::num::{NonZeroU32, NonZeroUsize};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use log::LevelFilter;
use once_cell::sync::OnceCell;
use rand::Rng;
use structopt::StructOpt;
use strum::VariantNames;
use strum_macros::Display as StrumDisplay;
use strum_macros::{EnumString, EnumVariantNames};

use crate::{Camera, Color, CrateRng, Dielectric, HitList, Lambertian, Metal, Sphere, Vec3};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[allow(non_snake_case)]
/// Return a `Config` built from command line args
pub fn GLOBAL() -> &'static Config {
    CONFIG.get_or_init(Config::from_args)
}

#[derive(Clone, Debug, StructOpt)]
pub struct Config {
    #[structopt(short, long, default_value = "400", display_order = 0)]
    /// Width of render
    pub width: NonZeroUsize,

    #[structopt(short, long, default_value = "1.7777777777777777", display_order = 1)]
    /// Width over height. The height is derived from this and the width
    pub aspect_ratio: f64,

    #[structopt(short, long, default_value = "100")]
    /// Number of samples per pixel
    pub samples: NonZeroU32,

    #[structopt(short, long, default_value = "50")]
    /// Maximum ray bounce depth
    pub max_depth: NonZeroU32,

    #[structopt(short = "r", long = "rng")]
    /// Use a specific seed for the rng.
    pub seed: Option<u64>,

    #[structopt(short = "j", long)]
    /// Number of render threads. Defaults to one per core
    pub threads: Option<NonZeroUsize>,

    #[structopt(short, long, parse(from_os_str))]
    /// Write the PPM image here instead of stdout
    pub output: Option<PathBuf>,

    #[structopt(short, long, parse(from_occurrences))]
    /// Log more. Repeat for even more
    pub verbose: u8,

    #[structopt(
        default_value = "Random",
        // Using this instead of possible_values because possible_values doesn't wrap properly
        parse(try_from_str = parse_scene),
    )]
    /// The scene to render
    pub scene: Scene,
}
impl Config {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn parse_scene(s: &str) -> Result<Scene> {
    s.parse::<Scene>().map_err(|_| {
        anyhow!(
            "\"{}\" isn't a Scene.\nPossible values: {:#?}",
            s,
            Scene::VARIANTS
        )
    })
}

#[derive(Copy, Clone, Debug, StrumDisplay, EnumString, EnumVariantNames, PartialEq)]
pub enum Scene {
    /// Field of small random spheres around three large ones
    Random,
    Balls,
    /// One diffuse sphere in front of the camera
    Single,
}

impl Scene {
    pub fn create(self, config: &Config, rng: &mut CrateRng) -> Result<(Camera, HitList)> {
        let camera = self.camera(config)?;
        Ok((camera, self.world(rng)))
    }

    pub fn camera(self, config: &Config) -> Result<Camera> {
        use Scene::*;

        let mut builder = Camera::builder();
        builder
            .image_width(config.width.get())
            .aspect_ratio(config.aspect_ratio)
            .samples_per_pixel(config.samples.get())
            .max_depth(config.max_depth.get());

        let result = match self {
            Random => builder
                .origin([13., 2., 3.])
                .look_at([0., 0., 0.])
                .vfov_degrees(20.)
                .defocus_angle(0.6)
                .focus_dist(10.)
                .build(),
            Balls => builder
                .origin([-2., 2., 1.])
                .look_at([0., 0., -1.])
                .vfov_degrees(20.)
                .defocus_angle(10.)
                .focus_dist(3.4)
                .build(),
            Single => builder.focus_dist(1.).build(),
        };

        result.map_err(|err| err.context(self))
    }

    pub fn world(self, rng: &mut CrateRng) -> HitList {
        use Scene::*;

        let mut world = HitList::new();
        match self {
            Random => {
                world.push(Sphere::from(
                    [0., -1000., 0.],
                    1000.,
                    Lambertian::from([0.5, 0.5, 0.5]),
                ));

                for a in -11..11 {
                    for b in -11..11 {
                        let material = rng.gen::<f64>();
                        let (x, z) = (0.9 * rng.gen::<f64>(), 0.9 * rng.gen::<f64>());
                        let center = Vec3::new(a as f64 + x, 0.2, b as f64 + z);
                        if (center - Vec3::new(4., 0.2, 0.)).norm() <= 0.9 {
                            continue;
                        }
                        if material < 0.8 {
                            // diffuse
                            let albedo = Color::rand(rng) * Color::rand(rng);
                            world.push(Sphere::new(center, 0.2, Lambertian::new(albedo)));
                        } else if material < 0.95 {
                            // metal
                            let albedo = Color::rand_range(rng, 0.5, 1.);
                            let fuzz = rng.gen_range(0., 0.5);
                            world.push(Sphere::new(center, 0.2, Metal::new(albedo, fuzz)));
                        } else {
                            // glass
                            world.push(Sphere::new(center, 0.2, Dielectric::new(1.5)));
                        }
                    }
                }

                world.push(Sphere::from([0., 1., 0.], 1., Dielectric::new(1.5)));
                world.push(Sphere::from(
                    [-4., 1., 0.],
                    1.,
                    Lambertian::from([0.4, 0.2, 0.1]),
                ));
                world.push(Sphere::from(
                    [4., 1., 0.],
                    1.,
                    Metal::from([0.7, 0.6, 0.5], 0.0),
                ));
            }
            Balls => {
                world.push(Sphere::from(
                    [0., -100.5, -1.],
                    100.,
                    Lambertian::from([0.8, 0.8, 0.]),
                ));
                world.push(Sphere::from(
                    [0., 0., -1.2],
                    0.5,
                    Lambertian::from([0.1, 0.2, 0.5]),
                ));
                // Hollow glass ball
                world.push(Sphere::from([-1., 0., -1.], 0.5, Dielectric::new(1.5)));
                world.push(Sphere::from([-1., 0., -1.], 0.4, Dielectric::new(1. / 1.5)));
                world.push(Sphere::from(
                    [1., 0., -1.],
                    0.5,
                    Metal::from([0.8, 0.6, 0.2], 1.),
                ));
            }
            Single => {
                world.push(Sphere::from(
                    [0., 0., -1.],
                    0.5,
                    Lambertian::from([0.5, 0.5, 0.5]),
                ));
            }
        }

        world
    }
}


#[cfg(test)]
mod scene_test {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn every_scene_builds() {
        let config = Config::from_iter_safe(&["pathtrace", "-w", "32"]).unwrap();
        let mut rng = CrateRng::seed_from_u64(0);
        for name in Scene::VARIANTS {
            let scene: Scene = name.parse().unwrap();
            let (camera, world) = scene.create(&config, &mut rng).unwrap();
            assert_eq!(camera.image_width(), 32);
            assert_eq!(camera.image_height(), 18);
            assert!(!world.0.is_empty());
        }
    }

    #[test]
    fn random_scene_keeps_feature_spheres() {
        let mut rng = CrateRng::seed_from_u64(0);
        let world = Scene::Random.world(&mut rng);
        // Ground, at most 22 * 22 small spheres, and 3 large ones
        assert!(world.0.len() > 4 && world.0.len() <= 1 + 22 * 22 + 3);
    }
}
