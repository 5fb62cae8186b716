use std::fs::File;
use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use rand::{Rng, SeedableRng};

use pathtrace::config;
use pathtrace::{CrateRng, Hittable};

fn main() -> Result<()> {
    let config = config::GLOBAL();

    env_logger::Builder::from_default_env()
        .filter_level(config.log_level())
        .init();

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads.get())
            .build_global()
            .context("Failed to start the render threads")?;
    }

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("Scene {} with seed {}", config.scene, seed);
    let mut rng = CrateRng::seed_from_u64(seed);
    let (camera, world) = config.scene.create(config, &mut rng)?;
    let world = Hittable::from(world);

    let start = Instant::now();
    let screen = camera.render(&world, rng.gen());
    let secs = start.elapsed().as_secs();
    info!(
        "Render time: {}h{}m{}s",
        secs / 3600,
        secs / 60 % 60,
        secs % 60
    );

    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            screen.write_ppm(file)?;
            info!("Wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            screen.write_ppm(stdout.lock())?;
        }
    }

    Ok(())
}
